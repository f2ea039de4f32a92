use colored::Colorize as _;
use judge_core::action;

use super::{load_client, GlobalArgs, ProblemArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    pub target: ProblemArgs,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let problem_id = args.target.problem_id()?;
    let (_, cli) = load_client(global_args)?;

    let (info, testcases) = action::fetch_problem(cli.client(), &problem_id).await?;

    println!("{} {}", info.problem_id.bright_black(), info.title.bold());
    println!(
        "difficulty: {}  accepted: {}  submissions: {}",
        info.difficulty, info.accept_rate, info.submission_count
    );
    let tags = info.tag_names();
    if !tags.is_empty() {
        println!("tags: {}", tags.join(", ").cyan());
    }
    println!("\n{}\n", info.content);
    println!("{} test case(s)", testcases.len());
    Ok(())
}
