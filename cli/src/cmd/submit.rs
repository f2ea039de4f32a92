use std::path::PathBuf;

use anyhow::ensure;
use colored::Colorize;
use judge_core::{action, testing::BatchRunner};
use judge_webclient::JudgeBackend as _;

use super::{load_client, GlobalArgs, ProblemArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub program_file: PathBuf,

    #[command(flatten)]
    pub target: ProblemArgs,

    #[arg(short, long)]
    pub lang: Option<String>,

    #[arg(short, long)]
    pub test: bool,

    #[arg(short = 'N', long)]
    pub no_test: bool,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    ensure!(
        !(args.test && args.no_test),
        "Conflict option: '--test' and '--no-test'"
    );

    let problem_id = args.target.problem_id()?;
    let (cfg, cli) = load_client(global_args)?;
    let code = util::read_source_file(&args.program_file)?;
    let language = match &args.lang {
        Some(lang) => lang.to_owned(),
        None => cfg
            .language_for_filename(util::file_name(&args.program_file))
            .to_owned(),
    };

    let runner = BatchRunner::new(cli.into_client());

    // The config decides by default; flags override it.
    let run_test = args.test | (cfg.submit.run_test & !args.no_test);
    if run_test {
        let testcases = runner.backend().fetch_testcases(&problem_id).await?;
        let res = action::do_run(&runner, &code, &language, &testcases).await?;
        if !res.all_passed {
            println!(
                "{}",
                "Canceling submission due to test failure.".bright_red()
            );
            return Ok(());
        }
    }

    let backend = runner.backend();
    let receipt = match &args.target.route {
        Some(route) => action::submit_from_route(backend, route, &code, &language).await?,
        None => action::submit(backend, &problem_id, &code, &language).await?,
    };

    println!(
        "{}\nSubmission id:\n  {}",
        format!(
            "Successfully submitted {:?} to problem {}",
            args.program_file, problem_id
        )
        .green(),
        receipt.submission_id.cyan(),
    );
    Ok(())
}
