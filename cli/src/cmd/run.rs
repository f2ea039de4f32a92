use std::path::PathBuf;

use anyhow::ensure;
use judge_core::{action, testing::BatchRunner};
use judge_webclient::{JudgeBackend as _, Testcase};

use super::{load_client, GlobalArgs, ProblemArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg()] // positional argument
    pub program_file: PathBuf,

    #[command(flatten)]
    pub target: ProblemArgs,

    /// Backend language id (default: from `[[language]]` in judge.toml)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Run this single input instead of the problem's test cases
    #[arg(short, long, conflicts_with_all = ["problem", "route"])]
    pub input: Option<String>,

    #[arg(short, long, requires = "input", default_value = "")]
    pub expected: String,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    ensure!(
        args.input.is_some() || args.target.is_given(),
        "Please specify '--problem <ID>', '--route <PATH>' or '--input <TEXT>'"
    );

    let (cfg, cli) = load_client(global_args)?;
    let code = util::read_source_file(&args.program_file)?;
    let language = match &args.lang {
        Some(lang) => lang.to_owned(),
        None => cfg
            .language_for_filename(util::file_name(&args.program_file))
            .to_owned(),
    };

    let runner = BatchRunner::new(cli.into_client());

    if let Some(input) = &args.input {
        let t = Testcase::new(input.as_str(), args.expected.as_str());
        let v = action::do_run_single(&runner, &code, &language, &t).await?;
        ensure!(v.passed, "{}", v.message);
        return Ok(());
    }

    let problem_id = args.target.problem_id()?;
    let testcases = runner.backend().fetch_testcases(&problem_id).await?;
    let res = action::do_run(&runner, &code, &language, &testcases).await?;
    ensure!(res.all_passed, "{}", res.message);
    Ok(())
}
