use judge_core::{print_success, Config};
use std::path::PathBuf;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = "./")]
    dir: PathBuf,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    let path = Config::init_with_example(&args.dir)?;
    print_success!("Successfully created {}", path.to_string_lossy());
    Ok(())
}
