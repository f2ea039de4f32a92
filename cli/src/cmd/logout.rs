use judge_core::action;

use super::{load_client, GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let (_, mut cli) = load_client(global_args)?;
    action::logout(&mut cli)?;
    println!("Successfully logged out from {}", cli.base_url());
    Ok(())
}
