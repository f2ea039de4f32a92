use judge_core::{action, print_success};

use super::{load_client, GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Access token issued by the judge. Prompted for when omitted.
    #[arg(long)]
    pub token: Option<String>,
}

pub fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let (_, mut cli) = load_client(global_args)?;
    action::login(&mut cli, args.token.clone())?;
    print_success!("Successfully logged in to {}", cli.base_url());
    Ok(())
}
