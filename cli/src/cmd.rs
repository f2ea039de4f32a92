pub mod init;
pub mod login;
pub mod logout;
pub mod problem;
pub mod run;
pub mod submit;

use std::path::PathBuf;

use anyhow::{ensure, Context as _};
use judge_core::{client::SessionPersistentClient, Config};
use judge_webclient::ProblemId;

use crate::{
    config::{EnvConfig, GlobalConfig},
    util,
};

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Init(init::Args),
    Login(login::Args),
    Logout(logout::Args),
    Problem(problem::Args),

    #[command(alias("r"))]
    Run(run::Args),

    #[command(alias("s"))]
    Submit(submit::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Init(args) => init::exec(args, self),
            Login(args) => login::exec(args, self),
            Logout(args) => logout::exec(args, self),
            Problem(args) => problem::exec(args, self).await,
            Run(args) => run::exec(args, self).await,
            Submit(args) => submit::exec(args, self).await,
        }
    }
}

/// Which problem the command is about: an id, or a `/problems/:id/solve` route.
#[derive(Debug, Clone, clap::Args)]
pub struct ProblemArgs {
    #[arg(short, long)]
    pub problem: Option<String>,

    #[arg(long, conflicts_with = "problem")]
    pub route: Option<String>,
}

impl ProblemArgs {
    pub fn is_given(&self) -> bool {
        self.problem.is_some() || self.route.is_some()
    }

    pub fn problem_id(&self) -> anyhow::Result<ProblemId> {
        ensure!(self.is_given(), "Please specify '--problem <ID>' or '--route <PATH>'");
        match (&self.problem, &self.route) {
            (Some(id), _) => ProblemId::new(id).context("Invalid problem id"),
            (None, Some(route)) => {
                ProblemId::from_route_path(route).context("Cannot determine the problem")
            }
            (None, None) => unreachable!(),
        }
    }
}

/// Load `judge.toml` and a session-aware client, honoring `CJUDGE_*` overrides.
pub fn load_client(global_args: &GlobalArgs) -> anyhow::Result<(Config, SessionPersistentClient)> {
    let cfg = Config::from_file_finding_in_ancestors(util::current_dir())?;
    let global_cfg = GlobalConfig::from_file_and_args(global_args);
    let env = EnvConfig::from_env();

    let base_url = env.base_url.unwrap_or_else(|| cfg.backend.base_url.clone());
    log::debug!("Backend: {}", base_url);

    let mut cli = SessionPersistentClient::new(base_url, &global_cfg.cache_dir);
    if let Some(token) = env.token {
        cli.use_token(token);
    }
    Ok((cfg, cli))
}
