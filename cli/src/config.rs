use judge_webclient::Url;
use serde::{Deserialize, Serialize};
use std::{fs::File, io, path::PathBuf};

use crate::{cmd::GlobalArgs, util};

pub const APP_NAME: &str = "cjudge";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "GlobalConfig::default_cache_dir")]
    pub cache_dir: PathBuf,
}

/// `CJUDGE_*` environment overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvConfig {
    pub base_url: Option<Url>,
    pub token: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            cache_dir: Self::default_cache_dir(),
        }
    }
}

impl GlobalConfig {
    pub const FILENAME: &str = "cjudge.toml";

    pub fn filepath() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(Self::FILENAME))
    }

    fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME)
    }

    pub fn from_file_or_default() -> Self {
        let Some(path) = Self::filepath() else {
            return GlobalConfig::default();
        };
        let toml_str = match File::open(&path).and_then(io::read_to_string) {
            Ok(toml) => toml,
            _ => return GlobalConfig::default(),
        };
        toml::from_str(&toml_str).unwrap_or_else(|e| {
            log::error!(
                "Invalid config '{:?}': {:#}",
                util::replace_homedir_to_tilde(path),
                e
            );
            std::process::exit(1)
        })
    }

    pub fn with_args(mut self, args: &GlobalArgs) -> Self {
        if let Some(d) = &args.cache_dir {
            self.cache_dir = d.clone();
        }
        self
    }

    pub fn from_file_and_args(args: &GlobalArgs) -> Self {
        Self::from_file_or_default().with_args(args)
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        envy::prefixed("CJUDGE_")
            .from_env::<Self>()
            .unwrap_or_else(|e| {
                log::warn!("Ignoring CJUDGE_* environment: {}", e);
                Self::default()
            })
    }
}
