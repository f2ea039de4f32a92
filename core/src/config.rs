use std::path::{Path, PathBuf};
use std::result::Result as StdResult;

use anyhow::Context as _;
use judge_webclient::Url;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::storage::util as fsutil;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub backend: BackendConfig,
    pub run: RunConfig,
    pub submit: SubmissionConfig,

    #[serde(default, rename = "language")]
    pub languages: Vec<LanguageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendConfig {
    pub base_url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    pub default_language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionConfig {
    pub run_test: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageEntry {
    pub extension: String,
    pub name: String,
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "judge.toml";

    pub fn example_toml() -> String {
        match Asset::get(Self::FILENAME) {
            Some(file) => String::from_utf8_lossy(file.data.as_ref()).into_owned(),
            None => String::new(),
        }
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let cur_dir = cur_dir.as_ref();
        cur_dir
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
            .with_context(|| format!("Cannot find '{}' in any parent dir", Self::FILENAME))
    }

    pub fn from_file_finding_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_filepath = Config::find_file_in_ancestors(cur_dir)?;
        Self::from_toml_file(config_filepath)
    }

    /// Write the example config into `dir`, refusing to overwrite.
    pub fn init_with_example(dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let filepath = dir.as_ref().join(Self::FILENAME);
        anyhow::ensure!(
            !filepath.exists(),
            "Already exists: {}",
            filepath.to_string_lossy()
        );
        fsutil::write_with_mkdir(&filepath, Self::example_toml())?;
        Ok(filepath)
    }

    /// Backend language id for a source file, falling back to `run.default_language`.
    pub fn language_for_filename(&self, filename: impl AsRef<str>) -> &str {
        let ext = Path::new(filename.as_ref())
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        self.languages
            .iter()
            .find(|entry| entry.extension.eq_ignore_ascii_case(ext))
            .map(|entry| entry.name.as_str())
            .unwrap_or(&self.run.default_language)
    }
}
