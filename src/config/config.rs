use crate::dedup::DEFAULT_REPORT_PATH;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    /// Pairs processed between progress spinner updates.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

fn default_progress_interval() -> u64 {
    100_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
            progress_interval: default_progress_interval(),
        }
    }
}

impl Config {
    fn path() -> Option<PathBuf> {
        ProjectDirs::from("org", "hbs", "hbs-tools")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::path() {
            if config_path.exists() {
                match fs::read_to_string(&config_path)
                    .map_err(anyhow::Error::from)
                    .and_then(|content| Self::from_toml_str(&content))
                {
                    Ok(config) => return config,
                    Err(e) => log::warn!(
                        "Ignoring unreadable config {}: {}",
                        config_path.display(),
                        e
                    ),
                }
            }
        }
        Config::default()
    }
}
