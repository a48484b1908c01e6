use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Base name of the optional config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "task-tracker";

pub const ENV_PREFIX: &str = "TASK_TRACKER";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("unknown log level '{0}'")]
    LogLevel(String),
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default = "default_status")]
    pub default_status: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            default_status: default_status(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Loads settings from the config file and `TASK_TRACKER_*` environment variables.
    ///
    /// An explicit `config_file` must exist; otherwise `task-tracker.{toml,json,yaml}`
    /// in the working directory is used when present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(CONFIG_FILE_NAME).required(false),
        };
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn log_level(&self) -> Result<tracing::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("tasks.json")
}

fn default_status() -> String {
    crate::task::DEFAULT_STATUS.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}
