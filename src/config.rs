use colored::Colorize;
use log::info;
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::commands::input::LineReader;

pub const DEFAULT_API_URL: &str = "https://api.nal.usda.gov/fdc/v1";
const APP_DIR_NAME: &str = ".edesia";
const API_KEY_FILE: &str = "api_key.txt";
const DAILY_LOG_DIR: &str = "daily_logs";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not locate a home directory; pass --data-dir or set EDESIA_HOME")]
    NoHomeDir,
    #[error("API key must not be empty")]
    EmptyApiKey,
    #[error("Setup was cancelled")]
    Cancelled,
    #[error("Config file error: {0}")]
    Io(#[from] io::Error),
}

/// Settings supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
}

impl ConfigOverrides {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("EDESIA_HOME").ok().map(PathBuf::from),
            api_key: env::var("USDA_API_KEY").ok(),
            api_base_url: env::var("USDA_API_URL").ok(),
        }
    }

    /// Fields set in `self` win over those in `other`.
    pub fn or(self, other: ConfigOverrides) -> Self {
        Self {
            data_dir: self.data_dir.or(other.data_dir),
            api_key: self.api_key.or(other.api_key),
            api_base_url: self.api_base_url.or(other.api_base_url),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub api_key: String,
    pub api_base_url: String,
}

impl AppConfig {
    /// Resolves the configuration, running first-time setup when no API key
    /// is stored: the key is requested through `reader` and saved.
    pub fn load(
        overrides: ConfigOverrides,
        reader: &mut dyn LineReader,
    ) -> Result<Self, ConfigError> {
        let data_dir = match overrides.data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let api_key_path = data_dir.join(API_KEY_FILE);

        let api_key = match overrides.api_key {
            Some(key) => key,
            None if api_key_path.exists() => {
                println!("{}", "Loading...".green());
                fs::read_to_string(&api_key_path)?
            }
            None => {
                println!("{}", "Setting up...".green());
                let key = reader
                    .read_line(&format!("Enter an {} key: ", "api.data.gov".blue()))?
                    .ok_or(ConfigError::Cancelled)?;
                let key = key.trim();
                if key.is_empty() {
                    return Err(ConfigError::EmptyApiKey);
                }
                fs::create_dir_all(&data_dir)?;
                fs::write(&api_key_path, key)?;
                info!("Stored API key at {}", api_key_path.display());
                key.to_string()
            }
        };

        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        let config = Self {
            data_dir,
            api_key,
            api_base_url: overrides
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        };
        fs::create_dir_all(config.daily_log_dir())?;
        Ok(config)
    }

    pub fn api_key_path(&self) -> PathBuf {
        self.data_dir.join(API_KEY_FILE)
    }

    pub fn daily_log_dir(&self) -> PathBuf {
        self.data_dir.join(DAILY_LOG_DIR)
    }
}

pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(APP_DIR_NAME))
        .ok_or(ConfigError::NoHomeDir)
}
