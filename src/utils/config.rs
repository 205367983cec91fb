use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::RecipeError;

pub const DEFAULT_CONFIG_FILE: &str = "recipe-suggest.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,
    #[serde(default = "default_video_timeout_secs")]
    pub video_timeout_secs: u64,
    #[serde(default = "default_retry_on_malformed")]
    pub retry_on_malformed: bool,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "mistral".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_oembed_endpoint() -> String {
    "https://www.youtube.com/oembed".to_string()
}

fn default_video_timeout_secs() -> u64 {
    8
}

fn default_retry_on_malformed() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            request_timeout_secs: default_request_timeout_secs(),
            oembed_endpoint: default_oembed_endpoint(),
            video_timeout_secs: default_video_timeout_secs(),
            retry_on_malformed: default_retry_on_malformed(),
            temperature: None,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Loads `path` when given. Otherwise reads `recipe-suggest.toml` from the
    /// working directory if present, falling back to the defaults.
    pub fn from_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), RecipeError> {
        Url::parse(&self.base_url)
            .map_err(|e| RecipeError::Config(format!("base_url '{}': {}", self.base_url, e)))?;
        Url::parse(&self.oembed_endpoint).map_err(|e| {
            RecipeError::Config(format!("oembed_endpoint '{}': {}", self.oembed_endpoint, e))
        })?;

        if self.request_timeout_secs == 0 || self.video_timeout_secs == 0 {
            return Err(RecipeError::Config(
                "timeouts must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn video_timeout(&self) -> Duration {
        Duration::from_secs(self.video_timeout_secs)
    }
}
