//! Layered configuration for the tutor binary.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tutor_core::model::{CompletionPolicy, SettingsError};

const PROJECT_CONFIG: &str = "tutor.toml";
const ENV_PREFIX: &str = "TUTOR_";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),
}

/// Quiz-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Minimum score (0-100) that completes a topic
    pub pass_threshold: u8,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            pass_threshold: CompletionPolicy::DEFAULT_THRESHOLD,
        }
    }
}

/// Content-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// JSON topic catalog replacing the bundled topics
    pub catalog: Option<PathBuf>,
}

/// Logging-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset and no `-v` is given
    pub level: Option<String>,
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub quiz: QuizConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. `TUTOR_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./tutor.toml`
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if an explicit path does not exist
    /// and `ConfigError::Figment` if a source cannot be parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let project = PathBuf::from(PROJECT_CONFIG);
        if project.exists() {
            figment = figment.merge(Toml::file(&project));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|err| ConfigError::Figment(Box::new(err)))
    }

    /// Completion policy for the configured threshold, optionally overridden.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidThreshold` above 100.
    pub fn completion_policy(&self, threshold: Option<u8>) -> Result<CompletionPolicy, SettingsError> {
        CompletionPolicy::new(threshold.unwrap_or(self.quiz.pass_threshold))
    }
}
