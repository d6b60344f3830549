use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::infrastructure::logging::{parse_log_level, LogFormat};

/// Project config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "ikigai.yaml";

/// Local overrides, usually git-ignored.
pub const LOCAL_CONFIG_FILE: &str = ".ikigai/local.yaml";

/// Environment variables consulted, in order, when no credential is configured.
pub const API_KEY_ENV_FALLBACKS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("analysis.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("analysis.model cannot be empty")]
    EmptyModel,

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid temperature: {0}. Must be between 0.0 and 2.0")]
    InvalidTemperature(f32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration relative to the working directory.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `ikigai.yaml`
    /// 3. `.ikigai/local.yaml`
    /// 4. `explicit` file (`--config`)
    /// 5. Environment variables (`IKIGAI_*`, nested with `__`)
    ///
    /// A credential still missing afterwards is taken from `GEMINI_API_KEY`
    /// or `API_KEY`.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        Self::load_from(Path::new("."), explicit)
    }

    /// [`ConfigLoader::load`] with project files resolved under `base_dir`.
    pub fn load_from(base_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
        }

        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_dir.join(PROJECT_CONFIG_FILE)))
            .merge(Yaml::file(base_dir.join(LOCAL_CONFIG_FILE)));
        if let Some(path) = explicit {
            figment = figment.merge(Yaml::file(path));
        }

        let mut config: Config = figment
            .merge(Env::prefixed("IKIGAI_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::apply_api_key_fallback(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file only (plus defaults).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn apply_api_key_fallback(config: &mut Config) {
        if config.analysis.has_api_key() {
            return;
        }
        if let Some((name, key)) = API_KEY_ENV_FALLBACKS
            .iter()
            .filter_map(|name| std::env::var(name).ok().map(|v| (*name, v)))
            .find(|(_, v)| !v.trim().is_empty())
        {
            tracing::debug!(source = name, "using API key from environment");
            config.analysis.api_key = Some(key);
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let analysis = &config.analysis;
        if analysis.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if analysis.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if analysis.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(analysis.timeout_secs));
        }
        if let Some(t) = analysis.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::InvalidTemperature(t));
            }
        }

        if parse_log_level(&config.logging.level).is_err() {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }
        if config.logging.format.parse::<LogFormat>().is_err() {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
