//! Configuration for chargewatch.
//!
//! Sources in order of precedence (later sources override earlier):
//! - Bundled defaults (include_str! from chargewatch.toml)
//! - User config in home directory (~/.config/chargewatch/chargewatch.toml)
//! - User config in current directory (./chargewatch.toml)
//! - `CHARGEWATCH_*` environment variables, `__` between nested keys
//!
//! An explicit file passed with `--config` replaces both user files.

use chargewatch_core::ModelIdentity;
use chargewatch_error::{ChargewatchError, ChargewatchResult, ConfigError};
use chargewatch_models::ModelSource;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../chargewatch.toml");

/// One model: the identity it is logged under and where its artifact lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct ModelConfig {
    /// Value written to the `model_version` column
    version: String,
    /// Value written to the `model_type` column
    model_type: String,
    /// JSON artifact path
    artifact: PathBuf,
}

impl ModelConfig {
    /// Identity events from this model are logged under.
    pub fn identity(&self) -> ModelIdentity {
        ModelIdentity::new(&self.version, &self.model_type)
    }

    /// Identity plus artifact, as the lazy model loader wants it.
    pub fn source(&self) -> ModelSource {
        ModelSource {
            identity: self.identity(),
            artifact: self.artifact.clone(),
        }
    }
}

/// The baseline and improved model settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct ModelsConfig {
    /// Age/bmi/children model
    baseline: ModelConfig,
    /// All-inputs model
    improved: ModelConfig,
}

/// Top-level chargewatch configuration.
///
/// # Example
///
/// ```no_run
/// use chargewatch::ChargewatchConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ChargewatchConfig::load()?;
/// println!("Logging to {}", config.log_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct ChargewatchConfig {
    /// Shared CSV event log
    log_path: PathBuf,
    /// Recent comments shown by the dashboard and `comments`
    recent_comment_limit: usize,
    /// Dashboard change-check interval
    tick_rate_ms: u64,
    /// Model identities and artifacts
    models: ModelsConfig,
}

impl ChargewatchConfig {
    /// Load configuration with precedence: env > current dir > home dir >
    /// bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> ChargewatchResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/chargewatch/chargewatch.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("chargewatch").required(false));

        Self::finish(builder.add_source(Self::environment()))
    }

    /// Load bundled defaults overridden by one explicit file, then the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ChargewatchResult<Self> {
        debug!("Loading configuration from file");

        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::new(format!(
                "Configuration file {} not found",
                path.display()
            ))
            .into());
        }

        let builder = Self::defaults()
            .add_source(File::from(path))
            .add_source(Self::environment());
        Self::finish(builder)
    }

    /// [`from_file`](Self::from_file) when a path is given, otherwise
    /// [`load`](Self::load).
    pub fn resolve(path: Option<&Path>) -> ChargewatchResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Replace the log path, e.g. from `--log-path`.
    pub fn with_log_path(mut self, log_path: impl Into<PathBuf>) -> Self {
        self.log_path = log_path.into();
        self
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn environment() -> Environment {
        Environment::with_prefix("CHARGEWATCH")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> ChargewatchResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                ChargewatchError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ChargewatchError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        if config.recent_comment_limit == 0 {
            return Err(ConfigError::new("recent_comment_limit must be at least 1").into());
        }
        if config.tick_rate_ms == 0 {
            return Err(ConfigError::new("tick_rate_ms must be at least 1").into());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_parse() {
        let config = ChargewatchConfig::finish(ChargewatchConfig::defaults()).unwrap();
        assert_eq!(config.log_path(), Path::new("monitoring_logs.csv"));
        assert_eq!(*config.recent_comment_limit(), 10);
        assert_eq!(config.models().baseline().identity(), ModelIdentity::baseline());
        assert_eq!(config.models().improved().identity(), ModelIdentity::improved());
        assert_eq!(
            config.models().improved().artifact(),
            Path::new("models/charges_model_v2.json")
        );
    }
}
