//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `hexkit.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use hexkit_app::services::ServiceConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    /// Settings handed to both services.
    pub service: ServiceConfig,
    pub demo: DemoConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Scenario settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Tenants registered before the scenario runs; the first one acts.
    pub tenants: Vec<String>,
}

impl Config {
    /// Load configuration from `hexkit.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is unreadable or
    /// malformed, or if the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("hexkit.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HEXKIT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("HEXKIT_APPLICATION_ID") {
            self.service.application_id = Some(val).filter(|id| !id.is_empty());
        }
        if let Some(val) = var("HEXKIT_TENANTS") {
            self.demo.tenants = val
                .split(',')
                .map(str::trim)
                .filter(|tenant| !tenant.is_empty())
                .map(ToString::to_string)
                .collect();
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.demo.tenants.is_empty() {
            return Err(ConfigError::Validation(
                "at least one tenant is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hexkit_demo=info,hexkit_app=debug".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            tenants: vec!["acme".to_string(), "globex".to_string()],
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
