//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the upstream credential.
pub const API_KEY_VAR: &str = "API_KEY";

/// Environment variable selecting the listen port.
pub const PORT_VAR: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment variable {var} has invalid value '{value}'")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

impl ConfigError {
    /// True when the only problem is the missing credential.
    pub fn is_missing_api_key(&self) -> bool {
        matches!(self, ConfigError::Validation(errors)
            if errors.as_slice() == [ValidationError::MissingApiKey])
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values taken from the process environment.
///
/// Captured once so loading stays a pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub api_key: Option<String>,
    pub port: Option<String>,
}

impl EnvOverrides {
    /// Read the overrides from the process environment. Call
    /// [`load_dotenv`] first so a `.env` file is taken into account.
    pub fn from_env() -> Self {
        Self::from_pairs([API_KEY_VAR, PORT_VAR].into_iter().filter_map(|name| {
            std::env::var(name).ok().map(|value| (name.to_string(), value))
        }))
    }

    /// Pick the relevant variables out of `(name, value)` pairs. Later
    /// pairs win.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut overrides = Self::default();
        for (name, value) in pairs {
            match name.as_str() {
                API_KEY_VAR => overrides.api_key = Some(value),
                PORT_VAR => overrides.port = Some(value),
                _ => {}
            }
        }
        overrides
    }

    fn apply(&self, config: &mut RelayConfig) -> Result<(), ConfigError> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            config.upstream.api_key = key.clone();
        }
        if let Some(port) = self.port.as_ref().filter(|p| !p.is_empty()) {
            config.listener.port = port.trim().parse().map_err(|_| ConfigError::Env {
                var: PORT_VAR,
                value: port.clone(),
            })?;
        }
        Ok(())
    }
}

/// Load a `.env` file from the working directory or its parents into the
/// process environment. Variables already set are not overwritten.
///
/// Returns the path that was loaded, or `None` when there is no usable file.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate the result.
pub fn load_config(path: Option<&Path>, env: &EnvOverrides) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => RelayConfig::default(),
    };

    env.apply(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
