//! Environment configuration

use std::path::PathBuf;

use thiserror::Error;

use crate::render::DEFAULT_IMAGE_BASE_URL;

pub const DEFAULT_PORT: u16 = 5055;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },
    #[error("{var} is set but empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Replacement carrier vocabulary; bundled table when unset
    pub carriers_path: Option<PathBuf>,
    pub image_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            carriers_path: None,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; tests pass a closure over a map
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("SPOTTY_PORT") {
            config.port = value.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: "SPOTTY_PORT",
                value,
            })?;
        }

        if let Some(value) = lookup("SPOTTY_CARRIERS_PATH") {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty {
                    var: "SPOTTY_CARRIERS_PATH",
                });
            }
            config.carriers_path = Some(PathBuf::from(value));
        }

        if let Some(value) = lookup("SPOTTY_IMAGE_BASE_URL") {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty {
                    var: "SPOTTY_IMAGE_BASE_URL",
                });
            }
            config.image_base_url = value.trim().to_string();
        }

        Ok(config)
    }
}
