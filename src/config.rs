use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::application::DEFAULT_CART_KEY;
use crate::infrastructure::is_valid_slot_key;
use crate::view::toast::DEFAULT_TOAST_DELAY;

pub const DEFAULT_STORAGE_DIR: &str = ".neat_cart";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    Invalid { var: &'static str, value: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("CART_STORAGE_KEY may only contain ASCII letters, digits, '_', '-' and '.' and must not start with '.', got '{0}'")]
    InvalidKey(String),
}

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub cart_key: String,
    pub toast_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            toast_delay: DEFAULT_TOAST_DELAY,
        }
    }
}

impl Config {
    /// Load `.env` if present, then read `CART_STORAGE_DIR`,
    /// `CART_STORAGE_KEY` and `TOAST_DELAY_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup("CART_STORAGE_DIR") {
            if dir.trim().is_empty() {
                return Err(ConfigError::Empty("CART_STORAGE_DIR"));
            }
            config.storage_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup("CART_STORAGE_KEY") {
            if key.trim().is_empty() {
                return Err(ConfigError::Empty("CART_STORAGE_KEY"));
            }
            if !is_valid_slot_key(&key) {
                return Err(ConfigError::InvalidKey(key));
            }
            config.cart_key = key;
        }
        if let Some(raw) = lookup("TOAST_DELAY_MS") {
            let ms: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "TOAST_DELAY_MS",
                value: raw.clone(),
            })?;
            config.toast_delay = Duration::from_millis(ms);
        }
        Ok(config)
    }
}
