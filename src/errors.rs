use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Storage(msg) => AppError::Storage(msg),
            DomainError::Serialization(msg) => AppError::Serialization(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_display() {
        assert_eq!(
            AppError::Storage("disk full".to_string()).to_string(),
            "Storage failure: disk full"
        );
    }

    #[test]
    fn domain_storage_maps_to_app_storage() {
        let app_err: AppError = DomainError::Storage("oops".to_string()).into();
        assert!(matches!(app_err, AppError::Storage(_)));
    }

    #[test]
    fn domain_serialization_keeps_its_kind() {
        let app_err: AppError = DomainError::Serialization("bad".to_string()).into();
        assert!(matches!(&app_err, AppError::Serialization(msg) if msg == "bad"));
        assert_eq!(app_err.to_string(), "Serialization error: bad");
    }

    #[test]
    fn config_error_is_transparent() {
        let app_err: AppError = ConfigError::Invalid {
            var: "TOAST_DELAY_MS",
            value: "soon".to_string(),
        }
        .into();
        assert_eq!(
            app_err.to_string(),
            "TOAST_DELAY_MS must be a non-negative integer, got 'soon'"
        );
    }
}
