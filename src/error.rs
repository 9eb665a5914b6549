//! Error types for the supplementary (validating) operations.
//!
//! The core analyzers never fail; only palette audits, color-vision
//! simulation, config parsing and logging setup report errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    #[error("Unknown color vision deficiency: {0}")]
    UnknownDeficiency(String),

    #[error("Failed to parse audit config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;

impl From<AuditError> for napi::Error {
    fn from(err: AuditError) -> Self {
        let status = match err {
            AuditError::Logging(_) => napi::Status::GenericFailure,
            _ => napi::Status::InvalidArg,
        };
        napi::Error::new(status, err.to_string())
    }
}
