//! Error handling for the application

use thiserror::Error;

/// Price feed errors
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

/// Per-field form validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please select a token to send")]
    MissingFromToken,

    #[error("Please select a token to receive")]
    MissingToToken,

    #[error("Cannot swap {0} for itself")]
    SameToken(String),

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Amount exceeds the maximum of ${0}")]
    AmountOverLimit(String),

    #[error("No conversion available for this pair")]
    NoConversion,
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Feed error: {0}")]
    FeedError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        AppError::FeedError(err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_status_message() {
        assert_eq!(FeedError::Status(503).to_string(), "HTTP error! status: 503");
    }

    #[test]
    fn test_app_error_from_validation() {
        let err: AppError = ValidationError::MissingToToken.into();
        assert_eq!(
            err.to_string(),
            "Validation error: Please select a token to receive"
        );
    }
}
