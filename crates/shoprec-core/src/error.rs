//! Error types for shoprec.

use thiserror::Error;

/// Result type alias using shoprec's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for shoprec operations.
///
/// Classifier failures are recoverable by design: callers convert them
/// into degraded results (keyword-only detection) rather than surfacing
/// them. `InvalidInput` reaches API clients as a 400; the merchant
/// management endpoints surface `MerchantNotFound` as a 404.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Merchant not registered
    #[error("Merchant not registered: {0}")]
    MerchantNotFound(String),

    /// Category classification failed
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("merchant_id is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: merchant_id is required");
    }

    #[test]
    fn test_error_display_merchant_not_found() {
        let err = Error::MerchantNotFound("store.example.com".to_string());
        assert_eq!(err.to_string(), "Merchant not registered: store.example.com");
    }

    #[test]
    fn test_error_display_classifier() {
        let err = Error::Classifier("model not trained".to_string());
        assert_eq!(err.to_string(), "Classifier error: model not trained");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io_err.into();
        assert!(err.to_string().starts_with("I/O error:"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
