//! Error types for Vigil
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Collaborator failures (the state store under verification, the history
//! persistence) are carried through unchanged in `Storage`; the verification
//! core never interprets or retries them.

use thiserror::Error;

/// Result type alias for Vigil operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the verification engine
#[derive(Debug, Error)]
pub enum Error {
    /// Failure raised by the state store or history persistence under test
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No verifier registered under the given id
    #[error("Unknown verifier: {0}")]
    UnknownVerifier(String),

    /// Configuration value out of range or unparseable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid operation or state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl Error {
    /// Shorthand for a storage (collaborator) failure
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Shorthand for an invalid-configuration failure
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_storage() {
        let err = Error::storage("backend unavailable");
        let msg = err.to_string();
        assert!(msg.contains("Storage error"));
        assert!(msg.contains("backend unavailable"));
    }

    #[test]
    fn test_error_display_serialization() {
        let err = Error::Serialization("invalid format".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Serialization error"));
        assert!(msg.contains("invalid format"));
    }

    #[test]
    fn test_error_display_unknown_verifier() {
        let err = Error::UnknownVerifier("map".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Unknown verifier"));
        assert!(msg.contains("map"));
    }

    #[test]
    fn test_error_display_invalid_config() {
        let err = Error::invalid_config("ttl_millis must be > 0");
        let msg = err.to_string();
        assert!(msg.contains("Invalid configuration"));
        assert!(msg.contains("ttl_millis"));
    }

    #[test]
    fn test_error_from_bincode() {
        // Deserializing a truncated buffer produces a bincode error
        let invalid: &[u8] = &[0xFF];
        let result: Result<String> = bincode::deserialize(invalid).map_err(|e| e.into());
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        fn returns_error() -> Result<i32> {
            Err(Error::InvalidOperation("test".to_string()))
        }

        assert_eq!(returns_result().unwrap(), 42);
        assert!(returns_error().is_err());
    }
}
