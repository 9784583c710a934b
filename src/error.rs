//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Only construction can fail. Lookups report a miss as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A duration was zero or otherwise unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The sweeper could not be spawned outside a tokio runtime
    #[error("No tokio runtime available to run the sweeper")]
    NoRuntime,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CacheError::InvalidConfig("ttl must be greater than zero".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: ttl must be greater than zero"
        );
        assert!(CacheError::NoRuntime.to_string().contains("tokio runtime"));
    }
}
