//! Layered error types
//!
//! [`EngineError`] is the application-layer error. [`EnrichmentError`] is
//! produced by pluggable enrichment services and never leaves the pipeline:
//! it is logged, counted and turned into an absent value.

use glossa_core::DomainError;
use std::time::Duration;
use thiserror::Error;

/// Engine-level errors (Application Layer)
#[derive(Error, Debug)]
pub enum EngineError {
    /// Domain layer error, e.g. an invalid language profile file
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Thread pool could not be created
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    ParallelError(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Failure of one call into an enrichment service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentError {
    /// The service cannot answer right now
    #[error("service '{service}' unavailable")]
    Unavailable {
        /// Service name
        service: String,
    },

    /// The call did not finish in time
    #[error("call timed out after {after:?}")]
    Timeout {
        /// The configured limit
        after: Duration,
    },

    /// The service reported an error
    #[error("service error: {0}")]
    Service(String),

    /// The service panicked
    #[error("service panicked")]
    Panicked,
}

impl EnrichmentError {
    /// Convenience constructor for service-side failures
    pub fn service(message: impl Into<String>) -> Self {
        EnrichmentError::Service(message.into())
    }

    /// Whether this is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, EnrichmentError::Timeout { .. })
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Result of one enrichment call
pub type EnrichmentResult<T> = std::result::Result<Option<T>, EnrichmentError>;
