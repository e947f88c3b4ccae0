use thiserror::Error;

/// Domain-specific errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Configuration loading or parsing error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Unsupported language requested for an explicit profile lookup
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A pattern in a language profile failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern text
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Reading an external profile failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
