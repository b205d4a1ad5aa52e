//! Error types for article-gravity.
//!
//! Extraction itself never fails; errors only come from building a custom
//! [`Configuration`](crate::Configuration).

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pattern category could not be compiled.
    #[error("invalid {category} pattern: {source}")]
    InvalidPattern {
        /// Name of the configuration field holding the pattern.
        category: &'static str,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// Configuration overrides could not be deserialized.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;
