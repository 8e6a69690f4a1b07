//! Error types shared across the Sieve crates.
//!
//! Filtering itself never fails: unknown tags, disallowed nesting and
//! malformed markup are absorbed by the filter policy. The variants here cover
//! the remaining caller-level failures.

use thiserror::Error;

/// Main error type for registry and configuration operations.
#[derive(Error, Debug)]
pub enum SieveError {
    /// A tag rule was registered under an empty name.
    #[error("tag name must not be empty")]
    EmptyTagName,

    /// A rule definition can never match any markup.
    #[error("invalid rule for <{tag}>: {reason}")]
    InvalidRule {
        /// Tag the rule was declared for.
        tag: String,
        /// What is wrong with it.
        reason: String,
    },

    /// IO error (reading input or rule files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rule file could not be decoded.
    #[error("rule configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias defaulting to [`SieveError`].
pub type Result<T, E = SieveError> = std::result::Result<T, E>;
