//! Error types for complexity analysis.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
///
/// Analysis failures are never retried and never yield partial results;
/// unresolved dependencies and empty Halstead bags are not errors (they
/// produce zeros).
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed a shape check before analysis started.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Maintainability index requested for an average cyclomatic
    /// complexity of zero.
    #[error("maintainability index is undefined for zero cyclomatic complexity")]
    ZeroCyclomatic,

    /// A module's analysis failed; the path identifies the module.
    #[error("{path}: {source}")]
    Module {
        /// Path of the failing module.
        path: String,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
}
