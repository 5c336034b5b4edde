//! Error types for rs-clearhtml.
//!
//! The cleaning path itself never fails for a well-formed input tree; the
//! variants here cover caller precondition violations, failures raised by
//! caller-supplied callables, and annotation-store I/O.

/// Error type for cleaning and serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input tree violated the acyclic parent/child invariant
    /// (caller precondition, detected by the recursion-depth guard).
    #[error("malformed input tree: {0}")]
    MalformedTree(String),

    /// A caller-supplied callable (text extractor, embed preprocessor)
    /// failed. Propagated unmodified.
    #[error("callback failed: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Annotation store could not be read or written.
    #[error("annotation store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Annotation store contained invalid JSON.
    #[error("annotation store parsing failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an arbitrary callable failure into [`Error::Callback`].
    pub fn callback<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Callback(Box::new(err))
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, Error>;
