use thiserror::Error;

/// Runtime infrastructure errors.
///
/// Covers configuration building and logging setup; capability probe
/// failures are a view-level concern and carry their own error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A setting failed validation or the logging system could not start.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required capability bridge was neither injected nor covered by a
    /// platform default.
    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    /// Invariant violation inside the runtime itself.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
