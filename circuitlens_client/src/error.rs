//! Error taxonomy for the client layer.

use thiserror::Error;

/// Errors surfaced by the facade and its backends.
///
/// Provider failures are never retried here and never silently replaced
/// by synthetic data; the caller decides what to do with them.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or non-success status from the text-generation
    /// provider, carrying the provider's message.
    #[error("provider error: {0}")]
    Provider(String),

    /// An operation was invoked before any backend was configured.
    #[error("no backend configured")]
    Uninitialized,

    /// A backend configuration could not be applied (for example a
    /// malformed base URL).
    #[error("invalid backend configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Provider(err.to_string())
    }
}
