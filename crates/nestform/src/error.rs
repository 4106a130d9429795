use thiserror::Error;

use crate::error_map::ErrorMap;

/// Errors returned by [`Form`](crate::Form) operations.
///
/// Validation failures are never returned here; they land in the error map.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormError {
    #[error("no {0} configured for this form")]
    TransportUnavailable(&'static str),
    #[error("invalid form configuration: {0}")]
    Config(String),
}

/// Failure reported by an [`HttpClient`](crate::HttpClient).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransportError {
    /// The server rejected the submission with per-field messages.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(ErrorMap),
    /// The request never produced a usable response.
    #[error("network failure: {0}")]
    Network(String),
}
