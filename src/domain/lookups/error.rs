//! Errors reported by remote lookups.

use thiserror::Error;

/// Failure of a single remote lookup.
///
/// The orchestration collapses every variant into one "not found" answer;
/// the variants exist so operators can tell the causes apart in logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote service answered with an error status and a structured body.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The remote service answered with an error status and an unreadable body.
    #[error("unknown error, status code: {0}")]
    UnknownStatus(u16),

    /// A success response did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request URL could not be built from the configured base URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

impl LookupError {
    /// HTTP status reported by the remote service, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::UnknownStatus(status) => Some(*status),
            _ => None,
        }
    }
}
