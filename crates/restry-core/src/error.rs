//! Errors surfaced by an awaited request.

use crate::response::ClassifiedResponse;
use crate::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The final attempt ended in a non-success classification
    /// (unhandled error, validation error, or unauthenticated).
    #[error("{} {} failed with HTTP {}", .0.config().method, .0.config().url, .0.status_code())]
    Rejected(Box<ClassifiedResponse>),
    /// The transport could not produce a response at all.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl RestError {
    /// The classified response, when the server answered.
    pub fn response(&self) -> Option<&ClassifiedResponse> {
        match self {
            RestError::Rejected(r) => Some(r),
            RestError::Transport(_) => None,
        }
    }
}
