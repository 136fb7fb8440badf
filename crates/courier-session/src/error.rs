//! Session registry errors.

use thiserror::Error;

use courier_core::error::{AppError, ErrorKind};
use courier_core::types::id::SessionId;

/// Failures reported by the session registry to its immediate caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No suspended session with this id, or it has expired.
    #[error("session {0} not found or expired")]
    NotFound(SessionId),
    /// The identifier generator returned an id already in use.
    #[error("session id {0} is already registered")]
    Duplicate(SessionId),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        let kind = match err {
            SessionError::NotFound(_) => ErrorKind::NotFound,
            SessionError::Duplicate(_) => ErrorKind::Conflict,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
