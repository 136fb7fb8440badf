//! Gate error types.

use thiserror::Error;

use courier_core::error::{AppError, ErrorKind};

/// Reasons a gate lock cannot be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    /// The gate was stopped. Expected during shutdown.
    #[error("gate is stopped")]
    Stopped,
    /// A timed consumer wait elapsed without an item becoming available.
    #[error("timed out waiting for an item")]
    TimedOut,
    /// `confirm` or `cancel` was called on a lock whose `is_ok()` was false.
    #[error("lock is not ok; confirm/cancel not permitted")]
    LockProtocol,
}

impl From<GateError> for AppError {
    fn from(err: GateError) -> Self {
        let kind = match err {
            GateError::Stopped => ErrorKind::Stopped,
            GateError::TimedOut => ErrorKind::Timeout,
            GateError::LockProtocol => ErrorKind::Protocol,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
