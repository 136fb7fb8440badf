//! Session lifecycle events.

use serde::{Deserialize, Serialize};

use crate::types::id::SessionId;

/// Events related to broker sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A new session was opened and is active.
    Opened {
        /// The session ID.
        session_id: SessionId,
        /// Client-supplied session name.
        name: String,
        /// Suspension timeout in seconds.
        timeout_seconds: u32,
    },
    /// An active session was parked in the registry.
    Suspended {
        /// The session ID.
        session_id: SessionId,
    },
    /// A suspended session was handed back to a caller.
    Resumed {
        /// The session ID.
        session_id: SessionId,
    },
    /// A suspended session passed its deadline and was destroyed.
    Expired {
        /// The session ID.
        session_id: SessionId,
    },
}

impl SessionEvent {
    /// The session this event is about.
    pub fn session_id(&self) -> SessionId {
        match self {
            Self::Opened { session_id, .. }
            | Self::Suspended { session_id }
            | Self::Resumed { session_id }
            | Self::Expired { session_id } => *session_id,
        }
    }
}
