//! Session lifecycle observers.

use tokio::sync::broadcast;
use tracing::trace;

use courier_core::events::{DomainEvent, SessionEvent};
use courier_core::types::id::SessionId;

use crate::session::state::Session;

/// Observer notified of registry events.
///
/// Every hook runs while the registry lock is held. Implementations must
/// not block and must not call back into the registry.
pub trait SessionObserver: Send + Sync {
    /// A session was opened and is already in the active set.
    fn opened(&self, _session: &Session) {}

    /// A session was parked in the registry.
    fn suspended(&self, _session: &Session) {}

    /// A suspended session was handed back to a caller.
    fn resumed(&self, _session: &Session) {}

    /// A suspended session expired and is about to be destroyed.
    fn expired(&self, _session_id: &SessionId) {}
}

/// Forwards lifecycle events to a broadcast channel.
#[derive(Debug, Clone)]
pub struct EventObserver {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventObserver {
    /// Creates an observer with its own channel of `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Creates an observer publishing into an existing channel.
    pub fn with_sender(sender: broadcast::Sender<DomainEvent>) -> Self {
        Self { sender }
    }

    /// Subscribes to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    fn publish(&self, event: SessionEvent) {
        // No receivers is not an error.
        if self.sender.send(DomainEvent::new(event)).is_err() {
            trace!("Session event dropped, no subscribers");
        }
    }
}

impl SessionObserver for EventObserver {
    fn opened(&self, session: &Session) {
        self.publish(SessionEvent::Opened {
            session_id: session.id(),
            name: session.name().to_string(),
            timeout_seconds: session.timeout_seconds(),
        });
    }

    fn suspended(&self, session: &Session) {
        self.publish(SessionEvent::Suspended {
            session_id: session.id(),
        });
    }

    fn resumed(&self, session: &Session) {
        self.publish(SessionEvent::Resumed {
            session_id: session.id(),
        });
    }

    fn expired(&self, session_id: &SessionId) {
        self.publish(SessionEvent::Expired {
            session_id: *session_id,
        });
    }
}
