//! A single broker session.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use tracing::debug;

use courier_core::types::id::SessionId;

use crate::registry::tracker::SessionTracker;

use super::handler::SessionHandler;

/// A stateful broker session.
///
/// A `Session` has exactly one owner at a time: the caller that opened or
/// resumed it, or the registry while it is suspended. Dropping a session
/// the caller owns removes it from the registry's active set.
pub struct Session {
    id: SessionId,
    name: String,
    timeout_seconds: u32,
    ack_interval: u32,
    handler: Option<Arc<dyn SessionHandler>>,
    /// Set only while parked in the registry.
    expires_at: Option<Instant>,
    tracker: Weak<dyn SessionTracker>,
}

impl Session {
    pub(crate) fn new(
        id: SessionId,
        handler: Arc<dyn SessionHandler>,
        timeout_seconds: u32,
        name: String,
        ack_interval: u32,
        tracker: Weak<dyn SessionTracker>,
    ) -> Self {
        Self {
            id,
            name,
            timeout_seconds,
            ack_interval,
            handler: Some(handler),
            expires_at: None,
            tracker,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Client-supplied name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How long the session survives while suspended.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }

    /// Suspension timeout in whole seconds.
    pub fn timeout_seconds(&self) -> u32 {
        self.timeout_seconds
    }

    /// Acknowledgement interval inherited from the registry.
    pub fn ack_interval(&self) -> u32 {
        self.ack_interval
    }

    /// The handler currently bound to this session, if any.
    pub fn handler(&self) -> Option<&Arc<dyn SessionHandler>> {
        self.handler.as_ref()
    }

    /// Deadline after which a suspended session is discarded.
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Binds the session to `handler`, unbinding any previous one.
    ///
    /// The handler given to [`SessionRegistry::open`] is bound without
    /// calling its hooks; only explicit rebinding does.
    ///
    /// [`SessionRegistry::open`]: crate::SessionRegistry::open
    pub fn attach(&mut self, handler: Arc<dyn SessionHandler>) {
        self.detach();
        handler.attached(&self.id);
        self.handler = Some(handler);
    }

    /// Unbinds the current handler and returns it.
    pub fn detach(&mut self) -> Option<Arc<dyn SessionHandler>> {
        let previous = self.handler.take();
        if let Some(handler) = &previous {
            handler.detached(&self.id);
        }
        previous
    }

    pub(crate) fn start_timer(&mut self, now: Instant) {
        self.expires_at = Some(now + self.timeout());
    }

    pub(crate) fn clear_timer(&mut self) {
        self.expires_at = None;
    }

    pub(crate) fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("ack_interval", &self.ack_interval)
            .field("attached", &self.handler.is_some())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(tracker) = self.tracker.upgrade() {
            tracker.erase(&self.id);
        }
        debug!(session_id = %self.id, name = %self.name, "Session destroyed");
    }
}
