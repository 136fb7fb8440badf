//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use courier_core::traits::{ManualClock, UuidGenerator};
use courier_core::types::id::SessionId;
use courier_session::{SessionHandler, SessionRegistry};
use courier_sync::SyncGate;

/// Handler standing in for a connection.
#[derive(Debug)]
pub struct TestHandler {
    /// Label for assertions.
    pub label: &'static str,
}

impl SessionHandler for TestHandler {
    fn attached(&self, session: &SessionId) {
        tracing::trace!(label = self.label, session_id = %session, "attached");
    }
}

/// Creates a handler labelled `label`.
pub fn handler(label: &'static str) -> Arc<dyn SessionHandler> {
    Arc::new(TestHandler { label })
}

/// Registry driven by a manual clock.
pub struct TestRegistry {
    /// The registry under test.
    pub registry: Arc<SessionRegistry>,
    /// Clock controlling session deadlines.
    pub clock: Arc<ManualClock>,
}

impl TestRegistry {
    /// Create a registry with the given ack interval.
    pub fn new(ack: u32) -> Self {
        let clock = Arc::new(ManualClock::new());
        let registry = Arc::new(SessionRegistry::with_parts(
            ack,
            clock.clone(),
            Arc::new(UuidGenerator),
        ));
        Self { registry, clock }
    }

    /// Advance the clock by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.clock.advance(Duration::from_secs(secs));
    }
}

/// Blocks until `n` consumers are waiting on `gate`.
pub fn wait_for_consumers(gate: &SyncGate, n: usize) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while gate.consumers() < n {
        assert!(
            Instant::now() < deadline,
            "expected {n} waiting consumers, saw {}",
            gate.consumers()
        );
        thread::sleep(Duration::from_millis(1));
    }
}
