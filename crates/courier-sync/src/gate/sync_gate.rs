//! Unbounded producer/consumer gate.

use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::info;

use courier_core::config::GateConfig;

use super::lock::{ConsumerLock, ProducerLock};

/// Counters guarded by the gate mutex.
#[derive(Debug, Default)]
pub(crate) struct GateState {
    /// Available, unclaimed items.
    pub(crate) items: usize,
    /// Consumers currently blocked waiting for an item.
    pub(crate) waiters: usize,
    /// Set once by `stop()`, never cleared.
    pub(crate) stopped: bool,
}

/// Producer/consumer synchronisation.
///
/// Producers increase the number of available items, consumers reduce it.
/// Consumers wait until an item is available. Waiting threads are woken for
/// shutdown with [`SyncGate::stop`].
///
/// Locks returned by [`producer`](Self::producer) and
/// [`consumer`](Self::consumer) hold the gate's mutex for their whole
/// lifetime. A thread must not call any other gate method while it holds a
/// lock on the same gate.
#[derive(Debug)]
pub struct SyncGate {
    pub(crate) state: Mutex<GateState>,
    pub(crate) available: Condvar,
}

impl SyncGate {
    /// Creates a gate with `initial_items` already available.
    pub fn new(initial_items: usize) -> Self {
        Self {
            state: Mutex::new(GateState {
                items: initial_items,
                ..GateState::default()
            }),
            available: Condvar::new(),
        }
    }

    /// Creates a gate from configuration.
    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.initial_items)
    }

    /// Wakes every thread waiting in a consumer lock and refuses all
    /// future locks.
    ///
    /// Idempotent. After return no thread remains blocked in this gate.
    pub fn stop(&self) {
        let mut state = self.state.lock();
        if !state.stopped {
            state.stopped = true;
            info!(
                items = state.items,
                waiters = state.waiters,
                "Gate stopped"
            );
        }
        self.available.notify_all();
    }

    /// True once [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.state.lock().stopped
    }

    /// Number of items available for consumers.
    pub fn available(&self) -> usize {
        self.state.lock().items
    }

    /// Number of consumers waiting for items.
    pub fn consumers(&self) -> usize {
        self.state.lock().waiters
    }

    /// True if no items are available.
    pub fn empty(&self) -> bool {
        self.state.lock().items == 0
    }

    /// Acquires the gate to produce one item. Never waits for items.
    ///
    /// If the gate is stopped the returned lock reports `is_ok() == false`.
    pub fn producer(&self) -> ProducerLock<'_> {
        ProducerLock::acquire(self)
    }

    /// Waits for an item to consume, or for the gate to stop.
    pub fn consumer(&self) -> ConsumerLock<'_> {
        ConsumerLock::acquire(self, None)
    }

    /// Waits up to `timeout` for an item to consume.
    ///
    /// The timeout runs on the real monotonic clock.
    pub fn consumer_timeout(&self, timeout: Duration) -> ConsumerLock<'_> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.consumer_until(deadline),
            None => self.consumer(),
        }
    }

    /// Waits until `deadline` for an item to consume.
    pub fn consumer_until(&self, deadline: Instant) -> ConsumerLock<'_> {
        ConsumerLock::acquire(self, Some(deadline))
    }
}

impl Default for SyncGate {
    fn default() -> Self {
        Self::new(0)
    }
}
