//! Scoped producer and consumer locks.
//!
//! A lock holds the gate mutex from acquisition until it is dropped.
//! Callers check [`is_ok`](ProducerLock::is_ok) and then either
//! `confirm()` or `cancel()`; both consume the lock. A lock dropped while
//! still ok is treated exactly like `cancel()`.

use std::time::Instant;

use parking_lot::MutexGuard;
use tracing::trace;

use crate::error::GateError;

use super::sync_gate::{GateState, SyncGate};

/// Outcome recorded on a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    /// Acquired; neither confirmed nor cancelled yet.
    Incomplete,
    /// An item was produced or consumed.
    Confirmed,
    /// Nothing was produced or consumed.
    Cancelled,
    /// A timed consumer wait elapsed with no item.
    TimedOut,
}

/// Exclusive access to produce one item.
#[derive(Debug)]
pub struct ProducerLock<'a> {
    gate: &'a SyncGate,
    guard: MutexGuard<'a, GateState>,
    status: LockStatus,
}

impl<'a> ProducerLock<'a> {
    pub(crate) fn acquire(gate: &'a SyncGate) -> Self {
        Self {
            gate,
            guard: gate.state.lock(),
            status: LockStatus::Incomplete,
        }
    }

    /// True if the caller may produce an item now.
    pub fn is_ok(&self) -> bool {
        self.status == LockStatus::Incomplete && !self.guard.stopped
    }

    /// True if the gate was stopped.
    pub fn is_stopped(&self) -> bool {
        self.guard.stopped
    }

    /// Producer locks never time out.
    pub fn is_timed_out(&self) -> bool {
        false
    }

    /// Current status.
    pub fn status(&self) -> LockStatus {
        self.status
    }

    /// Returns the lock if it may be acted on, otherwise the reason it may not.
    pub fn into_ready(self) -> Result<Self, GateError> {
        if self.is_stopped() {
            Err(GateError::Stopped)
        } else {
            Ok(self)
        }
    }

    /// Records one produced item and wakes one waiting consumer.
    pub fn confirm(mut self) -> Result<(), GateError> {
        if !self.is_ok() {
            return Err(GateError::LockProtocol);
        }
        self.guard.items += 1;
        self.status = LockStatus::Confirmed;
        self.gate.available.notify_one();
        trace!(items = self.guard.items, "Item produced");
        Ok(())
    }

    /// Releases the lock without producing anything.
    pub fn cancel(mut self) -> Result<(), GateError> {
        if !self.is_ok() {
            return Err(GateError::LockProtocol);
        }
        self.status = LockStatus::Cancelled;
        Ok(())
    }
}

impl Drop for ProducerLock<'_> {
    fn drop(&mut self) {
        if self.is_ok() {
            trace!("Producer lock dropped without confirm, treating as cancel");
        }
    }
}

/// Exclusive claim on one available item.
#[derive(Debug)]
pub struct ConsumerLock<'a> {
    gate: &'a SyncGate,
    guard: MutexGuard<'a, GateState>,
    status: LockStatus,
}

impl<'a> ConsumerLock<'a> {
    /// Waits for an item, the gate stopping, or `deadline` if given.
    pub(crate) fn acquire(gate: &'a SyncGate, deadline: Option<Instant>) -> Self {
        let mut guard = gate.state.lock();
        let mut status = LockStatus::Incomplete;

        if !guard.stopped {
            guard.waiters += 1;
            while guard.items == 0 && !guard.stopped {
                match deadline {
                    Some(deadline) => {
                        if gate.available.wait_until(&mut guard, deadline).timed_out() {
                            if guard.items == 0 && !guard.stopped {
                                status = LockStatus::TimedOut;
                            }
                            break;
                        }
                    }
                    None => gate.available.wait(&mut guard),
                }
            }
            guard.waiters -= 1;
        }

        Self {
            gate,
            guard,
            status,
        }
    }

    /// True if an item is claimed and the caller may consume it now.
    pub fn is_ok(&self) -> bool {
        self.status == LockStatus::Incomplete && !self.guard.stopped
    }

    /// True if the gate was stopped.
    pub fn is_stopped(&self) -> bool {
        self.guard.stopped
    }

    /// True if the wait elapsed without an item.
    pub fn is_timed_out(&self) -> bool {
        self.status == LockStatus::TimedOut
    }

    /// Current status.
    pub fn status(&self) -> LockStatus {
        self.status
    }

    /// Returns the lock if it may be acted on, otherwise the reason it may not.
    pub fn into_ready(self) -> Result<Self, GateError> {
        if self.is_stopped() {
            Err(GateError::Stopped)
        } else if self.is_timed_out() {
            Err(GateError::TimedOut)
        } else {
            Ok(self)
        }
    }

    /// Removes the claimed item from the gate.
    pub fn confirm(mut self) -> Result<(), GateError> {
        if !self.is_ok() {
            return Err(GateError::LockProtocol);
        }
        self.guard.items -= 1;
        self.status = LockStatus::Confirmed;
        trace!(items = self.guard.items, "Item consumed");
        Ok(())
    }

    /// Leaves the claimed item available for another consumer.
    pub fn cancel(mut self) -> Result<(), GateError> {
        if !self.is_ok() {
            return Err(GateError::LockProtocol);
        }
        self.release_claim();
        self.status = LockStatus::Cancelled;
        Ok(())
    }

    /// Hands an unconsumed item on to a waiting consumer. The wake that
    /// brought this consumer in must not be lost with it.
    fn release_claim(&self) {
        if self.guard.waiters > 0 {
            self.gate.available.notify_one();
        }
    }
}

impl Drop for ConsumerLock<'_> {
    fn drop(&mut self) {
        if self.is_ok() {
            trace!("Consumer lock dropped without confirm, treating as cancel");
            self.release_claim();
        }
    }
}
