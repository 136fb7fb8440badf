//! # courier-sync
//!
//! Producer/consumer synchronisation for the Courier broker.
//!
//! A [`SyncGate`] counts available items. Producers never block; consumers
//! wait until an item is available, the gate is stopped, or an optional
//! deadline passes. Every attempt is represented by a scoped lock token
//! that holds the gate's mutex until it is confirmed, cancelled, or dropped.
//!
//! ```
//! use courier_sync::SyncGate;
//!
//! let gate = SyncGate::new(0);
//!
//! let producer = gate.producer();
//! assert!(producer.is_ok());
//! producer.confirm().unwrap();
//!
//! let consumer = gate.consumer();
//! assert!(consumer.is_ok());
//! consumer.confirm().unwrap();
//!
//! assert!(gate.empty());
//! ```
//!
//! Timed waits ([`SyncGate::consumer_timeout`], [`SyncGate::consumer_until`])
//! are measured against the real monotonic clock through
//! [`std::time::Instant`], not the injectable `courier_core::traits::Clock`.
//! A condition variable can only sleep on real time, so tests that need a
//! virtual clock belong to the session registry, not the gate.
//!
//! The gate is unbounded: `available()` may grow without limit. A bounded
//! variant would add a capacity and make producer acquisition wait on the
//! same condition consumers use.

pub mod error;
pub mod gate;

pub use error::GateError;
pub use gate::{ConsumerLock, LockStatus, ProducerLock, SyncGate};
