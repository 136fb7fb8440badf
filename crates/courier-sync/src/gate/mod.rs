//! The producer/consumer gate and its lock tokens.

pub mod lock;
pub mod sync_gate;

pub use lock::{ConsumerLock, LockStatus, ProducerLock};
pub use sync_gate::SyncGate;
