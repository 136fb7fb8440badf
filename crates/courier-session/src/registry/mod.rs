//! Session registry: bookkeeping, observers, and expiry sweeping.

pub mod manager;
pub mod observer;
pub mod sweeper;
pub(crate) mod tracker;

pub use manager::SessionRegistry;
pub use observer::{EventObserver, SessionObserver};
pub use sweeper::ExpirySweeper;
