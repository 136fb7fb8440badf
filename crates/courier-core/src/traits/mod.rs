//! Seams defined in `courier-core` and consumed by the gate and registry.

pub mod clock;
pub mod id_generator;

pub use clock::{Clock, ManualClock, SystemClock};
pub use id_generator::{IdGenerator, UuidGenerator};
