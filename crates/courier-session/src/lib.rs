//! # courier-session
//!
//! Session lifecycle management for the Courier broker. Provides:
//!
//! - [`SessionRegistry`]: open, suspend, resume, and expire sessions under
//!   a single lock, with strict single-owner hand-off of [`Session`] values
//! - [`SessionObserver`] hooks, including a broadcast [`EventObserver`]
//! - [`ExpirySweeper`]: a background task that purges expired suspended
//!   sessions on an interval

pub mod error;
pub mod registry;
pub mod session;

pub use error::SessionError;
pub use registry::manager::SessionRegistry;
pub use registry::observer::{EventObserver, SessionObserver};
pub use registry::sweeper::ExpirySweeper;
pub use session::handler::SessionHandler;
pub use session::state::Session;
