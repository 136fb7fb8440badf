//! Session objects and the handler seam they are bound to.

pub mod handler;
pub mod state;

pub use handler::SessionHandler;
pub use state::Session;
