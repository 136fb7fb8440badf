//! Content handler seam.

use std::fmt;

use courier_core::types::id::SessionId;

/// The connection-side object that delivers a session's content.
///
/// The registry stores handlers but never drives them. The hooks run only
/// from [`Session::attach`] and [`Session::detach`], on the caller's thread
/// and outside the registry lock.
///
/// [`Session::attach`]: crate::Session::attach
/// [`Session::detach`]: crate::Session::detach
pub trait SessionHandler: Send + Sync + fmt::Debug {
    /// The session was bound to this handler.
    fn attached(&self, _session: &SessionId) {}

    /// The session was unbound from this handler.
    fn detached(&self, _session: &SessionId) {}
}
