//! The only registry operation a session may reach on its own.

use courier_core::types::id::SessionId;

/// Removes a destroyed session from the active set.
pub(crate) trait SessionTracker: Send + Sync {
    /// Forget `id` if it is active. No effect otherwise.
    fn erase(&self, id: &SessionId);
}
