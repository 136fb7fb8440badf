//! Session identifier generation.

use std::fmt;

use crate::types::id::SessionId;

/// Source of session identifiers.
///
/// Implementations must produce identifiers that are unique for the
/// lifetime of the registry using them. The registry only performs a
/// duplicate check; it does not repair collisions.
pub trait IdGenerator: Send + Sync + fmt::Debug + 'static {
    /// Produce the next identifier.
    fn generate(&self) -> SessionId;
}

/// Random (v4) UUID generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> SessionId {
        SessionId::new()
    }
}
