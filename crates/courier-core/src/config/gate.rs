//! Producer/consumer gate configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a `SyncGate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// Number of items available when the gate is created.
    #[serde(default)]
    pub initial_items: usize,
}
