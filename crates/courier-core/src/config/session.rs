//! Session registry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Acknowledgement interval handed to every session at creation.
    #[serde(default)]
    pub ack_interval: u32,
    /// Interval in seconds between background expiry sweeps.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// Whether `resume` sweeps expired sessions before looking one up.
    #[serde(default = "default_true")]
    pub sweep_on_resume: bool,
}

impl SessionConfig {
    /// Sweep interval as a [`Duration`]. Never zero.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ack_interval: 0,
            sweep_interval_seconds: default_sweep_interval(),
            sweep_on_resume: true,
        }
    }
}

fn default_sweep_interval() -> u64 {
    30
}

fn default_true() -> bool {
    true
}
