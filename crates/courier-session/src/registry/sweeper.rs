//! Background expiry sweep for suspended sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use courier_core::config::SessionConfig;
use courier_core::error::AppError;
use courier_core::result::AppResult;

use super::manager::SessionRegistry;

/// Shortest period the sweeper will tick at.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Periodically calls [`SessionRegistry::erase_expired`] on a tokio task.
#[derive(Debug)]
pub struct ExpirySweeper {
    /// Flipped to `true` to stop the task.
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ExpirySweeper {
    /// Spawns a sweeper that runs every `interval`, raised to at least one
    /// millisecond.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(registry: Arc<SessionRegistry>, interval: Duration) -> Self {
        let interval = interval.max(MIN_SWEEP_INTERVAL);
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            info!(interval_ms = interval.as_millis() as u64, "Session expiry sweeper started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = registry.erase_expired();
                        if removed > 0 {
                            debug!(removed, "Expiry sweep removed sessions");
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Session expiry sweeper stopped");
        });

        Self { shutdown, handle }
    }

    /// Spawns a sweeper using the configured interval.
    pub fn from_config(registry: Arc<SessionRegistry>, config: &SessionConfig) -> Self {
        Self::spawn(registry, config.sweep_interval())
    }

    /// Stops the sweeper and waits for its task to finish.
    pub async fn shutdown(self) -> AppResult<()> {
        let _ = self.shutdown.send(true);
        self.handle
            .await
            .map_err(|e| AppError::internal(format!("Expiry sweeper task failed: {e}")))
    }
}
