//! Courier Server, the broker core host process.
//!
//! Wires configuration, logging, the delivery gate, and the session
//! registry together and runs until interrupted.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing_subscriber::{EnvFilter, fmt};

use courier_core::config::BrokerConfig;
use courier_core::result::AppResult;
use courier_session::{EventObserver, ExpirySweeper, SessionRegistry};
use courier_sync::SyncGate;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> AppResult<BrokerConfig> {
    let env = std::env::var("COURIER_ENV").unwrap_or_else(|_| "development".to_string());
    BrokerConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &BrokerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: BrokerConfig) -> AppResult<()> {
    tracing::info!("Starting Courier v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Delivery gate ────────────────────────────────────
    let gate = Arc::new(SyncGate::from_config(&config.gate));
    tracing::info!(
        initial_items = config.gate.initial_items,
        "Delivery gate ready"
    );

    // ── Step 2: Session registry + event log ─────────────────────
    let registry = Arc::new(SessionRegistry::from_config(&config.session));
    let events = EventObserver::new(256);
    let mut event_rx = events.subscribe();
    registry.add(Arc::new(events));

    let event_log = tokio::spawn(async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => {
                    tracing::debug!(
                        event_id = %event.id,
                        session_id = %event.payload.session_id(),
                        "{:?}",
                        event.payload
                    );
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Session event log lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // ── Step 3: Expiry sweeper ───────────────────────────────────
    let sweeper = ExpirySweeper::from_config(Arc::clone(&registry), &config.session);
    tracing::info!(
        ack_interval = config.session.ack_interval,
        sweep_interval_seconds = config.session.sweep_interval_seconds,
        "Session registry ready"
    );

    // ── Step 4: Wait for shutdown ────────────────────────────────
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    gate.stop();
    sweeper.shutdown().await?;
    drop(registry);
    event_log.abort();

    tracing::info!("Courier stopped");
    Ok(())
}
