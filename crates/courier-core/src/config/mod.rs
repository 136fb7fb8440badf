//! Broker configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default so an empty source
//! yields a usable configuration.

pub mod gate;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::gate::GateConfig;
pub use self::logging::LoggingConfig;
pub use self::session::SessionConfig;

use crate::result::AppResult;

/// Root broker configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Session registry settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Producer/consumer gate settings.
    #[serde(default)]
    pub gate: GateConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BrokerConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default` with an environment-specific overlay
    /// and environment variables prefixed with `COURIER__`.
    pub fn load(env: &str) -> AppResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("COURIER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    /// Parse configuration from an in-memory TOML document only.
    pub fn from_toml_str(toml: &str) -> AppResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));
        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> AppResult<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }
}
