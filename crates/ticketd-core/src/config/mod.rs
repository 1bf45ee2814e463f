//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod database;
pub mod lock;
pub mod logging;
pub mod reservation;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::lock::{LockConfig, LockProviderKind, RedisLockConfig};
pub use self::logging::LoggingConfig;
pub use self::reservation::ReservationConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay) and
/// `TICKETD__`-prefixed environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Seat lock backend settings.
    #[serde(default)]
    pub lock: LockConfig,
    /// Reservation behaviour.
    #[serde(default)]
    pub reservation: ReservationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// `path` is the base file (without extension is fine); `env` selects
    /// the optional `config/<env>` overlay. Variables such as
    /// `TICKETD__RESERVATION__SEAT_HOLD_TTL_SECONDS=60` override both.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("TICKETD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        Self::from_config(config)
    }

    /// Deserialize and validate an already-built [`config::Config`].
    pub fn from_config(config: config::Config) -> Result<Self, AppError> {
        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject values the reservation flow cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.reservation.seat_hold_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "reservation.seat_hold_ttl_seconds must be greater than zero",
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::configuration(
                "database.min_connections must not exceed database.max_connections",
            ));
        }
        Ok(())
    }
}
