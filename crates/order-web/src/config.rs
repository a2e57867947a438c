//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use order_core::IntakeProfile;

/// Order intake server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// WhatsApp recipient for order hand-off links (digits, E.164 without `+`).
    pub whatsapp_number: String,
    /// Active intake profile.
    pub profile: &'static IntakeProfile,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ORDER_WEB_ADDR` | Server bind address | `127.0.0.1:8787` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:orders.db?mode=rwc` |
    /// | `WHATSAPP_NUMBER` | Hand-off recipient | (required) |
    /// | `INTAKE_PROFILE` | `relaxed` or `strict` | `relaxed` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("ORDER_WEB_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8787".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url =
            env::var("SQLITE_PATH").unwrap_or_else(|_| "sqlite:orders.db?mode=rwc".to_string());

        let whatsapp_number =
            env::var("WHATSAPP_NUMBER").map_err(|_| ConfigError::MissingWhatsAppNumber)?;

        let profile_name = env::var("INTAKE_PROFILE").unwrap_or_else(|_| "relaxed".to_string());
        let profile = IntakeProfile::by_name(&profile_name)
            .map_err(|e| ConfigError::InvalidProfile(e.to_string()))?;

        Ok(Self {
            addr,
            database_url,
            whatsapp_number,
            profile,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ORDER_WEB_ADDR format")]
    InvalidAddr,

    #[error("WHATSAPP_NUMBER environment variable is required")]
    MissingWhatsAppNumber,

    #[error("Invalid INTAKE_PROFILE: {0}")]
    InvalidProfile(String),
}
