//! # revu-config
//!
//! Layered configuration loading for revu using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REVU_*` prefix, `__` as separator)
//! 2. Project-level `.revu/config.toml`
//! 3. User-level `~/.config/revu/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `REVU_REVIEW__ASSIGNMENT_DUE_DAYS` -> `review.assignment_due_days`,
//! `REVU_DATABASE__PATH` -> `database.path`, etc.
//!
//! ```no_run
//! use revu_config::RevuConfig;
//!
//! let config = RevuConfig::load_with_dotenv().expect("config");
//! println!("database at {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod review;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use review::ReviewConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RevuConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RevuConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.review.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".revu/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("REVU_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("revu").join("config.toml"))
    }
}
