//! # Environment Settings
//!
//! Maps environment variables to a [`DbConfig`]. Read once by each binary
//! at startup; nothing here caches globals.
//!
//! ## Variables
//! - `DATABASE_PATH` - full path to the SQLite file (wins when set)
//! - `DB_NAME`       - file stem, stored as `<DB_NAME>.db` in the working
//!   directory (retained from the original deployment; its companion
//!   host/port/credential variables have no embedded-engine equivalent)

use std::env;
use std::path::PathBuf;

use crate::pool::DbConfig;

/// Default database file when no variable is set.
pub const DEFAULT_DB_NAME: &str = "libreria";

/// Database settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub database_path: PathBuf,
}

impl DbSettings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        let database_path = env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let name = env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string());
                PathBuf::from(format!("{name}.db"))
            });

        DbSettings { database_path }
    }

    /// Builds a pool configuration from these settings.
    pub fn to_db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
    }
}
