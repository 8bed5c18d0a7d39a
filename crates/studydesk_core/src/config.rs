//! Runtime configuration and process bootstrap.
//!
//! # Responsibility
//! - Describe where logs and the durable store live.
//! - Start logging and open a migrated store connection in one call.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::logging::{default_log_level, init_logging};
use rusqlite::Connection;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Settings supplied by the embedding application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute log directory. `None` leaves logging to the host.
    pub log_dir: Option<PathBuf>,
    /// SQLite file for the key-value store. `None` keeps data in memory.
    pub db_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            db_path: None,
        }
    }
}

#[derive(Debug)]
pub enum BootstrapError {
    Logging(String),
    Db(DbError),
}

impl Display for BootstrapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BootstrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for BootstrapError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Initializes logging (when a directory is set) and opens the store
/// connection; wrap the result in `SqliteStore::new`.
pub fn bootstrap(config: &CoreConfig) -> Result<Connection, BootstrapError> {
    if let Some(dir) = &config.log_dir {
        let dir = dir.to_string_lossy();
        init_logging(&config.log_level, &dir).map_err(BootstrapError::Logging)?;
    }

    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::{bootstrap, CoreConfig};
    use crate::db::migrations::latest_version;

    #[test]
    fn default_config_keeps_everything_in_memory() {
        let config = CoreConfig::default();
        assert!(config.log_dir.is_none());
        assert!(config.db_path.is_none());

        let conn = bootstrap(&config).unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, latest_version());
    }

    #[test]
    fn partial_json_config_falls_back_to_defaults() {
        let config: CoreConfig = serde_json::from_str(r#"{"db_path":"/tmp/studydesk.db"}"#).unwrap();
        assert_eq!(config.log_level, CoreConfig::default().log_level);
        assert_eq!(
            config.db_path.as_deref(),
            Some(std::path::Path::new("/tmp/studydesk.db"))
        );
    }
}
