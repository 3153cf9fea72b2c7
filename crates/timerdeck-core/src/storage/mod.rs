mod board_store;
mod config;
pub mod database;
mod memory;

pub use board_store::{BoardStore, CATEGORIES_KEY, EXPANDED_KEY, TIMERS_KEY, TIMER_LOGS_KEY};
pub use config::{AlertsConfig, CategoriesConfig, Config, DisplayConfig, ExportConfig, TickConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// String key-value storage holding the persisted JSON blobs.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Returns the data directory, creating it if needed.
///
/// `TIMERDECK_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/timerdeck`, or `~/.config/timerdeck-dev` with
/// `TIMERDECK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("TIMERDECK_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TIMERDECK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("timerdeck-dev")
            } else {
                base_dir.join("timerdeck")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
