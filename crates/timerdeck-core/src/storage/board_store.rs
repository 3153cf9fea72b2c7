//! Persistence of the board as three JSON blobs.
//!
//! Timers, logs and categories are stored under separate keys and written
//! on every mutation; the last write wins. The expanded-category set is
//! kept under a fourth key so it survives between processes. Read failures
//! fall back to defaults and write failures are logged, never surfaced,
//! unless the caller asks for [`BoardStore::try_persist`].

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::KvStore;
use crate::board::{TimerBoard, DEFAULT_CATEGORIES, DEFAULT_EXPANDED_ON_LOAD};
use crate::error::Result;

pub const TIMERS_KEY: &str = "timers";
pub const TIMER_LOGS_KEY: &str = "timer_logs";
pub const CATEGORIES_KEY: &str = "categories";
pub const EXPANDED_KEY: &str = "expanded_categories";

pub struct BoardStore<S> {
    store: S,
    default_categories: Vec<String>,
    expand_first: usize,
}

impl<S: KvStore> BoardStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            default_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            expand_first: DEFAULT_EXPANDED_ON_LOAD,
        }
    }

    /// Categories used when none are stored yet.
    pub fn with_default_categories(mut self, categories: Vec<String>) -> Self {
        self.default_categories = categories;
        self
    }

    pub fn with_expanded_on_load(mut self, n: usize) -> Self {
        self.expand_first = n;
        self
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Load the board. Never fails: each blob that is missing, unreadable
    /// or malformed is replaced by its default.
    pub fn load(&self) -> TimerBoard {
        let timers = self.read(TIMERS_KEY).unwrap_or_default();
        let logs = self.read(TIMER_LOGS_KEY).unwrap_or_default();
        let categories = self
            .read(CATEGORIES_KEY)
            .unwrap_or_else(|| self.default_categories.clone());

        let mut board = TimerBoard::new();
        board.initialize_expanding(timers, logs, categories, self.expand_first);
        if let Some(expanded) = self.read(EXPANDED_KEY) {
            board.restore_expanded(expanded);
        }
        board
    }

    /// Best-effort save of every blob.
    pub fn persist(&self, board: &TimerBoard) {
        if let Err(e) = self.try_persist(board) {
            warn!(error = %e, "failed to persist board");
        }
    }

    pub fn try_persist(&self, board: &TimerBoard) -> Result<()> {
        self.store
            .set(TIMERS_KEY, &serde_json::to_string(board.timers())?)?;
        self.store
            .set(TIMER_LOGS_KEY, &serde_json::to_string(board.logs())?)?;
        self.store
            .set(CATEGORIES_KEY, &serde_json::to_string(board.categories())?)?;
        self.store
            .set(EXPANDED_KEY, &serde_json::to_string(board.expanded())?)?;
        debug!(timers = board.timers().len(), logs = board.logs().len(), "board persisted");
        Ok(())
    }

    /// Remove every persisted blob.
    pub fn clear_all(&self) -> Result<()> {
        for key in [TIMERS_KEY, TIMER_LOGS_KEY, CATEGORIES_KEY, EXPANDED_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key, error = %e, "stored value is malformed, using default");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored value, using default");
                None
            }
        }
    }
}
