//! # Timerdeck Core Library
//!
//! This library provides the core logic for Timerdeck, a board of named
//! countdown timers grouped by category. The `timerdeck` CLI is a thin
//! layer over the same library.
//!
//! ## Architecture
//!
//! - **Board**: the single state container and its reducer operations
//!   (add, start, pause, reset, tick, bulk category actions)
//! - **Timer**: a wall-clock aware countdown that requires the caller to
//!   tick it; reports halfway and completion
//! - **Storage**: JSON blobs in a SQLite key-value table, TOML configuration
//! - **History**: completed-timer logs, summaries and JSON export
//! - **Ticker**: tokio interval driving every running timer
//!
//! ## Key Components
//!
//! - [`TimerBoard`]: state container
//! - [`BoardStore`]: best-effort persistence of the board
//! - [`Ticker`]: periodic driver
//! - [`Config`]: application configuration management

pub mod board;
pub mod error;
pub mod events;
pub mod export;
pub mod history;
pub mod storage;
pub mod ticker;
pub mod timer;

pub use board::{CategoryGroup, TimerBoard};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use history::{HistoryQuery, HistorySummary};
pub use storage::{BoardStore, Config, Database, KvStore, MemoryStore};
pub use ticker::{EventSink, Ticker, TickerReport};
pub use timer::{NewTimer, TimeFormat, Timer, TimerLog, TimerStatus};
