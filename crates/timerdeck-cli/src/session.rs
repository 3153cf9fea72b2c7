//! Per-invocation board session shared by all commands.

use std::error::Error;

use chrono::Utc;
use serde::Serialize;
use timerdeck_core::timer::format_time;
use timerdeck_core::{BoardStore, Config, Database, Event, TimerBoard};
use tracing::debug;

pub type CmdResult = Result<(), Box<dyn Error>>;

/// Loaded config, store and board. Loading counts the wall-clock time that
/// passed since the previous invocation.
pub struct Session {
    pub config: Config,
    pub store: BoardStore<Database>,
    pub board: TimerBoard,
}

impl Session {
    pub fn open() -> Result<Self, Box<dyn Error>> {
        let config = Config::load_or_default();
        let store = BoardStore::new(Database::open()?)
            .with_default_categories(config.categories.defaults.clone())
            .with_expanded_on_load(config.categories.expanded_on_load);
        let mut board = store.load();

        let alerts = board.catch_up(Utc::now());
        debug!(
            timers = board.timers().len(),
            running = board.running_ids().len(),
            alerts = alerts.len(),
            "session opened"
        );
        for event in &alerts {
            notify(event, &config);
        }
        if !alerts.is_empty() {
            store.persist(&board);
        }

        Ok(Self {
            config,
            store,
            board,
        })
    }

    pub fn save(&self) {
        self.store.persist(&self.board);
    }

    /// Persist, print events as JSON and surface alerts on stderr.
    pub fn commit(&self, events: &[Event]) -> CmdResult {
        self.save();
        for event in events {
            debug!(timer_id = event.timer_id().unwrap_or("-"), "event committed");
            notify(event, &self.config);
        }
        print_json(&events)
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One-line description of an alert event.
pub fn describe_alert(event: &Event, config: &Config) -> Option<String> {
    match event {
        Event::HalfwayReached {
            name,
            category,
            remaining_secs,
            ..
        } => Some(format!(
            "halfway: {name} ({category}), {} left",
            format_time(*remaining_secs, config.display.time_format)
        )),
        Event::TimerCompleted { log } => Some(format!(
            "completed: {} ({}) after {}",
            log.name,
            log.category,
            format_time(log.duration, config.display.time_format)
        )),
        _ => None,
    }
}

fn notify(event: &Event, config: &Config) {
    if !event.is_alert() {
        return;
    }
    if let Some(line) = describe_alert(event, config) {
        eprintln!("{line}");
    }
}
