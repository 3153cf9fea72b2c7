use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{TimerLog, TimerStatus};

/// Every board mutation produces zero or more Events.
/// The CLI prints them; the ticker forwards them to its sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerAdded {
        timer_id: String,
        name: String,
        category: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        timer_id: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        timer_id: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        timer_id: String,
        at: DateTime<Utc>,
    },
    TimerRemoved {
        timer_id: String,
        at: DateTime<Utc>,
    },
    TimerUpdated {
        timer_id: String,
        at: DateTime<Utc>,
    },
    TimerTicked {
        timer_id: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Remaining time dropped to half the duration (alert enabled only).
    HalfwayReached {
        timer_id: String,
        name: String,
        category: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Remaining time reached zero; `log` was appended to the history.
    TimerCompleted {
        log: TimerLog,
    },
    CategoryAdded {
        category: String,
        at: DateTime<Utc>,
    },
    CategoryToggled {
        category: String,
        expanded: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        timer_id: String,
        name: String,
        category: String,
        status: TimerStatus,
        remaining_secs: u64,
        duration_secs: u64,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Id of the timer this event concerns, if any.
    pub fn timer_id(&self) -> Option<&str> {
        match self {
            Event::TimerAdded { timer_id, .. }
            | Event::TimerStarted { timer_id, .. }
            | Event::TimerPaused { timer_id, .. }
            | Event::TimerReset { timer_id, .. }
            | Event::TimerRemoved { timer_id, .. }
            | Event::TimerUpdated { timer_id, .. }
            | Event::TimerTicked { timer_id, .. }
            | Event::HalfwayReached { timer_id, .. }
            | Event::StateSnapshot { timer_id, .. } => Some(timer_id),
            Event::TimerCompleted { log } => Some(&log.timer_id),
            Event::CategoryAdded { .. } | Event::CategoryToggled { .. } => None,
        }
    }

    /// Alerts are the events a front end should surface to the user.
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            Event::HalfwayReached { .. } | Event::TimerCompleted { .. }
        )
    }
}
