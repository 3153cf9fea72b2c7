//! Timer and timer-log data model.
//!
//! A [`Timer`] counts down from `duration` to zero in one-second ticks.
//! It does not own a thread or interval: the board (or the ticker driving
//! it) calls [`Timer::tick`] once per second, and [`Timer::catch_up`]
//! replays whole seconds of wall-clock time that passed while nobody was
//! ticking.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |
//!            v
//!        Completed -> (reset) -> Idle
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

impl TimerStatus {
    /// Human-facing label. An idle timer reads as "Ready".
    pub fn label(self) -> &'static str {
        match self {
            TimerStatus::Idle => "Ready",
            TimerStatus::Running => "Running",
            TimerStatus::Paused => "Paused",
            TimerStatus::Completed => "Completed",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request to create a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimer {
    name: String,
    duration: u64,
    category: String,
    has_halfway_alert: bool,
}

impl NewTimer {
    /// Trims `name` and `category`; both must be non-empty and the
    /// duration must be at least one second.
    pub fn new(
        name: impl AsRef<str>,
        duration_secs: u64,
        category: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        let category = category.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::Empty("name"));
        }
        if category.is_empty() {
            return Err(ValidationError::Empty("category"));
        }
        if duration_secs == 0 {
            return Err(ValidationError::ZeroDuration);
        }
        Ok(Self {
            name: name.to_string(),
            duration: duration_secs,
            category: category.to_string(),
            has_halfway_alert: false,
        })
    }

    pub fn with_halfway_alert(mut self, enabled: bool) -> Self {
        self.has_halfway_alert = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn has_halfway_alert(&self) -> bool {
        self.has_halfway_alert
    }
}

/// Result of a single one-second step.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// Timer was not running; nothing changed.
    Skipped,
    /// One second elapsed.
    Counted { remaining: u64 },
    /// One second elapsed and the halfway alert fired.
    Halfway { remaining: u64 },
    /// Remaining time reached zero.
    Completed(TimerLog),
}

/// A user-defined countdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Total duration in seconds.
    pub duration: u64,
    /// Remaining time in seconds, always within `[0, duration]`.
    pub remaining_time: u64,
    pub status: TimerStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub has_halfway_alert: bool,
    #[serde(default)]
    pub halfway_alert_triggered: bool,
    /// Wall-clock instant up to which time has been counted.
    /// Only set while running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_tick_at: Option<DateTime<Utc>>,
}

impl Timer {
    pub fn new(request: NewTimer, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            category: request.category,
            duration: request.duration,
            remaining_time: request.duration,
            status: TimerStatus::Idle,
            created_at: now,
            has_halfway_alert: request.has_halfway_alert,
            halfway_alert_triggered: false,
            last_tick_at: None,
        }
    }

    /// Check the remaining-time and status invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty("name"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::Empty("category"));
        }
        if self.duration == 0 {
            return Err(ValidationError::ZeroDuration);
        }
        if self.remaining_time > self.duration {
            return Err(ValidationError::RemainingOutOfRange {
                remaining: self.remaining_time,
                duration: self.duration,
            });
        }
        let completed = self.status == TimerStatus::Completed;
        if completed != (self.remaining_time == 0) {
            return Err(ValidationError::InconsistentStatus {
                status: self.status.to_string(),
                remaining: self.remaining_time,
            });
        }
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// 0.0 .. 100.0 elapsed share of the duration.
    pub fn progress_pct(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        let elapsed = self.duration.saturating_sub(self.remaining_time) as f64;
        (elapsed / self.duration as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn status_text(&self) -> &'static str {
        self.status.label()
    }

    /// True when the halfway alert should fire now.
    pub fn halfway_due(&self) -> bool {
        self.has_halfway_alert
            && self.is_running()
            && !self.halfway_alert_triggered
            && (self.remaining_time as f64) <= self.duration as f64 / 2.0
    }

    /// Whole seconds of wall-clock time not yet counted.
    pub fn pending_secs(&self, now: DateTime<Utc>) -> u64 {
        match (self.status, self.last_tick_at) {
            (TimerStatus::Running, Some(last)) => {
                (now - last).num_seconds().max(0) as u64
            }
            _ => 0,
        }
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            timer_id: self.id.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            status: self.status,
            remaining_secs: self.remaining_time,
            duration_secs: self.duration,
            progress_pct: self.progress_pct(),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idle or paused -> running. Completed timers must be reset first.
    pub fn start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.status {
            TimerStatus::Idle | TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                self.last_tick_at = Some(now);
                Some(Event::TimerStarted {
                    timer_id: self.id.clone(),
                    remaining_secs: self.remaining_time,
                    at: now,
                })
            }
            TimerStatus::Running | TimerStatus::Completed => None,
        }
    }

    /// Running -> paused. The caller flushes elapsed time first.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.status != TimerStatus::Running {
            return None;
        }
        self.status = TimerStatus::Paused;
        self.last_tick_at = None;
        Some(Event::TimerPaused {
            timer_id: self.id.clone(),
            remaining_secs: self.remaining_time,
            at: now,
        })
    }

    pub fn reset(&mut self, now: DateTime<Utc>) -> Event {
        self.status = TimerStatus::Idle;
        self.remaining_time = self.duration;
        self.halfway_alert_triggered = false;
        self.last_tick_at = None;
        Event::TimerReset {
            timer_id: self.id.clone(),
            at: now,
        }
    }

    /// Count one second at `now`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Tick {
        let tick = self.step(now);
        if self.is_running() {
            self.last_tick_at = Some(now);
        }
        tick
    }

    /// Replay every whole second between the last counted instant and
    /// `now`. Stops early if the timer completes.
    pub fn catch_up(&mut self, now: DateTime<Utc>) -> Vec<Tick> {
        let Some(last) = self.last_tick_at else {
            return Vec::new();
        };
        let pending = self.pending_secs(now);
        let mut ticks = Vec::new();
        for n in 1..=pending {
            let at = last + Duration::seconds(n as i64);
            let tick = self.step(at);
            let done = matches!(tick, Tick::Completed(_));
            ticks.push(tick);
            if done {
                return ticks;
            }
        }
        if self.is_running() {
            self.last_tick_at = Some(last + Duration::seconds(pending as i64));
        }
        ticks
    }

    fn step(&mut self, at: DateTime<Utc>) -> Tick {
        if self.status != TimerStatus::Running || self.remaining_time == 0 {
            return Tick::Skipped;
        }
        self.remaining_time -= 1;
        if self.remaining_time == 0 {
            self.status = TimerStatus::Completed;
            self.last_tick_at = None;
            return Tick::Completed(TimerLog::from_timer(self, at));
        }
        if self.halfway_due() {
            self.halfway_alert_triggered = true;
            return Tick::Halfway {
                remaining: self.remaining_time,
            };
        }
        Tick::Counted {
            remaining: self.remaining_time,
        }
    }
}

/// Immutable record of a completed timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerLog {
    pub id: String,
    pub timer_id: String,
    pub name: String,
    pub category: String,
    pub duration: u64,
    pub completed_at: DateTime<Utc>,
}

impl TimerLog {
    pub fn from_timer(timer: &Timer, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timer_id: timer.id.clone(),
            name: timer.name.clone(),
            category: timer.category.clone(),
            duration: timer.duration,
            completed_at,
        }
    }
}

/// Parse a duration like `90`, `90s`, `25m`, `1h30m`, `25:00` or `1:30:00`
/// into seconds.
pub fn parse_duration(input: &str) -> Result<u64, ValidationError> {
    let s = input.trim();
    let bad = || ValidationError::BadDuration(input.to_string());
    if s.is_empty() {
        return Err(bad());
    }

    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() > 3 {
            return Err(bad());
        }
        let mut total = 0u64;
        for part in parts {
            let n: u64 = part.parse().map_err(|_| bad())?;
            total = total
                .checked_mul(60)
                .and_then(|t| t.checked_add(n))
                .ok_or_else(bad)?;
        }
        return Ok(total);
    }

    if let Ok(n) = s.parse::<u64>() {
        return Ok(n);
    }

    let mut total = 0u64;
    let mut digits = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit = match c.to_ascii_lowercase() {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(bad()),
        };
        let n: u64 = digits.parse().map_err(|_| bad())?;
        total = n
            .checked_mul(unit)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(bad)?;
        digits.clear();
    }
    if !digits.is_empty() {
        return Err(bad());
    }
    Ok(total)
}

/// Sum an hours/minutes/seconds form entry.
pub fn hms_to_secs(hours: u64, minutes: u64, seconds: u64) -> Result<u64, ValidationError> {
    hours
        .checked_mul(3600)
        .zip(minutes.checked_mul(60))
        .and_then(|(h, m)| h.checked_add(m))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| ValidationError::BadDuration(format!("{hours}h{minutes}m{seconds}s")))
}
