//! The timer board: the single in-memory state container.
//!
//! All timers, completed-timer logs, known categories and the set of
//! expanded categories live here. Every mutation goes through a board
//! operation, which returns the [`Event`]s it produced. Persistence is the
//! caller's job (see [`crate::storage::BoardStore`]).
//!
//! Timer ids passed to single-timer operations may be abbreviated to any
//! unique prefix.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::timer::{NewTimer, Tick, Timer, TimerLog, TimerStatus};

pub const DEFAULT_CATEGORIES: [&str; 3] = ["Work", "Personal", "Fitness"];

/// How many categories start expanded after loading.
pub const DEFAULT_EXPANDED_ON_LOAD: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerBoard {
    timers: Vec<Timer>,
    logs: Vec<TimerLog>,
    categories: Vec<String>,
    expanded: Vec<String>,
}

/// Timers of one category, in board order.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub expanded: bool,
    pub timers: Vec<&'a Timer>,
}

impl Default for TimerBoard {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            logs: Vec::new(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            expanded: Vec::new(),
        }
    }
}

impl TimerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole state with loaded data. The first two categories
    /// start expanded.
    pub fn initialize(
        &mut self,
        timers: Vec<Timer>,
        logs: Vec<TimerLog>,
        categories: Vec<String>,
    ) {
        self.initialize_expanding(timers, logs, categories, DEFAULT_EXPANDED_ON_LOAD);
    }

    pub fn initialize_expanding(
        &mut self,
        timers: Vec<Timer>,
        logs: Vec<TimerLog>,
        categories: Vec<String>,
        expand_first: usize,
    ) {
        self.timers = timers.into_iter().filter_map(repair).collect();
        self.logs = logs;
        self.categories = Vec::new();
        for category in categories {
            let category = category.trim();
            if !category.is_empty() && !self.categories.iter().any(|c| c == category) {
                self.categories.push(category.to_string());
            }
        }
        self.expanded = self.categories.iter().take(expand_first).cloned().collect();
        debug!(
            timers = self.timers.len(),
            logs = self.logs.len(),
            categories = self.categories.len(),
            "board initialized"
        );
    }

    /// Restore a saved expansion set. Unknown categories are dropped.
    pub fn restore_expanded(&mut self, expanded: Vec<String>) {
        self.expanded.clear();
        for category in expanded {
            if self.categories.contains(&category) && !self.expanded.contains(&category) {
                self.expanded.push(category);
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn logs(&self) -> &[TimerLog] {
        &self.logs
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn expanded(&self) -> &[String] {
        &self.expanded
    }

    pub fn is_expanded(&self, category: &str) -> bool {
        self.expanded.iter().any(|c| c == category)
    }

    pub fn get(&self, id: &str) -> Result<&Timer> {
        let idx = self.index_of(id)?;
        Ok(&self.timers[idx])
    }

    /// Full id for an exact id or unique prefix.
    pub fn resolve(&self, id: &str) -> Result<String> {
        Ok(self.get(id)?.id.clone())
    }

    /// Ids of running timers; each one is an active tick source.
    pub fn running_ids(&self) -> Vec<String> {
        self.timers
            .iter()
            .filter(|t| t.is_running())
            .map(|t| t.id.clone())
            .collect()
    }

    pub fn has_running(&self) -> bool {
        self.timers.iter().any(Timer::is_running)
    }

    /// Timers grouped by category: known categories in order (including
    /// empty ones), then categories only seen on timers.
    pub fn grouped_by_category(&self) -> Vec<CategoryGroup<'_>> {
        let mut order: Vec<&str> = self.categories.iter().map(String::as_str).collect();
        for timer in &self.timers {
            if !order.contains(&timer.category.as_str()) {
                order.push(&timer.category);
            }
        }
        order
            .into_iter()
            .map(|category| CategoryGroup {
                category,
                expanded: self.is_expanded(category),
                timers: self
                    .timers
                    .iter()
                    .filter(|t| t.category == category)
                    .collect(),
            })
            .collect()
    }

    // ── Single-timer commands ────────────────────────────────────────

    /// Returns the new timer's id with the produced events.
    pub fn add_timer(&mut self, request: NewTimer, now: DateTime<Utc>) -> (String, Vec<Event>) {
        let timer = Timer::new(request, now);
        let id = timer.id.clone();
        let mut events = vec![Event::TimerAdded {
            timer_id: id.clone(),
            name: timer.name.clone(),
            category: timer.category.clone(),
            duration_secs: timer.duration,
            at: now,
        }];

        if !self.categories.contains(&timer.category) {
            self.categories.push(timer.category.clone());
            events.push(Event::CategoryAdded {
                category: timer.category.clone(),
                at: now,
            });
        }
        if !self.is_expanded(&timer.category) {
            self.expanded.push(timer.category.clone());
        }

        debug!(timer_id = %id, name = %timer.name, duration = timer.duration, "timer added");
        self.timers.push(timer);
        (id, events)
    }

    pub fn start_timer(&mut self, id: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let idx = self.index_of(id)?;
        let timer = &mut self.timers[idx];
        let events: Vec<Event> = timer.start(now).into_iter().collect();
        if events.is_empty() {
            debug!(timer_id = %timer.id, status = %timer.status, "start ignored");
        }
        Ok(events)
    }

    /// Counts any elapsed wall-clock time before pausing, so the pause
    /// may instead complete the timer.
    pub fn pause_timer(&mut self, id: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let idx = self.index_of(id)?;
        let timer = &mut self.timers[idx];
        let mut events = Vec::new();
        for tick in timer.catch_up(now) {
            record(tick, timer, &mut self.logs, &mut events, now, false);
        }
        events.extend(timer.pause(now));
        Ok(events)
    }

    pub fn reset_timer(&mut self, id: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let idx = self.index_of(id)?;
        Ok(vec![self.timers[idx].reset(now)])
    }

    /// Delete a timer. Its history logs are kept.
    pub fn remove_timer(&mut self, id: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let idx = self.index_of(id)?;
        let timer = self.timers.remove(idx);
        debug!(timer_id = %timer.id, "timer removed");
        Ok(vec![Event::TimerRemoved {
            timer_id: timer.id,
            at: now,
        }])
    }

    /// Replace the stored timer carrying the same id.
    pub fn update_timer(&mut self, mut timer: Timer, now: DateTime<Utc>) -> Result<Vec<Event>> {
        timer.validate()?;
        let idx = self
            .timers
            .iter()
            .position(|t| t.id == timer.id)
            .ok_or_else(|| CoreError::TimerNotFound(timer.id.clone()))?;

        match (timer.status, timer.last_tick_at) {
            (TimerStatus::Running, None) => timer.last_tick_at = Some(now),
            (TimerStatus::Running, Some(_)) => {}
            _ => timer.last_tick_at = None,
        }
        if !self.categories.contains(&timer.category) {
            self.categories.push(timer.category.clone());
        }
        let timer_id = timer.id.clone();
        self.timers[idx] = timer;
        Ok(vec![Event::TimerUpdated { timer_id, at: now }])
    }

    /// One-second step for a single timer. Non-running timers are left
    /// untouched.
    pub fn tick(&mut self, id: &str, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let idx = self.index_of(id)?;
        let timer = &mut self.timers[idx];
        let mut events = Vec::new();
        let tick = timer.tick(now);
        record(tick, timer, &mut self.logs, &mut events, now, true);
        Ok(events)
    }

    /// One-second step for every running timer.
    pub fn tick_all(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();
        for timer in self.timers.iter_mut().filter(|t| t.is_running()) {
            let tick = timer.tick(now);
            record(tick, timer, &mut self.logs, &mut events, now, true);
        }
        events
    }

    /// Count wall-clock time that passed since each running timer was last
    /// ticked. Only alerts are reported, not the individual seconds.
    pub fn catch_up(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        self.replay(now, false)
    }

    /// Like [`catch_up`](Self::catch_up), but every counted second is also
    /// reported as a `TimerTicked`. Less than a whole second is carried
    /// over to the next call.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        self.replay(now, true)
    }

    pub fn mark_halfway_triggered(&mut self, id: &str) -> Result<()> {
        let idx = self.index_of(id)?;
        self.timers[idx].halfway_alert_triggered = true;
        Ok(())
    }

    // ── Categories ───────────────────────────────────────────────────

    /// Add a category; blank or already-known names are ignored.
    pub fn add_category(&mut self, name: &str, now: DateTime<Utc>) -> Vec<Event> {
        let name = name.trim();
        if name.is_empty() || self.categories.iter().any(|c| c == name) {
            return Vec::new();
        }
        self.categories.push(name.to_string());
        self.expanded.push(name.to_string());
        vec![Event::CategoryAdded {
            category: name.to_string(),
            at: now,
        }]
    }

    pub fn toggle_category_expand(&mut self, name: &str, now: DateTime<Utc>) -> Event {
        let expanded = if let Some(pos) = self.expanded.iter().position(|c| c == name) {
            self.expanded.remove(pos);
            false
        } else {
            self.expanded.push(name.to_string());
            true
        };
        Event::CategoryToggled {
            category: name.to_string(),
            expanded,
            at: now,
        }
    }

    /// Start every non-completed timer in the category.
    pub fn start_all_in_category(&mut self, category: &str, now: DateTime<Utc>) -> Vec<Event> {
        let events: Vec<Event> = self
            .timers
            .iter_mut()
            .filter(|t| t.category == category)
            .filter_map(|t| t.start(now))
            .collect();
        debug!(category, started = events.len(), "start all in category");
        events
    }

    /// Pause every running timer in the category.
    pub fn pause_all_in_category(&mut self, category: &str, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();
        for timer in self
            .timers
            .iter_mut()
            .filter(|t| t.category == category && t.is_running())
        {
            for tick in timer.catch_up(now) {
                record(tick, timer, &mut self.logs, &mut events, now, false);
            }
            events.extend(timer.pause(now));
        }
        debug!(category, "pause all in category");
        events
    }

    /// Reset every timer in the category, completed ones included.
    pub fn reset_all_in_category(&mut self, category: &str, now: DateTime<Utc>) -> Vec<Event> {
        self.timers
            .iter_mut()
            .filter(|t| t.category == category)
            .map(|t| t.reset(now))
            .collect()
    }

    // ── History ──────────────────────────────────────────────────────

    pub fn clear_logs(&mut self) -> usize {
        let n = self.logs.len();
        self.logs.clear();
        n
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn replay(&mut self, now: DateTime<Utc>, emit_counted: bool) -> Vec<Event> {
        let mut events = Vec::new();
        for timer in self.timers.iter_mut().filter(|t| t.is_running()) {
            for tick in timer.catch_up(now) {
                record(tick, timer, &mut self.logs, &mut events, now, emit_counted);
            }
        }
        events
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        if let Some(idx) = self.timers.iter().position(|t| t.id == id) {
            return Ok(idx);
        }
        if id.is_empty() {
            return Err(CoreError::TimerNotFound(id.to_string()));
        }
        let matches: Vec<usize> = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.id.starts_with(id))
            .map(|(i, _)| i)
            .collect();
        match matches.as_slice() {
            [idx] => Ok(*idx),
            [] => Err(CoreError::TimerNotFound(id.to_string())),
            many => Err(CoreError::AmbiguousId {
                prefix: id.to_string(),
                matches: many.len(),
            }),
        }
    }
}

/// Turn a tick into events, appending the history log on completion.
fn record(
    tick: Tick,
    timer: &Timer,
    logs: &mut Vec<TimerLog>,
    events: &mut Vec<Event>,
    now: DateTime<Utc>,
    emit_counted: bool,
) {
    match tick {
        Tick::Skipped => {}
        Tick::Counted { remaining } => {
            if emit_counted {
                events.push(Event::TimerTicked {
                    timer_id: timer.id.clone(),
                    remaining_secs: remaining,
                    at: now,
                });
            }
        }
        Tick::Halfway { remaining } => {
            info!(timer_id = %timer.id, name = %timer.name, remaining, "halfway reached");
            events.push(Event::HalfwayReached {
                timer_id: timer.id.clone(),
                name: timer.name.clone(),
                category: timer.category.clone(),
                remaining_secs: remaining,
                at: now,
            });
        }
        Tick::Completed(log) => {
            info!(timer_id = %timer.id, name = %timer.name, "timer completed");
            logs.push(log.clone());
            events.push(Event::TimerCompleted { log });
        }
    }
}

/// Bring a loaded timer back within its invariants, or drop it.
fn repair(mut timer: Timer) -> Option<Timer> {
    if timer.validate().is_ok() {
        return Some(timer);
    }
    if timer.duration == 0 || timer.name.trim().is_empty() || timer.category.trim().is_empty() {
        warn!(timer_id = %timer.id, "dropping unusable stored timer");
        return None;
    }
    warn!(timer_id = %timer.id, "repairing stored timer");
    timer.remaining_time = timer.remaining_time.min(timer.duration);
    if timer.remaining_time == 0 {
        timer.status = TimerStatus::Completed;
        timer.last_tick_at = None;
    } else if timer.status == TimerStatus::Completed {
        timer.status = TimerStatus::Idle;
    }
    Some(timer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
    }

    fn add(board: &mut TimerBoard, name: &str, secs: u64, category: &str) -> String {
        let req = NewTimer::new(name, secs, category).unwrap();
        board.add_timer(req, t0()).0
    }

    #[test]
    fn default_board_has_default_categories() {
        let board = TimerBoard::new();
        assert_eq!(board.categories(), ["Work", "Personal", "Fitness"]);
        assert!(board.expanded().is_empty());
    }

    #[test]
    fn initialize_expands_first_two_categories() {
        let mut board = TimerBoard::new();
        board.initialize(
            vec![],
            vec![],
            vec!["A".into(), "B".into(), "C".into(), "A".into()],
        );
        assert_eq!(board.categories(), ["A", "B", "C"]);
        assert_eq!(board.expanded(), ["A", "B"]);
    }

    #[test]
    fn initialize_repairs_or_drops_stored_timers() {
        let mut board = TimerBoard::new();
        let good = Timer::new(NewTimer::new("ok", 10, "Work").unwrap(), t0());
        let mut over = good.clone();
        over.id = "over".into();
        over.remaining_time = 99;
        let mut zero = good.clone();
        zero.id = "zero".into();
        zero.duration = 0;
        zero.remaining_time = 0;

        board.initialize(vec![good, over, zero], vec![], vec!["Work".into()]);
        assert_eq!(board.timers().len(), 2);
        assert_eq!(board.get("over").unwrap().remaining_time, 10);
    }

    #[test]
    fn add_timer_registers_and_expands_category() {
        let mut board = TimerBoard::new();
        let (id, events) = board.add_timer(NewTimer::new("Run", 60, "Outdoor").unwrap(), t0());
        assert_eq!(events.len(), 2);
        assert!(matches!(events[1], Event::CategoryAdded { .. }));
        assert!(board.categories().contains(&"Outdoor".to_string()));
        assert!(board.is_expanded("Outdoor"));
        assert_eq!(board.get(&id).unwrap().status, TimerStatus::Idle);
    }

    #[test]
    fn prefix_lookup() {
        let mut board = TimerBoard::new();
        let id = add(&mut board, "Tea", 60, "Personal");
        assert_eq!(board.resolve(&id[..8]).unwrap(), id);
        assert!(matches!(
            board.resolve("no-such"),
            Err(CoreError::TimerNotFound(_))
        ));
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        let mut board = TimerBoard::new();
        let a = Timer::new(NewTimer::new("a", 5, "Work").unwrap(), t0());
        let mut b = a.clone();
        let mut a = a;
        a.id = "abc-1".into();
        b.id = "abc-2".into();
        board.initialize(vec![a, b], vec![], vec!["Work".into()]);
        assert!(matches!(
            board.resolve("abc"),
            Err(CoreError::AmbiguousId { matches: 2, .. })
        ));
        assert_eq!(board.resolve("abc-2").unwrap(), "abc-2");
    }

    #[test]
    fn start_pause_reset_cycle() {
        let mut board = TimerBoard::new();
        let id = add(&mut board, "Tea", 10, "Personal");

        assert_eq!(board.start_timer(&id, t0()).unwrap().len(), 1);
        assert!(board.start_timer(&id, t0()).unwrap().is_empty());

        board.tick(&id, t0() + Duration::seconds(1)).unwrap();
        let events = board.pause_timer(&id, t0() + Duration::seconds(1)).unwrap();
        assert!(matches!(
            events.as_slice(),
            [Event::TimerPaused { remaining_secs: 9, .. }]
        ));

        board.reset_timer(&id, t0()).unwrap();
        let t = board.get(&id).unwrap();
        assert_eq!(t.status, TimerStatus::Idle);
        assert_eq!(t.remaining_time, 10);
    }

    #[test]
    fn pause_flushes_elapsed_wall_time() {
        let mut board = TimerBoard::new();
        let id = add(&mut board, "Tea", 10, "Personal");
        board.start_timer(&id, t0()).unwrap();
        board.pause_timer(&id, t0() + Duration::seconds(4)).unwrap();
        assert_eq!(board.get(&id).unwrap().remaining_time, 6);
    }

    #[test]
    fn pause_after_expiry_completes_instead() {
        let mut board = TimerBoard::new();
        let id = add(&mut board, "Tea", 3, "Personal");
        board.start_timer(&id, t0()).unwrap();
        let events = board.pause_timer(&id, t0() + Duration::seconds(30)).unwrap();
        assert!(matches!(events.as_slice(), [Event::TimerCompleted { .. }]));
        assert_eq!(board.get(&id).unwrap().status, TimerStatus::Completed);
        assert_eq!(board.logs().len(), 1);
    }

    #[test]
    fn completion_appends_exactly_one_log() {
        let mut board = TimerBoard::new();
        let id = add(&mut board, "Plank", 2, "Fitness");
        board.start_timer(&id, t0()).unwrap();
        board.tick_all(t0() + Duration::seconds(1));
        let events = board.tick_all(t0() + Duration::seconds(2));
        assert!(matches!(events.as_slice(), [Event::TimerCompleted { .. }]));
        assert!(board.tick_all(t0() + Duration::seconds(3)).is_empty());

        let log = &board.logs()[0];
        assert_eq!(log.timer_id, id);
        assert_eq!(log.name, "Plank");
        assert_eq!(log.category, "Fitness");
        assert_eq!(log.duration, 2);
        assert_eq!(log.completed_at, t0() + Duration::seconds(2));
        assert_eq!(board.logs().len(), 1);
    }

    #[test]
    fn tick_ignores_non_running() {
        let mut board = TimerBoard::new();
        let id = add(&mut board, "Tea", 10, "Personal");
        assert!(board.tick(&id, t0()).unwrap().is_empty());
        assert_eq!(board.get(&id).unwrap().remaining_time, 10);
    }

    #[test]
    fn halfway_event_fires_once_per_run() {
        let mut board = TimerBoard::new();
        let req = NewTimer::new("Bake", 4, "Personal")
            .unwrap()
            .with_halfway_alert(true);
        let (id, _) = board.add_timer(req, t0());
        board.start_timer(&id, t0()).unwrap();

        let mut halfway = 0;
        for s in 1..=4 {
            halfway += board
                .tick_all(t0() + Duration::seconds(s))
                .iter()
                .filter(|e| matches!(e, Event::HalfwayReached { .. }))
                .count();
        }
        assert_eq!(halfway, 1);

        board.reset_timer(&id, t0()).unwrap();
        assert!(!board.get(&id).unwrap().halfway_alert_triggered);
    }

    #[test]
    fn catch_up_reports_only_alerts() {
        let mut board = TimerBoard::new();
        let req = NewTimer::new("Bake", 10, "Personal")
            .unwrap()
            .with_halfway_alert(true);
        let (id, _) = board.add_timer(req, t0());
        board.start_timer(&id, t0()).unwrap();

        let events = board.catch_up(t0() + Duration::seconds(6));
        assert!(matches!(events.as_slice(), [Event::HalfwayReached { remaining_secs: 5, .. }]));
        assert_eq!(board.get(&id).unwrap().remaining_time, 4);
    }

    #[test]
    fn advance_counts_whole_elapsed_seconds() {
        let mut board = TimerBoard::new();
        let id = add(&mut board, "Steep", 10, "Personal");
        board.start_timer(&id, t0()).unwrap();

        assert!(board.advance(t0() + Duration::milliseconds(400)).is_empty());
        let events = board.advance(t0() + Duration::milliseconds(3_200));
        let remaining: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                Event::TimerTicked { remaining_secs, .. } => Some(*remaining_secs),
                _ => None,
            })
            .collect();
        assert_eq!(remaining, vec![9, 8, 7]);

        // The 200ms remainder is carried into the next call.
        let events = board.advance(t0() + Duration::milliseconds(4_000));
        assert_eq!(events.len(), 1);
        assert_eq!(board.get(&id).unwrap().remaining_time, 6);
    }

    #[test]
    fn remove_keeps_logs() {
        let mut board = TimerBoard::new();
        let id = add(&mut board, "Tea", 1, "Personal");
        board.start_timer(&id, t0()).unwrap();
        board.tick(&id, t0()).unwrap();
        board.remove_timer(&id, t0()).unwrap();
        assert!(board.timers().is_empty());
        assert_eq!(board.logs().len(), 1);
        assert!(board.get(&id).is_err());
    }

    #[test]
    fn update_timer_revalidates() {
        let mut board = TimerBoard::new();
        let id = add(&mut board, "Tea", 10, "Personal");
        let mut t = board.get(&id).unwrap().clone();
        t.name = "Green tea".into();
        board.update_timer(t.clone(), t0()).unwrap();
        assert_eq!(board.get(&id).unwrap().name, "Green tea");

        t.remaining_time = 20;
        assert!(matches!(
            board.update_timer(t, t0()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn mark_halfway_triggered_sets_flag() {
        let mut board = TimerBoard::new();
        let id = add(&mut board, "Tea", 10, "Personal");
        board.mark_halfway_triggered(&id).unwrap();
        assert!(board.get(&id).unwrap().halfway_alert_triggered);
    }

    #[test]
    fn add_category_ignores_duplicates_and_blanks() {
        let mut board = TimerBoard::new();
        assert!(board.add_category("Work", t0()).is_empty());
        assert!(board.add_category("   ", t0()).is_empty());
        assert_eq!(board.add_category(" Study ", t0()).len(), 1);
        assert_eq!(board.categories().last().unwrap(), "Study");
        assert!(board.is_expanded("Study"));
    }

    #[test]
    fn toggle_flips_expansion() {
        let mut board = TimerBoard::new();
        let e = board.toggle_category_expand("Work", t0());
        assert!(matches!(e, Event::CategoryToggled { expanded: true, .. }));
        let e = board.toggle_category_expand("Work", t0());
        assert!(matches!(e, Event::CategoryToggled { expanded: false, .. }));
        assert!(!board.is_expanded("Work"));
    }

    #[test]
    fn bulk_start_skips_completed_and_other_categories() {
        let mut board = TimerBoard::new();
        let done = add(&mut board, "done", 1, "Work");
        let idle = add(&mut board, "idle", 10, "Work");
        let other = add(&mut board, "other", 10, "Personal");
        board.start_timer(&done, t0()).unwrap();
        board.tick(&done, t0()).unwrap();

        let events = board.start_all_in_category("Work", t0());
        assert_eq!(events.len(), 1);
        assert_eq!(board.get(&done).unwrap().status, TimerStatus::Completed);
        assert_eq!(board.get(&idle).unwrap().status, TimerStatus::Running);
        assert_eq!(board.get(&other).unwrap().status, TimerStatus::Idle);
    }

    #[test]
    fn bulk_pause_only_touches_running() {
        let mut board = TimerBoard::new();
        let a = add(&mut board, "a", 10, "Work");
        let b = add(&mut board, "b", 10, "Work");
        board.start_timer(&a, t0()).unwrap();

        let events = board.pause_all_in_category("Work", t0() + Duration::seconds(2));
        assert_eq!(events.len(), 1);
        assert_eq!(board.get(&a).unwrap().status, TimerStatus::Paused);
        assert_eq!(board.get(&a).unwrap().remaining_time, 8);
        assert_eq!(board.get(&b).unwrap().status, TimerStatus::Idle);
    }

    #[test]
    fn bulk_reset_includes_completed() {
        let mut board = TimerBoard::new();
        let a = add(&mut board, "a", 1, "Work");
        board.start_timer(&a, t0()).unwrap();
        board.tick(&a, t0()).unwrap();

        let events = board.reset_all_in_category("Work", t0());
        assert_eq!(events.len(), 1);
        let t = board.get(&a).unwrap();
        assert_eq!(t.status, TimerStatus::Idle);
        assert_eq!(t.remaining_time, 1);
    }

    #[test]
    fn grouping_keeps_category_order_and_strays() {
        let mut board = TimerBoard::new();
        board.initialize(vec![], vec![], vec!["Work".into(), "Personal".into()]);
        add(&mut board, "a", 10, "Personal");
        let mut stray = Timer::new(NewTimer::new("s", 5, "Misc").unwrap(), t0());
        stray.id = "stray".into();
        board.timers.push(stray);

        let groups = board.grouped_by_category();
        let names: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(names, ["Work", "Personal", "Misc"]);
        assert!(groups[0].timers.is_empty());
        assert_eq!(groups[1].timers.len(), 1);
    }

    #[test]
    fn running_ids_tracks_tick_sources() {
        let mut board = TimerBoard::new();
        let a = add(&mut board, "a", 10, "Work");
        add(&mut board, "b", 10, "Work");
        assert!(!board.has_running());
        board.start_timer(&a, t0()).unwrap();
        assert_eq!(board.running_ids(), vec![a.clone()]);
        board.pause_timer(&a, t0()).unwrap();
        assert!(board.running_ids().is_empty());
    }
}
