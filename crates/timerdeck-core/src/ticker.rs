//! Periodic driver for running timers.
//!
//! The board itself has no clock. [`Ticker::run`] owns a tokio interval and,
//! on every period, advances running timers by the whole seconds that
//! elapsed since they were last counted, persisting afterwards and
//! forwarding events to an [`EventSink`]. The period only sets how often
//! the board is polled; a countdown always follows elapsed time. A timer
//! stops being a tick source as soon as it leaves the running state.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::board::TimerBoard;
use crate::events::Event;
use crate::storage::{BoardStore, KvStore};

/// Receives every event the ticker produces.
pub trait EventSink {
    fn emit(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> EventSink for F {
    fn emit(&mut self, event: &Event) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickerReport {
    pub ticks: u64,
    pub halfway: usize,
    pub completed: usize,
}

#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    until_idle: bool,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            until_idle: false,
        }
    }

    /// Stop once no timer is running.
    pub fn until_idle(mut self, enabled: bool) -> Self {
        self.until_idle = enabled;
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Drive `board` until `shutdown` resolves (or, with `until_idle`,
    /// until nothing is running).
    pub async fn run<S, E, F>(
        &self,
        board: &mut TimerBoard,
        store: &BoardStore<S>,
        mut sink: E,
        shutdown: F,
    ) -> TickerReport
    where
        S: KvStore,
        E: EventSink,
        F: Future<Output = ()>,
    {
        let mut report = TickerReport::default();
        if self.until_idle && !board.has_running() {
            return report;
        }

        // Wall time is derived from the runtime clock so that a paused
        // runtime drives the countdown deterministically.
        let origin = Instant::now();
        let origin_at = Utc::now();
        let now = || -> DateTime<Utc> {
            chrono::Duration::from_std(origin.elapsed())
                .map_or(origin_at, |elapsed| origin_at + elapsed)
        };

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; a timer counts only after a
        // full period.
        interval.tick().await;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    debug!("ticker shutdown requested");
                    break;
                }
                _ = interval.tick() => {
                    let running = board.has_running();
                    let events = board.advance(now());
                    report.ticks += 1;
                    for event in &events {
                        match event {
                            Event::HalfwayReached { .. } => report.halfway += 1,
                            Event::TimerCompleted { .. } => report.completed += 1,
                            _ => {}
                        }
                        sink.emit(event);
                    }
                    if running {
                        store.persist(board);
                    }
                    if self.until_idle && !board.has_running() {
                        break;
                    }
                }
            }
        }
        debug!(ticks = report.ticks, completed = report.completed, "ticker stopped");
        report
    }
}
