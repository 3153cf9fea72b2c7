//! Queries over completed-timer logs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerLog;

/// Filter for history listings. Results are newest first.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl HistoryQuery {
    pub fn run<'a>(&self, logs: &'a [TimerLog]) -> Vec<&'a TimerLog> {
        let mut out: Vec<&TimerLog> = logs
            .iter()
            .filter(|log| match &self.category {
                Some(c) => &log.category == c,
                None => true,
            })
            .collect();
        // Stable sort keeps insertion order for equal timestamps, then reverse
        // so later completions come first.
        out.sort_by_key(|log| log.completed_at);
        out.reverse();
        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub count: u64,
    pub total_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total_count: u64,
    pub total_secs: u64,
    pub today_count: u64,
    pub by_category: BTreeMap<String, CategoryTotals>,
}

/// Totals per category plus the number of completions on `now`'s UTC day.
pub fn summarize(logs: &[TimerLog], now: DateTime<Utc>) -> HistorySummary {
    let today = now.date_naive();
    let mut summary = HistorySummary::default();
    for log in logs {
        summary.total_count += 1;
        summary.total_secs += log.duration;
        if log.completed_at.date_naive() == today {
            summary.today_count += 1;
        }
        let entry = summary.by_category.entry(log.category.clone()).or_default();
        entry.count += 1;
        entry.total_secs += log.duration;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn log(name: &str, category: &str, duration: u64, at: DateTime<Utc>) -> TimerLog {
        TimerLog {
            id: format!("log-{name}"),
            timer_id: format!("timer-{name}"),
            name: name.into(),
            category: category.into(),
            duration,
            completed_at: at,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap()
    }

    fn sample() -> Vec<TimerLog> {
        vec![
            log("a", "Work", 60, now() - Duration::days(1)),
            log("b", "Fitness", 30, now() - Duration::hours(2)),
            log("c", "Work", 120, now() - Duration::hours(1)),
        ]
    }

    #[test]
    fn newest_first() {
        let logs = sample();
        let names: Vec<&str> = HistoryQuery::default()
            .run(&logs)
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, ["c", "b", "a"]);
    }

    #[test]
    fn filter_and_limit() {
        let logs = sample();
        let query = HistoryQuery {
            category: Some("Work".into()),
            limit: Some(1),
        };
        let out = query.run(&logs);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "c");
    }

    #[test]
    fn summary_totals() {
        let s = summarize(&sample(), now());
        assert_eq!(s.total_count, 3);
        assert_eq!(s.total_secs, 210);
        assert_eq!(s.today_count, 2);
        assert_eq!(
            s.by_category["Work"],
            CategoryTotals {
                count: 2,
                total_secs: 180
            }
        );
    }

    #[test]
    fn empty_history() {
        assert_eq!(summarize(&[], now()), HistorySummary::default());
        assert!(HistoryQuery::default().run(&[]).is_empty());
    }
}
