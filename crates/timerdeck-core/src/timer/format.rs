//! Display helpers for durations and timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// `m:ss`, or `h:mm:ss` once there are hours.
    #[default]
    Compact,
    /// Always `hh:mm:ss`.
    Full,
}

impl std::str::FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compact" => Ok(TimeFormat::Compact),
            "full" => Ok(TimeFormat::Full),
            other => Err(format!("unknown time format: {other}")),
        }
    }
}

pub fn format_time(secs: u64, format: TimeFormat) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    match format {
        TimeFormat::Compact if hours > 0 => format!("{hours}:{minutes:02}:{seconds:02}"),
        TimeFormat::Compact => format!("{minutes}:{seconds:02}"),
        TimeFormat::Full => format!("{hours:02}:{minutes:02}:{seconds:02}"),
    }
}

/// Relative age such as "3 hours ago".
///
/// A unit is used only once strictly more than one of it has passed, so
/// exactly one hour still reads as "60 minutes ago".
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const UNITS: [(f64, &str); 5] = [
        (31_536_000.0, "years"),
        (2_592_000.0, "months"),
        (86_400.0, "days"),
        (3_600.0, "hours"),
        (60.0, "minutes"),
    ];

    let seconds = (now - at).num_seconds();
    for (unit, label) in UNITS {
        let interval = seconds as f64 / unit;
        if interval > 1.0 {
            return format!("{} {label} ago", interval.floor() as i64);
        }
    }
    format!("{seconds} seconds ago")
}
