//! History export to a shareable JSON file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::Result;
use crate::timer::TimerLog;

/// File name for an export taken at `now`: `timer-history-<epoch_ms>.json`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("timer-history-{}.json", now.timestamp_millis())
}

/// Pretty-printed JSON array of logs, two-space indented.
pub fn logs_to_json(logs: &[TimerLog]) -> Result<String> {
    Ok(serde_json::to_string_pretty(logs)?)
}

/// Write `logs` into `dir` and return the path of the new file.
///
/// # Errors
/// Returns an error if the directory cannot be created or the file cannot
/// be written.
pub fn export_logs(logs: &[TimerLog], dir: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(now));
    std::fs::write(&path, logs_to_json(logs)?)?;
    info!(path = %path.display(), count = logs.len(), "history exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Vec<TimerLog> {
        vec![TimerLog {
            id: "l1".into(),
            timer_id: "t1".into(),
            name: "Stretch".into(),
            category: "Fitness".into(),
            duration: 300,
            completed_at: Utc.with_ymd_and_hms(2026, 2, 1, 7, 30, 0).unwrap(),
        }]
    }

    #[test]
    fn file_name_uses_epoch_millis() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(export_file_name(now), "timer-history-1700000000123.json");
    }

    #[test]
    fn json_is_indented_array() {
        let json = logs_to_json(&sample()).unwrap();
        assert!(json.starts_with("[\n  {"));
        assert!(json.contains("\"timer_id\": \"t1\""));
    }

    #[test]
    fn export_writes_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let path = export_logs(&sample(), &target, Utc::now()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let back: Vec<TimerLog> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn empty_history_exports_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_logs(&[], dir.path(), Utc::now()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
    }
}
