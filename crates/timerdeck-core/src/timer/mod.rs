mod format;
mod model;

pub use format::{format_time, time_ago, TimeFormat};
pub use model::{hms_to_secs, parse_duration, NewTimer, Tick, Timer, TimerLog, TimerStatus};
