use std::time::Duration;

use chrono::Utc;
use clap::Subcommand;
use timerdeck_core::timer::{format_time, hms_to_secs, parse_duration, TimeFormat};
use timerdeck_core::{Event, NewTimer, Ticker, Timer};

use crate::session::{describe_alert, print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Create a timer
    Add {
        /// Display name
        name: String,
        /// Duration such as 90, 90s, 25m, 1h30m or 25:00
        #[arg(long, short)]
        duration: Option<String>,
        /// Hours (summed with --minutes and --seconds)
        #[arg(long, default_value = "0")]
        hours: u64,
        #[arg(long, default_value = "0")]
        minutes: u64,
        #[arg(long, default_value = "0")]
        seconds: u64,
        /// Category label (defaults to the first known category)
        #[arg(long, short)]
        category: Option<String>,
        /// Alert when half of the time has elapsed
        #[arg(long)]
        halfway_alert: bool,
        /// Start the timer right away
        #[arg(long)]
        start: bool,
    },
    /// List timers grouped by category
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print one timer's state as JSON
    Show { id: String },
    /// Start or resume a timer
    Start { id: String },
    /// Pause a running timer
    Pause { id: String },
    /// Reset a timer to its full duration
    Reset { id: String },
    /// Delete a timer (history is kept)
    Remove { id: String },
    /// Mark the halfway alert as already delivered
    AckHalfway { id: String },
    /// Count down running timers in the foreground until Ctrl-C
    Watch {
        /// Exit once no timer is running
        #[arg(long)]
        until_idle: bool,
    },
}

pub fn run(action: TimerAction) -> CmdResult {
    let mut session = Session::open()?;
    let now = Utc::now();

    match action {
        TimerAction::Add {
            name,
            duration,
            hours,
            minutes,
            seconds,
            category,
            halfway_alert,
            start,
        } => {
            let secs = match duration {
                Some(d) => parse_duration(&d)?,
                None => hms_to_secs(hours, minutes, seconds)?,
            };
            let category = category
                .or_else(|| session.board.categories().first().cloned())
                .unwrap_or_default();
            let halfway = halfway_alert || session.config.alerts.halfway_by_default;
            let request = NewTimer::new(&name, secs, &category)?.with_halfway_alert(halfway);

            let (id, mut events) = session.board.add_timer(request, now);
            if start {
                events.extend(session.board.start_timer(&id, now)?);
            }
            session.commit(&events)?;
        }
        TimerAction::List { category, json } => {
            if json {
                let timers: Vec<&Timer> = session
                    .board
                    .timers()
                    .iter()
                    .filter(|t| category.as_ref().map_or(true, |c| &t.category == c))
                    .collect();
                print_json(&timers)?;
            } else {
                print_board(&session, category.as_deref());
            }
            session.save();
        }
        TimerAction::Show { id } => {
            let timer = session.board.get(&id)?;
            print_json(&timer.snapshot(now))?;
            session.save();
        }
        TimerAction::Start { id } => {
            let events = session.board.start_timer(&id, now)?;
            session.commit(&events)?;
        }
        TimerAction::Pause { id } => {
            let events = session.board.pause_timer(&id, now)?;
            session.commit(&events)?;
        }
        TimerAction::Reset { id } => {
            let events = session.board.reset_timer(&id, now)?;
            session.commit(&events)?;
        }
        TimerAction::Remove { id } => {
            let events = session.board.remove_timer(&id, now)?;
            session.commit(&events)?;
        }
        TimerAction::AckHalfway { id } => {
            session.board.mark_halfway_triggered(&id)?;
            session.save();
            print_json(&session.board.get(&id)?.snapshot(now))?;
        }
        TimerAction::Watch { until_idle } => watch(&mut session, until_idle)?,
    }
    Ok(())
}

fn watch(session: &mut Session, until_idle: bool) -> CmdResult {
    let period = Duration::from_millis(session.config.tick.interval_ms);
    let ticker = Ticker::new(period).until_idle(until_idle);
    let format = session.config.display.time_format;
    let config = session.config.clone();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(async {
        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
        };
        let sink = |event: &Event| match event {
            Event::TimerTicked {
                timer_id,
                remaining_secs,
                ..
            } => {
                println!(
                    "{}  {}",
                    short_id(timer_id),
                    format_time(*remaining_secs, format)
                );
            }
            other if other.is_alert() => {
                if let Some(line) = describe_alert(other, &config) {
                    println!("{line}");
                }
            }
            _ => {}
        };
        ticker
            .run(&mut session.board, &session.store, sink, shutdown)
            .await
    });

    session.save();
    eprintln!(
        "stopped after {} ticks ({} completed, {} halfway alerts)",
        report.ticks, report.completed, report.halfway
    );
    Ok(())
}

fn print_board(session: &Session, only: Option<&str>) {
    let format = session.config.display.time_format;
    for group in session.board.grouped_by_category() {
        if only.is_some_and(|c| c != group.category) {
            continue;
        }
        let marker = if group.expanded { "v" } else { ">" };
        println!("{marker} {} ({})", group.category, group.timers.len());
        // A filter always shows the timers, even for a collapsed category.
        if !group.expanded && only.is_none() {
            continue;
        }
        for timer in group.timers {
            println!("  {}", timer_line(timer, format));
        }
    }
}

fn timer_line(timer: &Timer, format: TimeFormat) -> String {
    let alert = if timer.has_halfway_alert { " [halfway]" } else { "" };
    format!(
        "{}  {:<20} {:<9} {} / {}  {:>3.0}%{alert}",
        short_id(&timer.id),
        timer.name,
        timer.status_text(),
        format_time(timer.remaining_time, format),
        format_time(timer.duration, format),
        timer.progress_pct(),
    )
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
