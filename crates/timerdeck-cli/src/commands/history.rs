use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use timerdeck_core::export::export_logs;
use timerdeck_core::history::summarize;
use timerdeck_core::timer::{format_time, time_ago};
use timerdeck_core::HistoryQuery;

use crate::session::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List completed timers, newest first
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Totals per category
    Summary,
    /// Delete every history entry
    Clear,
    /// Write the history to timer-history-<ms>.json
    Export {
        /// Target directory (defaults to the configured export dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

pub fn run(action: HistoryAction) -> CmdResult {
    let mut session = Session::open()?;
    let now = Utc::now();

    match action {
        HistoryAction::List {
            category,
            limit,
            json,
        } => {
            let query = HistoryQuery { category, limit };
            let logs = query.run(session.board.logs());
            if json {
                print_json(&logs)?;
            } else if logs.is_empty() {
                println!("no completed timers");
            } else {
                let format = session.config.display.time_format;
                for log in logs {
                    println!(
                        "{:<20} {:<12} {:>9}  {}",
                        log.name,
                        log.category,
                        format_time(log.duration, format),
                        time_ago(log.completed_at, now)
                    );
                }
            }
        }
        HistoryAction::Summary => {
            print_json(&summarize(session.board.logs(), now))?;
        }
        HistoryAction::Clear => {
            let removed = session.board.clear_logs();
            session.save();
            println!("removed {removed} entries");
        }
        HistoryAction::Export { dir } => {
            let dir = dir
                .or_else(|| session.config.export_dir())
                .ok_or("no export directory available")?;
            let path = export_logs(session.board.logs(), &dir, now)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
