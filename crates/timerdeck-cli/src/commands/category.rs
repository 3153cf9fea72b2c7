use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;

use crate::session::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories with timer counts
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add a category
    Add { name: String },
    /// Expand or collapse a category in listings
    Toggle { name: String },
    /// Start every non-completed timer in the category
    StartAll { name: String },
    /// Pause every running timer in the category
    PauseAll { name: String },
    /// Reset every timer in the category
    ResetAll { name: String },
}

#[derive(Serialize)]
struct CategoryRow<'a> {
    name: &'a str,
    expanded: bool,
    timers: usize,
    running: usize,
}

pub fn run(action: CategoryAction) -> CmdResult {
    let mut session = Session::open()?;
    let now = Utc::now();

    match action {
        CategoryAction::List { json } => {
            let rows: Vec<CategoryRow<'_>> = session
                .board
                .grouped_by_category()
                .into_iter()
                .map(|g| CategoryRow {
                    name: g.category,
                    expanded: g.expanded,
                    timers: g.timers.len(),
                    running: g.timers.iter().filter(|t| t.is_running()).count(),
                })
                .collect();
            if json {
                print_json(&rows)?;
            } else {
                for row in &rows {
                    let marker = if row.expanded { "v" } else { ">" };
                    println!(
                        "{marker} {:<16} {} timers, {} running",
                        row.name, row.timers, row.running
                    );
                }
            }
            session.save();
        }
        CategoryAction::Add { name } => {
            let events = session.board.add_category(&name, now);
            if events.is_empty() {
                eprintln!("category '{}' already exists or is blank", name.trim());
            }
            session.commit(&events)?;
        }
        CategoryAction::Toggle { name } => {
            let event = session.board.toggle_category_expand(&name, now);
            session.commit(&[event])?;
        }
        CategoryAction::StartAll { name } => {
            let events = session.board.start_all_in_category(&name, now);
            session.commit(&events)?;
        }
        CategoryAction::PauseAll { name } => {
            let events = session.board.pause_all_in_category(&name, now);
            session.commit(&events)?;
        }
        CategoryAction::ResetAll { name } => {
            let events = session.board.reset_all_in_category(&name, now);
            session.commit(&events)?;
        }
    }
    Ok(())
}
