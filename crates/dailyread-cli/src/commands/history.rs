//! Reading-history commands.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;

use super::{open_engine, parse_tags, resolve_today};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Add an article to reading history
    Add {
        /// Article ID
        id: String,
        /// Display title
        #[arg(long)]
        title: Option<String>,
        /// Display URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Mark an article as read
    Read {
        /// Article ID
        id: String,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// The day the article was intended for (YYYY-MM-DD)
        #[arg(long)]
        routine_day: NaiveDate,
        /// The day the article was originally due, if read late (YYYY-MM-DD)
        #[arg(long)]
        original_day: Option<NaiveDate>,
    },
    /// Clear a read mark (requires DAILYREAD_ENV=dev)
    Unread {
        /// Article ID
        id: String,
    },
    /// Show one progress record
    Show {
        /// Article ID
        id: String,
        /// Check against this day instead of today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// List all progress records
    List,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine()?;

    match action {
        HistoryAction::Add { id, title, url } => {
            engine.add_to_history(&id, title, url)?;
            println!("Added '{id}' to history");
        }
        HistoryAction::Read {
            id,
            tags,
            routine_day,
            original_day,
        } => {
            let tags = parse_tags(tags);
            engine.mark_read(&id, &tags, routine_day, original_day, Utc::now())?;
            match engine.get_progress(&id) {
                Some(record) if record.is_read => {
                    println!("{}", serde_json::to_string_pretty(record)?)
                }
                _ => println!("No unread history entry for '{id}'; nothing recorded"),
            }
        }
        HistoryAction::Unread { id } => {
            engine.mark_unread(&id)?;
            println!("Cleared read mark on '{id}'");
        }
        HistoryAction::Show { id, today } => match engine.get_progress(&id) {
            Some(record) => {
                let today = resolve_today(today)?;
                let mut value = serde_json::to_value(record)?;
                value["read_today"] = engine.is_read_today(&id, today).into();
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            None => println!("No history entry for '{id}'"),
        },
        HistoryAction::List => {
            println!("{}", serde_json::to_string_pretty(engine.history())?);
        }
    }
    Ok(())
}
