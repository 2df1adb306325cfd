//! Delayed-article backlog commands.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use dailyread_core::Article;

use super::{open_engine, parse_tags};

#[derive(Subcommand)]
pub enum BacklogAction {
    /// Postpone an article past its routine day
    Delay {
        /// Article ID
        id: String,
        /// The day the article is due (YYYY-MM-DD)
        #[arg(long)]
        routine_day: NaiveDate,
        /// Display title
        #[arg(long)]
        title: Option<String>,
        /// Display URL
        #[arg(long)]
        url: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Remove a delayed article
    Remove {
        /// Article ID
        id: String,
    },
    /// Expire delayed articles past their deadline
    Sweep,
    /// List delayed articles, most recent first
    List,
}

pub fn run(action: BacklogAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine()?;

    match action {
        BacklogAction::Delay {
            id,
            routine_day,
            title,
            url,
            tags,
        } => {
            let article = Article {
                id: id.clone(),
                title,
                url,
                routine_day,
                tags: parse_tags(tags),
            };
            engine.delay(article, Utc::now())?;
            println!("Delayed '{id}'");
        }
        BacklogAction::Remove { id } => {
            engine.remove_delayed(&id)?;
            println!("Removed '{id}' from backlog");
        }
        BacklogAction::Sweep => {
            let removed = engine.sweep_expired(Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&removed)?);
        }
        BacklogAction::List => {
            println!("{}", serde_json::to_string_pretty(engine.backlog())?);
        }
    }
    Ok(())
}
