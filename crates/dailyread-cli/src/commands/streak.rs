//! Streak display commands.

use clap::Subcommand;
use serde::Serialize;

use super::{open_engine, resolve_today};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Current streak for today (or an explicit day)
    Show {
        /// Compute for this day instead of today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
        /// Expire overdue backlog entries before computing
        #[arg(long)]
        sweep: bool,
    },
}

#[derive(Serialize)]
struct StreakOutput {
    today: String,
    streak: u32,
    swept: Vec<String>,
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine()?;

    match action {
        StreakAction::Show { today, sweep } => {
            let today = resolve_today(today)?;
            let swept = if sweep {
                engine.sweep_expired(chrono::Utc::now())?
            } else {
                Vec::new()
            };
            let output = StreakOutput {
                today: today.to_string(),
                streak: engine.compute_streak(today),
                swept,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
