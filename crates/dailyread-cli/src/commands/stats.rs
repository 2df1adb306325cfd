//! Tag statistics commands.

use clap::Subcommand;

use super::open_engine;

#[derive(Subcommand)]
pub enum StatsAction {
    /// All tag counts
    Tags,
    /// The most-read tags
    Top {
        /// How many tags to show
        #[arg(long, default_value = "5")]
        count: usize,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = open_engine()?;

    match action {
        StatsAction::Tags => {
            println!("{}", serde_json::to_string_pretty(engine.tag_stats())?);
        }
        StatsAction::Top { count } => {
            println!(
                "{}",
                serde_json::to_string_pretty(&engine.tag_stats().top(count))?
            );
        }
    }
    Ok(())
}
