//! Explicit data reset.

use clap::Args;
use dailyread_core::ResetOptions;

use super::open_engine;

#[derive(Args)]
pub struct ResetArgs {
    /// Clear reading history (also clears tag statistics)
    #[arg(long)]
    ledger: bool,
    /// Clear the delayed-article backlog
    #[arg(long)]
    backlog: bool,
}

pub fn run(args: ResetArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.ledger && !args.backlog {
        return Err("nothing to reset: pass --ledger and/or --backlog".into());
    }
    let mut engine = open_engine()?;
    let summary = engine.reset(ResetOptions {
        ledger: args.ledger,
        backlog: args.backlog,
    })?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
