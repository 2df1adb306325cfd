use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dailyread-cli", version, about = "Dailyread CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reading history and progress records
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Delayed-article backlog
    Backlog {
        #[command(subcommand)]
        action: commands::backlog::BacklogAction,
    },
    /// Streak display
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Tag statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Clear stored collections
    Reset(commands::reset::ResetArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::History { action } => commands::history::run(action),
        Commands::Backlog { action } => commands::backlog::run(action),
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Reset(args) => commands::reset::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
