//! HEXGAME CLI - Command-line interface
//!
//! Commands:
//! - match: Play a series of games between two agents
//! - suggest: Choose a move for a saved position

mod match_cmd;
mod settings;
mod suggest_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexgame")]
#[command(about = "Hex 11x11 engines: alpha-beta, MCTS/RAVE and simple agents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games between two agents
    Match(match_cmd::MatchArgs),
    /// Suggest a move for a position file
    Suggest(suggest_cmd::SuggestArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Match(args) => match_cmd::run(args),
        Commands::Suggest(args) => suggest_cmd::run(args),
    }
}
