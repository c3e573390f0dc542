//! Suggest command - pick a move for a saved position
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_position(), suggest_move()

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexgame_core::{BoardState, Cell, Position};

use crate::settings::{AgentKind, Settings};

#[derive(Args)]
pub struct SuggestArgs {
    /// Position JSON file (`available`, `red`, `blue`, `red_to_move`)
    #[arg(long, value_name = "FILE")]
    pub position: PathBuf,

    /// Agent that chooses the move
    #[arg(long, value_enum, default_value = "alpha-beta")]
    pub agent: AgentKind,

    /// Settings JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: SuggestArgs) -> Result<()> {
    let settings = Settings::load_or_default(args.config.as_deref())?;
    let state = load_position(&args.position)?;

    match suggest_move(&settings, args.agent, &state)? {
        Some(cell) => println!("{}", cell),
        None => println!("no move"),
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_position(path: &std::path::Path) -> Result<BoardState> {
    let position = Position::load(path)
        .with_context(|| format!("Failed to load position: {}", path.display()))?;
    let state = position
        .to_state()
        .with_context(|| format!("Invalid position: {}", path.display()))?;
    Ok(state)
}

fn suggest_move(settings: &Settings, kind: AgentKind, state: &BoardState) -> Result<Option<Cell>> {
    let mut agent = settings.build_agent(kind, None);
    tracing::info!(
        "{} choosing among {} available cells",
        agent.name(),
        state.available().len()
    );
    let choice = agent
        .choose_move(state)
        .with_context(|| format!("{} could not choose a move", agent.name()))?;
    Ok(choice)
}
