//! Match command - play full games between two agents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: seeding and formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;

use hexgame_core::{Agent, Game, GameResult, Side};

use crate::settings::{AgentKind, Settings};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Agent playing red (top to bottom) in the first game
    #[arg(long, value_enum, default_value = "alpha-beta")]
    pub red: AgentKind,

    /// Agent playing blue (left to right) in the first game
    #[arg(long, value_enum, default_value = "mcts")]
    pub blue: AgentKind,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Alternate colors every other game
    #[arg(long)]
    pub swap: bool,

    /// Base random seed (per-game seeds derive from it)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Settings JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Play games on the rayon thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    moves: usize,
    red_agent: String,
    blue_agent: String,
    /// The `--red` agent played blue in this game
    swapped: bool,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    first_agent_wins: usize,
    second_agent_wins: usize,
    red_wins: usize,
    blue_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// This function reads like a table of contents:
/// 1. Load settings
/// 2. Play the match (multiple games)
/// 3. Report results
pub fn run(args: MatchArgs) -> Result<()> {
    let settings = Settings::load_or_default(args.config.as_deref())?;
    let base_seed = args
        .seed
        .or(settings.random_seed)
        .unwrap_or_else(rand::random);

    tracing::info!(
        "Starting match: {:?} vs {:?} ({} games, seed={}, swap={})",
        args.red,
        args.blue,
        args.games,
        base_seed,
        args.swap
    );

    let results = play_match(&settings, &args, base_seed)?;

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(settings: &Settings, args: &MatchArgs, base_seed: u64) -> Result<MatchResults> {
    let play = |index: usize| -> Result<GameRecord> {
        let swapped = args.swap && index % 2 == 1;
        let (red, blue) = if swapped {
            (args.blue, args.red)
        } else {
            (args.red, args.blue)
        };
        let seed = base_seed.wrapping_add(index as u64);
        let record = play_single_game(settings, red, blue, index + 1, swapped, seed)?;

        tracing::info!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.result,
            record.moves
        );
        Ok(record)
    };

    let games: Vec<GameRecord> = if args.parallel {
        (0..args.games).into_par_iter().map(play).collect::<Result<_>>()?
    } else {
        (0..args.games).map(play).collect::<Result<_>>()?
    };

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results, args)
    } else {
        print_text_results(results, args);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game to completion with fresh agents
fn play_single_game(
    settings: &Settings,
    red_kind: AgentKind,
    blue_kind: AgentKind,
    game_number: usize,
    swapped: bool,
    seed: u64,
) -> Result<GameRecord> {
    let mut red = settings.build_agent(red_kind, Some(seed));
    let mut blue = settings.build_agent(blue_kind, Some(seed.wrapping_add(1)));

    let mut game = Game::new();
    while game.result() == GameResult::Ongoing {
        let agent: &mut Box<dyn Agent> = match game.state().to_move() {
            Side::Red => &mut red,
            Side::Blue => &mut blue,
        };
        let choice = agent
            .choose_move(game.state())
            .with_context(|| format!("{} failed in game {}", agent.name(), game_number))?;
        match choice {
            Some(cell) => {
                game.play(cell).with_context(|| {
                    format!("{} played illegal move {} in game {}", agent.name(), cell, game_number)
                })?;
            }
            None => break,
        }
    }

    let result = match game.result() {
        GameResult::Ongoing => GameResult::Draw,
        decided => decided,
    };

    Ok(GameRecord {
        game_number,
        result,
        moves: game.history().len(),
        red_agent: red.name().to_string(),
        blue_agent: blue.name().to_string(),
        swapped,
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let red_wins = games.iter().filter(|g| g.result == GameResult::RedWins).count();
    let blue_wins = games.iter().filter(|g| g.result == GameResult::BlueWins).count();
    let draws = games.iter().filter(|g| g.result == GameResult::Draw).count();

    // The --red agent wins as red in normal games, as blue in swapped ones
    let first_agent_wins = games
        .iter()
        .filter(|g| match g.result {
            GameResult::RedWins => !g.swapped,
            GameResult::BlueWins => g.swapped,
            _ => false,
        })
        .count();
    let second_agent_wins = red_wins + blue_wins - first_agent_wins;

    let total_moves: usize = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        first_agent_wins,
        second_agent_wins,
        red_wins,
        blue_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    #[derive(Serialize)]
    struct JsonGame {
        game_number: usize,
        result: String,
        moves: usize,
        red: String,
        blue: String,
    }

    #[derive(Serialize)]
    struct JsonOutput {
        total_games: usize,
        first_agent: String,
        second_agent: String,
        first_agent_wins: usize,
        second_agent_wins: usize,
        red_wins: usize,
        blue_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        first_agent: format!("{:?}", args.red),
        second_agent: format!("{:?}", args.blue),
        first_agent_wins: results.first_agent_wins,
        second_agent_wins: results.second_agent_wins,
        red_wins: results.red_wins,
        blue_wins: results.blue_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: format!("{:?}", g.result),
                moves: g.moves,
                red: g.red_agent.clone(),
                blue: g.blue_agent.clone(),
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize match results")?;
    println!("{}", json);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!(
        "{:?} wins:  {} ({:.1}%)",
        args.red,
        results.first_agent_wins,
        percent(results.first_agent_wins, total)
    );
    println!(
        "{:?} wins:  {} ({:.1}%)",
        args.blue,
        results.second_agent_wins,
        percent(results.second_agent_wins, total)
    );
    println!("Red wins:    {} ({:.1}%)", results.red_wins, percent(results.red_wins, total));
    println!("Blue wins:   {} ({:.1}%)", results.blue_wins, percent(results.blue_wins, total));
    println!("Draws:       {}", results.draws);
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} (red) vs {} (blue): {:?} in {} moves",
            game.game_number, game.red_agent, game.blue_agent, game.result, game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
