//! MCTS vs Alpha-Beta Performance Benchmark
//!
//! Compares:
//! 1. Time to find a move at various depths/iterations
//! 2. Throughput over self-play games

use std::time::Instant;
use hexgame_core::board::Offset;
use hexgame_core::{AlphaBetaAI, Agent, BoardState, Game, GameResult};
use hexgame_mcts::{MctsConfig, MctsPlayer};

// ============================================================================
// TEST POSITIONS
// ============================================================================

fn play(state: BoardState, cells: &[(i32, i32)]) -> BoardState {
    cells
        .iter()
        .filter_map(|&(c, r)| Offset::new(c, r).index())
        .fold(state, |s, i| s.apply(i))
}

/// Center taken, one reply
fn test_position_opening() -> BoardState {
    play(BoardState::new_game(), &[(5, 5), (4, 5)])
}

/// A dozen stones scattered around the middle
fn test_position_midgame() -> BoardState {
    play(
        BoardState::new_game(),
        &[
            (5, 5), (4, 5), (5, 4), (6, 4), (5, 6), (3, 6),
            (4, 7), (6, 6), (7, 3), (2, 4), (5, 3), (6, 7),
        ],
    )
}

// ============================================================================
// BENCHMARK STRUCTURES
// ============================================================================

#[derive(Clone, Debug)]
struct BenchmarkResult {
    player: String,
    config: String,
    avg_move_time_ms: f64,
    moves_per_second: f64,
    total_time_ms: f64,
}

impl BenchmarkResult {
    fn new(player: &str, config: String, total_time_ms: f64, moves: usize) -> Self {
        let avg = total_time_ms / moves.max(1) as f64;
        Self {
            player: player.to_string(),
            config,
            avg_move_time_ms: avg,
            moves_per_second: 1000.0 / avg.max(f64::EPSILON),
            total_time_ms,
        }
    }

    fn to_table_row(&self) -> String {
        format!(
            "| {} | {} | {:.2}ms | {:.0} | {:.0}ms |",
            self.player,
            self.config,
            self.avg_move_time_ms,
            self.moves_per_second,
            self.total_time_ms
        )
    }
}

fn time_moves<A: Agent>(agent: &mut A, state: &BoardState, repeats: usize) -> f64 {
    let mut total_time = 0.0;
    for _ in 0..repeats {
        let start = Instant::now();
        agent
            .choose_move(state)
            .unwrap_or_else(|e| panic!("{} failed to choose a move: {}", agent.name(), e));
        total_time += start.elapsed().as_secs_f64() * 1000.0;
    }
    total_time
}

// ============================================================================
// BENCHMARK: Time to Find Move
// ============================================================================

fn benchmark_move_time(state: &BoardState, position_name: &str) -> Vec<BenchmarkResult> {
    println!("\n=== MOVE TIME BENCHMARK: {} ===", position_name);
    let mut results = Vec::new();

    for depth in [1, 2, 3] {
        print!("  AB depth {} ... ", depth);
        let mut ai = AlphaBetaAI::with_depth(depth);
        let repeats = 3;
        let total = time_moves(&mut ai, state, repeats);
        let result = BenchmarkResult::new("Alpha-Beta", format!("Depth {}", depth), total, repeats);
        println!("{:.2}ms ({} nodes)", result.avg_move_time_ms, ai.nodes_searched());
        results.push(result);
    }

    for iterations in [100, 500, 1000, 5000] {
        print!("  MCTS {} iterations ... ", iterations);
        let mut player = MctsPlayer::new(MctsConfig {
            iterations,
            seed: Some(42),
            ..MctsConfig::default()
        });
        let repeats = 3;
        let total = time_moves(&mut player, state, repeats);
        let result = BenchmarkResult::new("MCTS", format!("{} iterations", iterations), total, repeats);
        println!("{:.2}ms", result.avg_move_time_ms);
        results.push(result);
    }

    results
}

// ============================================================================
// BENCHMARK: Throughput (Moves per Second)
// ============================================================================

fn play_out<A: Agent>(agent: &mut A, initial: BoardState) -> usize {
    let mut game = Game::from_state(initial);
    while game.result() == GameResult::Ongoing {
        let choice = agent
            .choose_move(game.state())
            .unwrap_or_else(|e| panic!("{} failed to choose a move: {}", agent.name(), e));
        match choice {
            Some(cell) => {
                game.play(cell).unwrap_or_else(|e| {
                    panic!("{} played illegal move {}: {}", agent.name(), cell, e)
                });
            }
            None => break,
        }
    }
    game.history().len()
}

fn benchmark_throughput(initial: &BoardState, position_name: &str) -> Vec<BenchmarkResult> {
    println!("\n=== THROUGHPUT BENCHMARK: {} ===", position_name);
    let mut results = Vec::new();

    print!("  AB depth 2 (game) ... ");
    let mut ai = AlphaBetaAI::with_depth(2);
    let start = Instant::now();
    let moves = play_out(&mut ai, *initial);
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    println!("{} moves in {:.0}ms", moves, elapsed);
    results.push(BenchmarkResult::new("Alpha-Beta", "Depth 2".to_string(), elapsed, moves));

    for iterations in [100, 1000] {
        print!("  MCTS {} iterations (game) ... ", iterations);
        let mut player = MctsPlayer::new(MctsConfig {
            iterations,
            seed: Some(7),
            ..MctsConfig::default()
        });
        let start = Instant::now();
        let moves = play_out(&mut player, *initial);
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;
        println!("{} moves in {:.0}ms", moves, elapsed);
        results.push(BenchmarkResult::new("MCTS", format!("{} iterations", iterations), elapsed, moves));
    }

    results
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    println!("HEXGAME: MCTS vs Alpha-Beta");

    let mut all = Vec::new();
    for (name, state) in [
        ("opening", test_position_opening()),
        ("midgame", test_position_midgame()),
    ] {
        all.extend(benchmark_move_time(&state, name));
        all.extend(benchmark_throughput(&state, name));
    }

    println!("\n| Player | Config | Avg Move | Moves/sec | Total |");
    println!("|--------|--------|----------|-----------|-------|");
    for result in &all {
        println!("{}", result.to_table_row());
    }
}
