//! Integration tests for the Hex engines
//!
//! Tests the full stack: board model, connectivity, alpha-beta, MCTS and the
//! simple agents playing complete games.

use hexgame_core::{
    board::{cell_at, Offset},
    has_connection, immediate_move, Agent, AlphaBetaAI, BoardState, Cell, CellSet, Game,
    GameResult, HeuristicAgent, RandomAgent, Side, CELL_COUNT, CENTER_CELL, WIN_SCORE,
};
use hexgame_mcts::{MctsConfig, MctsPlayer};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn index(c: i32, r: i32) -> usize {
    Offset::new(c, r).index().unwrap()
}

fn position(red: &[usize], blue: &[usize], to_move: Side) -> BoardState {
    let red: CellSet = red.iter().copied().collect();
    let blue: CellSet = blue.iter().copied().collect();
    let available = CellSet::from_bits(!(red.bits() | blue.bits()));
    BoardState::from_sets(available, red, blue, to_move).unwrap()
}

/// Red column 4 complete except one row
fn red_threat(missing_row: i32) -> Vec<usize> {
    (0..=10).filter(|&r| r != missing_row).map(|r| index(4, r)).collect()
}

/// Random undecided position with at most `open` empty cells
fn random_midgame(seed: u64, open: usize) -> BoardState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = BoardState::new_game();
    while state.available().len() > open {
        let cells: Vec<usize> = state.available().iter().collect();
        let next = state.apply(cells[rng.gen_range(0..cells.len())]);
        if next.winner().is_some() {
            break;
        }
        state = next;
    }
    state
}

fn mcts(iterations: u32, seed: u64) -> MctsPlayer {
    MctsPlayer::new(MctsConfig {
        iterations,
        seed: Some(seed),
        ..MctsConfig::default()
    })
}

fn play_out<'a>(red: &'a mut dyn Agent, blue: &'a mut dyn Agent) -> Game {
    let mut game = Game::new();
    while game.result() == GameResult::Ongoing {
        let agent = match game.state().to_move() {
            Side::Red => &mut *red,
            Side::Blue => &mut *blue,
        };
        match agent.choose_move(game.state()).unwrap() {
            Some(cell) => {
                game.play(cell).unwrap();
            }
            None => break,
        }
    }
    game
}

// ============================================================================
// CONNECTIVITY TESTS
// ============================================================================

#[test]
fn test_filled_board_has_exactly_one_winner() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..50 {
        let mut cells: Vec<usize> = (0..CELL_COUNT).collect();
        cells.shuffle(&mut rng);
        let red: CellSet = cells[..61].iter().copied().collect();
        let blue: CellSet = cells[61..].iter().copied().collect();

        let red_wins = red.has_connection(Side::Red);
        let blue_wins = blue.has_connection(Side::Blue);
        assert!(red_wins != blue_wins, "exactly one side connects on a full board");
    }
}

#[test]
fn test_connection_ignores_order_and_form() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..50 {
        let mut cells: Vec<usize> = (0..CELL_COUNT).filter(|_| rng.gen_bool(0.5)).collect();
        let set: CellSet = cells.iter().copied().collect();
        cells.shuffle(&mut rng);
        let as_cells: Vec<Cell> = cells.iter().map(|&i| cell_at(i)).collect();

        for side in [Side::Red, Side::Blue] {
            assert_eq!(has_connection(as_cells.iter().copied(), side), set.has_connection(side));
        }
    }
}

// ============================================================================
// ALPHA-BETA AI TESTS
// ============================================================================

#[test]
fn test_alphabeta_takes_immediate_win() {
    let state = position(&red_threat(6), &[index(0, 0), index(1, 0)], Side::Red);
    let mut ai = AlphaBetaAI::with_depth(3);
    assert_eq!(ai.best_move(&state), Some(Offset::new(4, 6).to_cell()));
}

#[test]
fn test_alphabeta_blocks_sole_threat() {
    let state = position(&red_threat(3), &[index(0, 0), index(1, 0), index(9, 9)], Side::Blue);
    assert!(matches!(immediate_move(&state), Some(hexgame_core::Tactic::Block(_))));
    let mut ai = AlphaBetaAI::with_depth(3);
    assert_eq!(ai.best_move(&state), Some(Offset::new(4, 3).to_cell()));
}

#[test]
fn test_alphabeta_sees_maximal_loss() {
    let blue: Vec<usize> = (0..=10).map(|c| index(c, 7)).collect();
    let state = position(&[index(5, 5)], &blue, Side::Red);
    let mut ai = AlphaBetaAI::with_depth(3);
    for depth in 1..=3 {
        assert_eq!(ai.search_value(&state, depth), -(WIN_SCORE + depth as i32));
    }
}

#[test]
fn test_transposition_table_is_pure_optimization() {
    // Red owns the top five rows, blue the bottom-left block; row 5 and the
    // two right columns below it stay open
    let red: Vec<usize> = (0..=4).flat_map(|r| (0..=10).map(move |c| index(c, r))).collect();
    let blue: Vec<usize> = (6..=10).flat_map(|r| (0..=8).map(move |c| index(c, r))).collect();

    for to_move in [Side::Red, Side::Blue] {
        let state = position(&red, &blue, to_move);
        assert_eq!(immediate_move(&state), None);

        let mut with_tt = AlphaBetaAI::with_depth(4).with_transposition(true);
        let mut without_tt = AlphaBetaAI::with_depth(4).with_transposition(false);

        assert_eq!(with_tt.best_move(&state), without_tt.best_move(&state));
        assert_eq!(with_tt.search_value(&state, 4), without_tt.search_value(&state, 4));
    }
}

#[test]
fn test_alphabeta_deterministic() {
    let state = random_midgame(11, 50);
    let a = AlphaBetaAI::with_depth(2).best_move(&state);
    let b = AlphaBetaAI::with_depth(2).best_move(&state);
    assert_eq!(a, b);
    assert!(a.map_or(false, |cell| state.available().contains_cell(cell)));
}

// ============================================================================
// MCTS TESTS
// ============================================================================

#[test]
fn test_mcts_opens_in_center() {
    let mut player = mcts(50, 1);
    assert_eq!(player.best_move(&BoardState::new_game()).unwrap(), Some(CENTER_CELL));
}

#[test]
fn test_mcts_takes_immediate_win() {
    let state = position(&red_threat(9), &[index(0, 0), index(1, 0)], Side::Red);
    let mut player = mcts(50, 1);
    assert_eq!(player.best_move(&state).unwrap(), Some(Offset::new(4, 9).to_cell()));
}

#[test]
fn test_mcts_blocks_sole_threat() {
    let state = position(&red_threat(0), &[index(0, 5), index(10, 5)], Side::Blue);
    let mut player = mcts(50, 1);
    assert_eq!(player.best_move(&state).unwrap(), Some(Offset::new(4, 0).to_cell()));
}

#[test]
fn test_mcts_returns_available_move() {
    let state = random_midgame(5, 60);
    let mut player = mcts(300, 9);
    let mv = player.best_move(&state).unwrap().unwrap();
    assert!(state.available().contains_cell(mv));
}

#[test]
fn test_mcts_search_statistics() {
    let state = random_midgame(8, 70);
    let mut player = mcts(200, 3);
    let result = player.search(&state);

    assert_eq!(result.total_simulations, 200);
    assert!(result.tree.len() > 1);
    println!("MCTS: {} nodes, top moves {:?}", result.tree.len(), &result.moves_by_visits()[..3]);
}

#[test]
fn test_mcts_search_finds_double_threat() {
    // Red column 4 rows 0..=4 and column 3 rows 7..=10. Playing (4, 5) or
    // (3, 6) leaves two ways to close the gap, so either one wins by force.
    let red: Vec<usize> = (0..=4)
        .map(|r| index(4, r))
        .chain((7..=10).map(|r| index(3, r)))
        .collect();
    let blue: Vec<usize> = (1..=9).map(|r| index(9, r)).collect();
    let state = position(&red, &blue, Side::Red);
    assert_eq!(immediate_move(&state), None);

    let winning = [Offset::new(4, 5).to_cell(), Offset::new(3, 6).to_cell()];
    let start = Instant::now();
    let result = mcts(20_000, 0).search(&state);
    let best = result.best_move().expect("search expands the root");

    println!(
        "MCTS double threat: {} in {:?}, top moves {:?}",
        best,
        start.elapsed(),
        &result.moves_by_visits()[..3]
    );
    assert!(winning.contains(&best), "{} is not a winning move", best);
}

// ============================================================================
// FULL GAME TESTS
// ============================================================================

#[test]
fn test_full_game_heuristic_vs_random() {
    let mut red = HeuristicAgent::new();
    let mut blue = RandomAgent::new(42);
    let game = play_out(&mut red, &mut blue);

    assert!(game.result().is_over());
    assert_ne!(game.result(), GameResult::Draw);
    assert_eq!(game.history()[0], CENTER_CELL);
}

#[test]
fn test_full_game_ab_vs_mcts() {
    let start = Instant::now();
    let mut red = AlphaBetaAI::with_depth(1);
    let mut blue = mcts(100, 4);
    let game = play_out(&mut red, &mut blue);

    println!("AB vs MCTS: {:?} in {} moves ({:?})", game.result(), game.history().len(), start.elapsed());
    assert!(matches!(game.result(), GameResult::RedWins | GameResult::BlueWins));
}
