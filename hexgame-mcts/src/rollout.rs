//! Random playouts for MCTS
//!
//! ## Architecture
//! - Level 3: Single rollout implementation
//! - Level 4: Random move selection

use hexgame_core::{BoardState, CellSet, Side};
use rand::prelude::*;

// ============================================================================
// ROLLOUT RESULT
// ============================================================================

/// Result of a rollout simulation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RolloutResult {
    /// +1 red connected, -1 blue connected, 0 board exhausted
    pub outcome: i32,
    /// Every move played, in order (cell indices)
    pub moves: Vec<usize>,
}

impl RolloutResult {
    fn decided(winner: Option<Side>, moves: Vec<usize>) -> Self {
        let outcome = match winner {
            Some(Side::Red) => 1,
            Some(Side::Blue) => -1,
            None => 0,
        };
        Self { outcome, moves }
    }
}

// ============================================================================
// CPU ROLLOUT (Level 3 - Single Rollout)
// ============================================================================

/// Play uniformly random moves, alternating sides, until someone connects
/// or the board runs out.
///
/// A state that is already won returns immediately with no moves.
pub fn cpu_rollout<R: Rng>(state: &BoardState, rng: &mut R) -> RolloutResult {
    if let Some(winner) = state.winner() {
        return RolloutResult::decided(Some(winner), Vec::new());
    }

    let mut current = *state;
    let mut moves = Vec::with_capacity(current.available().len());

    while let Some(mv) = select_random_move(current.available(), rng) {
        let mover = current.to_move();
        current = current.apply(mv);
        moves.push(mv);

        // Only the mover's chain can have changed
        if current.stones(mover).has_connection(mover) {
            return RolloutResult::decided(Some(mover), moves);
        }
    }

    RolloutResult::decided(None, moves)
}

/// Select a random cell uniformly from the set
fn select_random_move<R: Rng>(available: CellSet, rng: &mut R) -> Option<usize> {
    if available.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..available.len());
    available.iter().nth(idx)
}

// ============================================================================
// TESTS
// ============================================================================
