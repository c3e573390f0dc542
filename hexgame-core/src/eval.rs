//! Position evaluation

use crate::board::{CellSet, Offset, BOARD_SIZE, CENTER_OFFSET};
use crate::game::{BoardState, Side};
use serde::{Deserialize, Serialize};

/// Base score for a completed connection; search adds the remaining depth
pub const WIN_SCORE: i32 = 1000;

/// Heuristic weights for static evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    /// Score per ordered pair of adjacent own stones
    pub adjacency_weight: i32,
    /// Multiplier for `11 - manhattan distance to center`
    pub center_weight: i32,
    /// Flat bonus for stones on the central row or column
    pub center_line_bonus: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            adjacency_weight: 5,
            center_weight: 2,
            center_line_bonus: 5,
        }
    }
}

/// Evaluate from red's perspective: red score minus blue score
pub fn evaluate(red: CellSet, blue: CellSet, weights: &EvalWeights) -> i32 {
    side_score(red, weights) - side_score(blue, weights)
}

/// Evaluate a snapshot, ignoring whose turn it is
pub fn evaluate_state(state: &BoardState, weights: &EvalWeights) -> i32 {
    evaluate(state.red(), state.blue(), weights)
}

/// Score for one player's stones
pub fn side_score(stones: CellSet, weights: &EvalWeights) -> i32 {
    adjacency_factor(stones, weights) + position_factor(stones, weights)
}

/// Every adjacency is seen from both of its stones, so each physical pair
/// contributes twice.
fn adjacency_factor(stones: CellSet, weights: &EvalWeights) -> i32 {
    let pairs: u32 = stones.iter().map(|i| stones.neighbor_count(i)).sum();
    pairs as i32 * weights.adjacency_weight
}

fn position_factor(stones: CellSet, weights: &EvalWeights) -> i32 {
    stones
        .iter()
        .map(|i| {
            let offset = Offset::from_index(i);
            let distance = offset.manhattan_to(CENTER_OFFSET);
            let mut reward = weights.center_weight * (BOARD_SIZE as i32 - distance);
            if offset.col == CENTER_OFFSET.col || offset.row == CENTER_OFFSET.row {
                reward += weights.center_line_bonus;
            }
            reward
        })
        .sum()
}

/// Score for a position where someone has connected, `None` otherwise.
///
/// Faster wins score higher: `remaining` is the unused search depth.
pub fn terminal_score(state: &BoardState, remaining: u32) -> Option<i32> {
    let bonus = remaining as i32;
    if state.red().has_connection(Side::Red) {
        Some(WIN_SCORE + bonus)
    } else if state.blue().has_connection(Side::Blue) {
        Some(-WIN_SCORE - bonus)
    } else {
        None
    }
}
