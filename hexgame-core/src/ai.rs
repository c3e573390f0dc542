//! CPU-based Alpha-Beta AI

use std::cmp::Reverse;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::board::{cell_at, Cell, Offset, BOARD_SIZE, CENTER_OFFSET};
use crate::connect::on_goal_edge;
use crate::error::Result;
use crate::eval::{evaluate_state, terminal_score, EvalWeights};
use crate::game::{BoardState, Side};
use crate::tactics::immediate_move;
use crate::zobrist::{ZobristKeys, DEFAULT_ZOBRIST_SEED};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Move ordering: bonus for a cell on the mover's goal edge
const EDGE_BONUS: i32 = 8;

/// Move ordering: bonus per adjacent own stone
const OWN_NEIGHBOR_BONUS: i32 = 5;

/// Move ordering: bonus per adjacent opponent stone
const OPPONENT_NEIGHBOR_BONUS: i32 = 3;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Alpha-beta search settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaBetaConfig {
    /// Deepest iterative-deepening pass, in plies including the root move
    pub max_depth: u32,
    /// Cache node values by (hash, remaining depth)
    pub use_transposition: bool,
    pub zobrist_seed: u64,
    pub weights: EvalWeights,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            use_transposition: true,
            zobrist_seed: DEFAULT_ZOBRIST_SEED,
            weights: EvalWeights::default(),
        }
    }
}

// ============================================================================
// TRANSPOSITION TABLE
// ============================================================================

/// How a cached value relates to the true minimax value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    Exact,
    /// True value is at least the stored one (search failed high)
    Lower,
    /// True value is at most the stored one (search failed low)
    Upper,
}

#[derive(Clone, Copy, Debug)]
struct TtEntry {
    value: i32,
    bound: Bound,
}

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-Beta AI player
pub struct AlphaBetaAI {
    config: AlphaBetaConfig,
    keys: ZobristKeys,
    table: FxHashMap<(u64, u32), TtEntry>,
    nodes: u64,
}

impl AlphaBetaAI {
    pub fn new(config: AlphaBetaConfig) -> Self {
        let keys = ZobristKeys::new(config.zobrist_seed);
        Self {
            config,
            keys,
            table: FxHashMap::default(),
            nodes: 0,
        }
    }

    pub fn with_depth(depth: u32) -> Self {
        Self::new(AlphaBetaConfig {
            max_depth: depth,
            ..Default::default()
        })
    }

    /// Enable or disable the transposition table
    pub fn with_transposition(mut self, enabled: bool) -> Self {
        self.config.use_transposition = enabled;
        self
    }

    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    /// Nodes visited by the last search
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// Get best move for current position
    ///
    /// `None` only when no cell is available.
    pub fn best_move(&mut self, state: &BoardState) -> Option<Cell> {
        if state.available().is_empty() {
            return None;
        }

        if let Some(tactic) = immediate_move(state) {
            tracing::debug!(?tactic, "alpha-beta: forced move");
            return Some(tactic.cell());
        }

        self.table.clear();
        self.nodes = 0;

        let mut best = None;
        for depth in 1..=self.config.max_depth.max(1) {
            let (mv, value) = self.search_root(state, depth);
            if mv.is_some() {
                best = mv;
            }
            tracing::debug!(
                depth,
                value,
                nodes = self.nodes,
                best = ?best.map(cell_at),
                "alpha-beta: iteration complete"
            );
        }

        best.map(cell_at)
    }

    /// Minimax value of `state` searched `depth` plies deep (red positive)
    pub fn search_value(&mut self, state: &BoardState, depth: u32) -> i32 {
        self.table.clear();
        self.nodes = 0;
        let hash = self.keys.hash(state);
        self.alpha_beta(state, hash, depth, i32::MIN, i32::MAX)
    }

    /// One full-window pass; root children are searched `depth - 1` deep
    fn search_root(&mut self, state: &BoardState, depth: u32) -> (Option<usize>, i32) {
        let hash = self.keys.hash(state);
        let mover = state.to_move();
        let maximizing = mover == Side::Red;

        let mut alpha = i32::MIN;
        let mut beta = i32::MAX;
        let mut best_move = None;
        let mut best_value = if maximizing { i32::MIN } else { i32::MAX };

        for index in order_moves(state) {
            let child = state.apply(index);
            let child_hash = self.keys.after_move(hash, index, mover);
            let value = self.alpha_beta(&child, child_hash, depth - 1, alpha, beta);

            let improved = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improved || best_move.is_none() {
                best_value = value;
                best_move = Some(index);
                if maximizing {
                    alpha = alpha.max(value);
                } else {
                    beta = beta.min(value);
                }
            }
        }

        (best_move, best_value)
    }

    fn alpha_beta(
        &mut self,
        state: &BoardState,
        hash: u64,
        remaining: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = terminal_score(state, remaining) {
            return score;
        }

        if remaining == 0 || state.available().is_empty() {
            return evaluate_state(state, &self.config.weights);
        }

        let key = (hash, remaining);
        let (alpha_orig, beta_orig) = (alpha, beta);
        if self.config.use_transposition {
            if let Some(entry) = self.table.get(&key) {
                match entry.bound {
                    Bound::Exact => return entry.value,
                    Bound::Lower => alpha = alpha.max(entry.value),
                    Bound::Upper => beta = beta.min(entry.value),
                }
                if beta <= alpha {
                    return entry.value;
                }
            }
        }

        let mover = state.to_move();
        let maximizing = mover == Side::Red;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for index in order_moves(state) {
            let child = state.apply(index);
            let child_hash = self.keys.after_move(hash, index, mover);
            let value = self.alpha_beta(&child, child_hash, remaining - 1, alpha, beta);

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }

            if beta <= alpha {
                break;
            }
        }

        if self.config.use_transposition {
            let bound = if best <= alpha_orig {
                Bound::Upper
            } else if best >= beta_orig {
                Bound::Lower
            } else {
                Bound::Exact
            };
            self.table.insert(key, TtEntry { value: best, bound });
        }

        best
    }
}

impl Default for AlphaBetaAI {
    fn default() -> Self {
        Self::new(AlphaBetaConfig::default())
    }
}

impl Agent for AlphaBetaAI {
    fn name(&self) -> &str {
        "alpha-beta"
    }

    fn choose_move(&mut self, state: &BoardState) -> Result<Option<Cell>> {
        Ok(self.best_move(state))
    }
}

// ============================================================================
// MOVE ORDERING
// ============================================================================

/// Score a move for ordering (higher = better for the mover)
fn move_score(state: &BoardState, index: usize) -> i32 {
    let mover = state.to_move();
    let offset = Offset::from_index(index);

    let mut score = 2 * (BOARD_SIZE as i32 - offset.manhattan_to(CENTER_OFFSET));
    if on_goal_edge(index, mover) {
        score += EDGE_BONUS;
    }
    score += OWN_NEIGHBOR_BONUS * state.stones(mover).neighbor_count(index) as i32;
    score += OPPONENT_NEIGHBOR_BONUS * state.stones(mover.opponent()).neighbor_count(index) as i32;
    score
}

/// Available moves sorted descending by score for red, ascending for blue.
///
/// The sort is stable, so equal scores keep index order.
fn order_moves(state: &BoardState) -> Vec<usize> {
    let mut scored: Vec<(i32, usize)> = state
        .available()
        .iter()
        .map(|i| (move_score(state, i), i))
        .collect();

    if state.to_move() == Side::Red {
        scored.sort_by_key(|&(score, _)| Reverse(score));
    } else {
        scored.sort_by_key(|&(score, _)| score);
    }

    scored.into_iter().map(|(_, i)| i).collect()
}

// ============================================================================
// TESTS
// ============================================================================
