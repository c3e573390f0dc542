//! MCTS Search Loop
//!
//! Implements the core MCTS algorithm:
//! 1. Selection - blended UCT/RAVE descent
//! 2. Expansion - Add child node
//! 3. Simulation - Rollout to a decided or exhausted board
//! 4. Backpropagation - Update statistics and RAVE tables
//!
//! ## Architecture
//! - Level 2: Search loop coordination
//! - Level 3: Individual MCTS phases
//! - Level 4: Utilities

use crate::rollout::cpu_rollout;
use crate::tree::{MctsTree, SelectionParams};
use crate::MctsConfig;
use hexgame_core::{BoardState, Cell};
use rand::Rng;

// ============================================================================
// SEARCH RESULT
// ============================================================================

/// Result of MCTS search
#[derive(Debug)]
pub struct SearchResult {
    /// The final tree after search
    pub tree: MctsTree,
    /// Total simulations performed
    pub total_simulations: u32,
    /// Statistics for each root move
    pub move_stats: Vec<MoveStatistics>,
}

/// Statistics for a single move at root
#[derive(Clone, Debug)]
pub struct MoveStatistics {
    pub mv: Cell,
    pub visits: u32,
    /// Mean outcome from the root mover's perspective, in [-1, 1]
    pub value: f32,
}

impl SearchResult {
    /// Get the best move (most visited)
    pub fn best_move(&self) -> Option<Cell> {
        self.tree.best_move()
    }

    /// Get all moves sorted by visits
    pub fn moves_by_visits(&self) -> Vec<(Cell, u32)> {
        let mut moves: Vec<_> = self.move_stats.iter().map(|s| (s.mv, s.visits)).collect();
        moves.sort_by(|a, b| b.1.cmp(&a.1));
        moves
    }
}

// ============================================================================
// SEARCH LOOP (Level 2 - Main Coordination)
// ============================================================================

/// Run MCTS search from `root` for `config.iterations` iterations
///
/// Level 2 function - coordinates the search phases.
pub fn run_search<R: Rng>(root: BoardState, config: &MctsConfig, rng: &mut R) -> SearchResult {
    let mut tree = MctsTree::new(root);
    let params = SelectionParams {
        exploration: config.exploration,
        rave_k: config.rave_k,
    };

    for _ in 0..config.iterations {
        run_single_iteration(&mut tree, params, rng);
    }

    let total_simulations = tree.total_simulations();
    let move_stats = collect_move_statistics(&tree);

    SearchResult {
        tree,
        total_simulations,
        move_stats,
    }
}

// ============================================================================
// MCTS PHASES (Level 3)
// ============================================================================

/// Single MCTS iteration
///
/// Level 3 function - implements one complete MCTS cycle.
fn run_single_iteration<R: Rng>(tree: &mut MctsTree, params: SelectionParams, rng: &mut R) {
    // Phase 1: Selection
    let leaf_id = tree.select_leaf(params);

    // Phase 2: Expansion (terminal or fully expanded leaves are simulated in place)
    let simulation_node = tree.expand(leaf_id).unwrap_or(leaf_id);

    // Phase 3: Simulation
    let rollout = cpu_rollout(&tree.get(simulation_node).state, rng);

    // Phase 4: Backpropagation
    tree.backpropagate(simulation_node, rollout.outcome, &rollout.moves);
}

// ============================================================================
// STATISTICS (Level 4)
// ============================================================================

/// Collect per-move statistics at the root, valued for the side to move
fn collect_move_statistics(tree: &MctsTree) -> Vec<MoveStatistics> {
    let sign = if tree.get(tree.root()).state.red_to_move() { 1.0 } else { -1.0 };
    tree.move_statistics()
        .into_iter()
        .map(|(mv, visits, mean)| MoveStatistics {
            mv,
            visits,
            value: sign * mean,
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
