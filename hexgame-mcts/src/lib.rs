//! HEXGAME MCTS - Monte Carlo Tree Search with RAVE
//!
//! This crate provides a UCT player blended with rapid action value
//! estimates:
//! - Tree policy (UCT + RAVE)
//! - Uniform random rollouts
//! - Backpropagation with all-moves-as-first credit

pub mod rollout;
pub mod search;
pub mod tree;

pub use rollout::{cpu_rollout, RolloutResult};
pub use search::{run_search, MoveStatistics, SearchResult};
pub use tree::{MctsNode, MctsTree, NodeId, NodeStats, RaveStats, SelectionParams};

use hexgame_core::{
    immediate_move, Agent, BoardState, Cell, EngineError, Result, CELL_COUNT, CENTER_CELL,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// MCTS configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MctsConfig {
    /// Simulations per move
    pub iterations: u32,
    /// UCT exploration constant
    pub exploration: f32,
    /// RAVE equivalence constant
    pub rave_k: f32,
    /// Fixed RNG seed; entropy when unset
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            exploration: 1.5,
            rave_k: 1000.0,
            seed: None,
        }
    }
}

/// MCTS player
pub struct MctsPlayer {
    config: MctsConfig,
    rng: ChaCha8Rng,
}

impl MctsPlayer {
    pub fn new(config: MctsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run a full search from `state` without the opening book or tactics
    pub fn search(&mut self, state: &BoardState) -> SearchResult {
        run_search(*state, &self.config, &mut self.rng)
    }

    /// Get best move: opening book, then tactics, then search
    pub fn best_move(&mut self, state: &BoardState) -> Result<Option<Cell>> {
        let available = state.available();
        if available.is_empty() {
            return Ok(None);
        }

        if available.len() == CELL_COUNT {
            tracing::debug!(cell = %CENTER_CELL, "mcts opening move");
            return Ok(Some(CENTER_CELL));
        }

        if let Some(tactic) = immediate_move(state) {
            tracing::debug!(?tactic, "mcts tactical move");
            return Ok(Some(tactic.cell()));
        }

        let result = self.search(state);
        tracing::debug!(
            simulations = result.total_simulations,
            nodes = result.tree.len(),
            "mcts search finished"
        );

        match result.best_move() {
            Some(cell) => Ok(Some(cell)),
            None => Err(EngineError::EmptySearchTree(available.len())),
        }
    }
}

impl Default for MctsPlayer {
    fn default() -> Self {
        Self::new(MctsConfig::default())
    }
}

impl Agent for MctsPlayer {
    fn name(&self) -> &str {
        "mcts"
    }

    fn choose_move(&mut self, state: &BoardState) -> Result<Option<Cell>> {
        self.best_move(state)
    }
}
