//! Engine settings and agent construction
//!
//! Level 4 - Utilities and configuration

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use hexgame_core::{Agent, AlphaBetaAI, AlphaBetaConfig, HeuristicAgent, RandomAgent};
use hexgame_mcts::{MctsConfig, MctsPlayer};

/// Strategy selectable from the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    /// Iterative-deepening alpha-beta with a transposition table
    AlphaBeta,
    /// UCT search blended with RAVE
    Mcts,
    /// Greedy shortest path to the goal edges
    Heuristic,
    /// Uniformly random moves
    Random,
}

/// Engine settings, optionally loaded from a JSON file
///
/// Missing fields fall back to defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub alpha_beta: AlphaBetaConfig,
    pub mcts: MctsConfig,
    /// Base seed for matches when `--seed` is not given
    pub random_seed: Option<u64>,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
        Ok(settings)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Build a fresh agent of `kind`
    ///
    /// `seed` overrides any seed in the settings for the stochastic agents.
    pub fn build_agent(&self, kind: AgentKind, seed: Option<u64>) -> Box<dyn Agent> {
        match kind {
            AgentKind::AlphaBeta => Box::new(AlphaBetaAI::new(self.alpha_beta.clone())),
            AgentKind::Mcts => {
                let config = MctsConfig {
                    seed: seed.or(self.mcts.seed),
                    ..self.mcts.clone()
                };
                Box::new(MctsPlayer::new(config))
            }
            AgentKind::Heuristic => Box::new(HeuristicAgent::new()),
            AgentKind::Random => match seed.or(self.random_seed) {
                Some(s) => Box::new(RandomAgent::new(s)),
                None => Box::new(RandomAgent::from_entropy()),
            },
        }
    }
}
