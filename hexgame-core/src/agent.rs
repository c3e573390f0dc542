//! Common move-choosing contract shared by every strategy

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{cell_at, Cell};
use crate::error::Result;
use crate::game::BoardState;

/// A strategy that picks the next move for the side to move
pub trait Agent {
    /// Short identifier used in logs and reports
    fn name(&self) -> &str;

    /// Choose a cell from `state.available()`.
    ///
    /// Returns `Ok(None)` only when no cell is available.
    fn choose_move(&mut self, state: &BoardState) -> Result<Option<Cell>>;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_move(&mut self, state: &BoardState) -> Result<Option<Cell>> {
        (**self).choose_move(state)
    }
}

/// Uniformly random player
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, state: &BoardState) -> Result<Option<Cell>> {
        let available = state.available();
        if available.is_empty() {
            return Ok(None);
        }
        let pick = self.rng.gen_range(0..available.len());
        Ok(available.iter().nth(pick).map(cell_at))
    }
}
