//! Zobrist hashing for transposition lookups

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::{CellSet, CELL_COUNT};
use crate::game::{BoardState, Side};

/// Default seed for the key table
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x4845_585f_5a4f_4252;

/// Random keys per (cell, player) plus one for "red to move"
#[derive(Clone, Debug)]
pub struct ZobristKeys {
    cells: [[u64; 2]; CELL_COUNT],
    red_to_move: u64,
}

impl ZobristKeys {
    /// Deterministic key table: equal seeds give equal keys
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut cells = [[0u64; 2]; CELL_COUNT];
        for keys in cells.iter_mut() {
            keys[0] = rng.gen();
            keys[1] = rng.gen();
        }
        Self {
            cells,
            red_to_move: rng.gen(),
        }
    }

    pub fn cell_key(&self, index: usize, side: Side) -> u64 {
        self.cells[index][side as usize]
    }

    pub fn turn_key(&self) -> u64 {
        self.red_to_move
    }

    /// XOR of every occupied cell's key, plus the turn key if red is to move
    pub fn hash_sets(&self, red: CellSet, blue: CellSet, side_to_move: Side) -> u64 {
        let mut hash = red
            .iter()
            .fold(0, |h, i| h ^ self.cell_key(i, Side::Red));
        hash = blue.iter().fold(hash, |h, i| h ^ self.cell_key(i, Side::Blue));
        if side_to_move == Side::Red {
            hash ^= self.red_to_move;
        }
        hash
    }

    pub fn hash(&self, state: &BoardState) -> u64 {
        self.hash_sets(state.red(), state.blue(), state.to_move())
    }

    /// Hash after `mover` plays `index`; the turn flips either way
    pub fn after_move(&self, hash: u64, index: usize, mover: Side) -> u64 {
        hash ^ self.cell_key(index, mover) ^ self.red_to_move
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new(DEFAULT_ZOBRIST_SEED)
    }
}
