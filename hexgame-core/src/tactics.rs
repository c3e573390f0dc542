//! One-ply tactics: play a winning move, or block the opponent's

use crate::board::{cell_at, Cell};
use crate::game::{BoardState, Side};

/// A forced move found without searching
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tactic {
    /// Completes a connection for the side to move
    Win(Cell),
    /// Occupies a cell the opponent would win with
    Block(Cell),
}

impl Tactic {
    pub fn cell(self) -> Cell {
        match self {
            Tactic::Win(cell) | Tactic::Block(cell) => cell,
        }
    }
}

/// Available moves (ascending index) that complete a connection for `side`
pub fn winning_moves(state: &BoardState, side: Side) -> impl Iterator<Item = usize> + '_ {
    let stones = state.stones(side);
    state
        .available()
        .iter()
        .filter(move |&i| stones.with(i).has_connection(side))
}

/// Immediate win for the side to move, else a block of the opponent's win
pub fn immediate_move(state: &BoardState) -> Option<Tactic> {
    let me = state.to_move();
    if let Some(index) = winning_moves(state, me).next() {
        return Some(Tactic::Win(cell_at(index)));
    }
    winning_moves(state, me.opponent())
        .next()
        .map(|index| Tactic::Block(cell_at(index)))
}
