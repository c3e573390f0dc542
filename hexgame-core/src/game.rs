//! Board state snapshots and game driving

use crate::board::{cell_at, Cell, CellSet, CELL_COUNT};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player color
///
/// Red connects row 0 to row 10 and maximizes evaluations; Blue connects
/// column 0 to column 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Red = 0,
    Blue = 1,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    pub fn is_red(self) -> bool {
        self == Side::Red
    }

    pub fn from_red_to_move(red_to_move: bool) -> Self {
        if red_to_move {
            Side::Red
        } else {
            Side::Blue
        }
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    RedWins,
    BlueWins,
    /// No moves left and nobody connected (only possible on partial boards)
    Draw,
}

impl GameResult {
    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::RedWins => Some(Side::Red),
            GameResult::BlueWins => Some(Side::Blue),
            _ => None,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }
}

// ============================================================================
// BOARD STATE
// ============================================================================

/// Immutable snapshot of (available, red, blue, side to move)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardState {
    available: CellSet,
    red: CellSet,
    blue: CellSet,
    to_move: Side,
}

impl BoardState {
    /// Empty board, red to move
    pub fn new_game() -> Self {
        Self {
            available: CellSet::full(),
            red: CellSet::empty(),
            blue: CellSet::empty(),
            to_move: Side::Red,
        }
    }

    /// Build a snapshot from the orchestrator's cell collections.
    ///
    /// Rejects off-board cells and cells that appear in more than one set.
    pub fn from_cells<A, R, B>(available: A, red: R, blue: B, red_to_move: bool) -> Result<Self>
    where
        A: IntoIterator<Item = Cell>,
        R: IntoIterator<Item = Cell>,
        B: IntoIterator<Item = Cell>,
    {
        let available = collect_cells(available, CellSet::empty(), CellSet::empty())?;
        let red = collect_cells(red, available, CellSet::empty())?;
        let blue = collect_cells(blue, available, red)?;
        Ok(Self {
            available,
            red,
            blue,
            to_move: Side::from_red_to_move(red_to_move),
        })
    }

    /// Build a snapshot from compact sets, checking they are pairwise disjoint
    pub fn from_sets(available: CellSet, red: CellSet, blue: CellSet, to_move: Side) -> Result<Self> {
        let overlap = available
            .intersection(red)
            .union(available.intersection(blue))
            .union(red.intersection(blue));
        if let Some(index) = overlap.first() {
            return Err(EngineError::Overlap(cell_at(index)));
        }
        Ok(Self {
            available,
            red,
            blue,
            to_move,
        })
    }

    pub fn available(&self) -> CellSet {
        self.available
    }

    pub fn red(&self) -> CellSet {
        self.red
    }

    pub fn blue(&self) -> CellSet {
        self.blue
    }

    pub fn stones(&self, side: Side) -> CellSet {
        match side {
            Side::Red => self.red,
            Side::Blue => self.blue,
        }
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn red_to_move(&self) -> bool {
        self.to_move.is_red()
    }

    /// True when no cell has been played yet
    pub fn is_full_board(&self) -> bool {
        self.available.len() == CELL_COUNT
    }

    /// Play the available cell at `index` for the side to move.
    ///
    /// Returns a new snapshot; `self` is untouched.
    pub fn apply(&self, index: usize) -> Self {
        debug_assert!(self.available.contains(index));
        let mut next = *self;
        next.available.remove(index);
        match self.to_move {
            Side::Red => next.red.insert(index),
            Side::Blue => next.blue.insert(index),
        }
        next.to_move = self.to_move.opponent();
        next
    }

    /// Play `cell` for the side to move, checking it is available
    pub fn apply_cell(&self, cell: Cell) -> Result<Self> {
        let index = cell.index().ok_or(EngineError::OffBoard(cell))?;
        if !self.available.contains(index) {
            return Err(EngineError::Unavailable(cell));
        }
        Ok(self.apply(index))
    }

    /// Side with a completed connection, if any
    pub fn winner(&self) -> Option<Side> {
        if self.red.has_connection(Side::Red) {
            Some(Side::Red)
        } else if self.blue.has_connection(Side::Blue) {
            Some(Side::Blue)
        } else {
            None
        }
    }

    pub fn result(&self) -> GameResult {
        match self.winner() {
            Some(Side::Red) => GameResult::RedWins,
            Some(Side::Blue) => GameResult::BlueWins,
            None if self.available.is_empty() => GameResult::Draw,
            None => GameResult::Ongoing,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new_game()
    }
}

fn collect_cells<I>(cells: I, taken_a: CellSet, taken_b: CellSet) -> Result<CellSet>
where
    I: IntoIterator<Item = Cell>,
{
    let mut set = CellSet::empty();
    for cell in cells {
        let index = cell.index().ok_or(EngineError::OffBoard(cell))?;
        if taken_a.contains(index) || taken_b.contains(index) {
            return Err(EngineError::Overlap(cell));
        }
        set.insert(index);
    }
    Ok(set)
}

// ============================================================================
// GAME
// ============================================================================

/// A game in progress: current snapshot plus move history
#[derive(Clone, Debug, Default)]
pub struct Game {
    state: BoardState,
    history: Vec<Cell>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: BoardState) -> Self {
        Self {
            state,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn history(&self) -> &[Cell] {
        &self.history
    }

    pub fn result(&self) -> GameResult {
        self.state.result()
    }

    /// Play a move for the side to move and report the resulting status
    pub fn play(&mut self, cell: Cell) -> Result<GameResult> {
        self.state = self.state.apply_cell(cell)?;
        self.history.push(cell);
        Ok(self.state.result())
    }
}
