//! Board geometry: native cells, offset coordinates and compact cell sets
//!
//! The game addresses cells in a skewed native coordinate system. Every
//! edge and adjacency rule works on the normalized `(column, row)` offset
//! grid, `[0, 10] x [0, 10]`.

use serde::{Deserialize, Serialize};

/// Cells per board side
pub const BOARD_SIZE: usize = 11;

/// Total number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Highest valid column/row in offset space
pub const MAX_COORD: i32 = BOARD_SIZE as i32 - 1;

/// Center of the board in offset space
pub const CENTER_OFFSET: Offset = Offset::new(5, 5);

/// Center of the board in native coordinates (the fixed opening move)
pub const CENTER_CELL: Cell = Cell::new(1, 0);

/// Neighbor deltas in offset space (dcol, drow)
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, -1),
    (-1, 1),
];

// ============================================================================
// CELL (native coordinates)
// ============================================================================

/// A board position in the game's native (skewed) coordinate system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert to offset coordinates.
    ///
    /// `row = 5 - y`, `column = x - (-7 + (6 - y) / 2)` with integer division
    /// truncating toward zero. Saturates on extreme input, so off-board cells
    /// stay off-board.
    pub fn to_offset(self) -> Offset {
        let row = 5i32.saturating_sub(self.y);
        let x_offset = -7 + 6i32.saturating_sub(self.y) / 2;
        Offset::new(self.x.saturating_sub(x_offset), row)
    }

    /// Index into the compact board representation, if the cell is on the board
    pub fn index(self) -> Option<usize> {
        if !(-5..=5).contains(&self.y) {
            return None;
        }
        let row = 5 - self.y;
        let col = self.x.checked_sub(-7 + (6 - self.y) / 2)?;
        Offset::new(col, row).index()
    }

    /// Check if this cell is on the board
    pub fn is_valid(self) -> bool {
        self.index().is_some()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ============================================================================
// OFFSET (normalized coordinates)
// ============================================================================

/// Normalized `(column, row)` coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    pub col: i32,
    pub row: i32,
}

impl Offset {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn in_bounds(self) -> bool {
        (0..=MAX_COORD).contains(&self.col) && (0..=MAX_COORD).contains(&self.row)
    }

    pub fn index(self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.row as usize * BOARD_SIZE + self.col as usize)
        } else {
            None
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::new((index % BOARD_SIZE) as i32, (index / BOARD_SIZE) as i32)
    }

    /// Inverse of [`Cell::to_offset`]
    pub fn to_cell(self) -> Cell {
        let y = 5 - self.row;
        let x_offset = -7 + (6 - y) / 2;
        Cell::new(self.col + x_offset, y)
    }

    /// The six hex neighbors, not filtered to the board
    pub fn neighbors(self) -> [Offset; 6] {
        DIRECTIONS.map(|(dc, dr)| Offset::new(self.col + dc, self.row + dr))
    }

    pub fn is_adjacent(self, other: Offset) -> bool {
        self.neighbors().contains(&other)
    }

    pub fn manhattan_to(self, other: Offset) -> i32 {
        (self.col - other.col).abs() + (self.row - other.row).abs()
    }
}

/// Native cell for a board index
pub fn cell_at(index: usize) -> Cell {
    Offset::from_index(index).to_cell()
}

/// All board cells in index order
pub fn all_cells() -> impl Iterator<Item = Cell> {
    (0..CELL_COUNT).map(cell_at)
}

// ============================================================================
// PRECOMPUTED MASKS
// ============================================================================

/// In-bounds neighbors of every cell, as bit masks over cell indices
pub const NEIGHBOR_MASKS: [u128; CELL_COUNT] = build_neighbor_masks();

const fn build_neighbor_masks() -> [u128; CELL_COUNT] {
    let mut masks = [0u128; CELL_COUNT];
    let mut index = 0;
    while index < CELL_COUNT {
        let col = (index % BOARD_SIZE) as i32;
        let row = (index / BOARD_SIZE) as i32;
        let mut d = 0;
        while d < DIRECTIONS.len() {
            let (dc, dr) = DIRECTIONS[d];
            let c = col + dc;
            let r = row + dr;
            if c >= 0 && c <= MAX_COORD && r >= 0 && r <= MAX_COORD {
                masks[index] |= 1u128 << (r as usize * BOARD_SIZE + c as usize);
            }
            d += 1;
        }
        index += 1;
    }
    masks
}

pub(crate) const fn row_mask(row: usize) -> u128 {
    let mut mask = 0u128;
    let mut col = 0;
    while col < BOARD_SIZE {
        mask |= 1u128 << (row * BOARD_SIZE + col);
        col += 1;
    }
    mask
}

pub(crate) const fn col_mask(col: usize) -> u128 {
    let mut mask = 0u128;
    let mut row = 0;
    while row < BOARD_SIZE {
        mask |= 1u128 << (row * BOARD_SIZE + col);
        row += 1;
    }
    mask
}

const FULL_MASK: u128 = (1u128 << CELL_COUNT) - 1;

// ============================================================================
// CELL SET
// ============================================================================

/// Set of board cells stored as a bit mask over cell indices
///
/// `Copy`, so every simulated move yields an independent snapshot.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellSet(u128);

impl CellSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn full() -> Self {
        Self(FULL_MASK)
    }

    pub const fn from_bits(bits: u128) -> Self {
        Self(bits & FULL_MASK)
    }

    pub const fn bits(self) -> u128 {
        self.0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, index: usize) -> bool {
        index < CELL_COUNT && self.0 & (1u128 << index) != 0
    }

    pub fn contains_cell(self, cell: Cell) -> bool {
        cell.index().is_some_and(|i| self.contains(i))
    }

    pub fn insert(&mut self, index: usize) {
        debug_assert!(index < CELL_COUNT);
        self.0 |= 1u128 << index;
    }

    pub fn remove(&mut self, index: usize) {
        self.0 &= !(1u128 << index);
    }

    /// Copy of this set with one more cell
    pub fn with(self, index: usize) -> Self {
        let mut next = self;
        next.insert(index);
        next
    }

    pub fn without(self, index: usize) -> Self {
        let mut next = self;
        next.remove(index);
        next
    }

    pub fn union(self, other: CellSet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn intersection(self, other: CellSet) -> Self {
        Self(self.0 & other.0)
    }

    /// Lowest index in the set
    pub fn first(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    /// Indices in ascending order
    pub fn iter(self) -> CellSetIter {
        CellSetIter(self.0)
    }

    pub fn cells(self) -> impl Iterator<Item = Cell> {
        self.iter().map(cell_at)
    }

    /// Number of in-bounds neighbors of `index` contained in this set
    pub fn neighbor_count(self, index: usize) -> u32 {
        (NEIGHBOR_MASKS[index] & self.0).count_ones()
    }
}

impl std::fmt::Debug for CellSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.cells()).finish()
    }
}

impl FromIterator<usize> for CellSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut set = CellSet::empty();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

/// Ascending iterator over the indices of a [`CellSet`]
pub struct CellSetIter(u128);

impl Iterator for CellSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CellSetIter {}
