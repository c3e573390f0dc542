//! Win detection: does a player's stone set join its two goal edges?

use std::collections::VecDeque;

use crate::board::{col_mask, row_mask, Cell, CellSet, BOARD_SIZE, NEIGHBOR_MASKS};
use crate::game::Side;

const TOP_EDGE: CellSet = CellSet::from_bits(row_mask(0));
const BOTTOM_EDGE: CellSet = CellSet::from_bits(row_mask(BOARD_SIZE - 1));
const LEFT_EDGE: CellSet = CellSet::from_bits(col_mask(0));
const RIGHT_EDGE: CellSet = CellSet::from_bits(col_mask(BOARD_SIZE - 1));

/// Start and end goal edges for a side
pub fn goal_edges(side: Side) -> (CellSet, CellSet) {
    match side {
        Side::Red => (TOP_EDGE, BOTTOM_EDGE),
        Side::Blue => (LEFT_EDGE, RIGHT_EDGE),
    }
}

/// True if `index` lies on one of `side`'s goal edges
pub fn on_goal_edge(index: usize, side: Side) -> bool {
    let (start, end) = goal_edges(side);
    start.union(end).contains(index)
}

/// Check whether `cells` contain an unbroken chain between `side`'s goal edges.
///
/// Off-board cells are ignored. An empty collection never connects.
pub fn has_connection<I>(cells: I, side: Side) -> bool
where
    I: IntoIterator<Item = Cell>,
{
    let stones: CellSet = cells.into_iter().filter_map(Cell::index).collect();
    stones.has_connection(side)
}

impl CellSet {
    /// Breadth-first search from every start-edge stone at once.
    ///
    /// Returns false without searching when either edge holds no stone.
    pub fn has_connection(self, side: Side) -> bool {
        let (start_edge, end_edge) = goal_edges(side);
        let start = self.intersection(start_edge);
        let end = self.intersection(end_edge);
        if start.is_empty() || end.is_empty() {
            return false;
        }

        let mut visited = start;
        let mut queue: VecDeque<usize> = start.iter().collect();

        while let Some(current) = queue.pop_front() {
            if end.contains(current) {
                return true;
            }
            let fresh = CellSet::from_bits(NEIGHBOR_MASKS[current] & self.bits() & !visited.bits());
            for next in fresh.iter() {
                visited.insert(next);
                queue.push_back(next);
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Offset;

    fn cells(offsets: &[(i32, i32)]) -> Vec<Cell> {
        offsets
            .iter()
            .map(|&(c, r)| Offset::new(c, r).to_cell())
            .collect()
    }

    #[test]
    fn test_empty_never_connects() {
        assert!(!has_connection(Vec::new(), Side::Red));
        assert!(!has_connection(Vec::new(), Side::Blue));
    }

    #[test]
    fn test_extreme_cells_are_ignored() {
        let chain: Vec<(i32, i32)> = (0..=9).map(|r| (4, r)).collect();
        let mut stones = cells(&chain);
        stones.push(Cell::new(0, i32::MIN));
        stones.push(Cell::new(i32::MIN, 0));
        assert!(!has_connection(stones.clone(), Side::Red));
        assert!(!has_connection(vec![Cell::new(0, i32::MIN)], Side::Red));

        stones.push(Offset::new(4, 10).to_cell());
        assert!(has_connection(stones, Side::Red));
    }

    #[test]
    fn test_straight_red_column() {
        let chain: Vec<(i32, i32)> = (0..=10).map(|r| (4, r)).collect();
        assert!(has_connection(cells(&chain), Side::Red));
        // Same stones do not join blue's edges
        assert!(!has_connection(cells(&chain), Side::Blue));
    }

    #[test]
    fn test_straight_blue_row() {
        let chain: Vec<(i32, i32)> = (0..=10).map(|c| (c, 7)).collect();
        assert!(has_connection(cells(&chain), Side::Blue));
    }

    #[test]
    fn test_skewed_diagonal_chain() {
        // (c, r) -> (c - 1, r + 1) is a hex neighbor
        let chain: Vec<(i32, i32)> = (0..=10).map(|r| (10 - r, r)).collect();
        assert!(has_connection(cells(&chain), Side::Red));
        assert!(has_connection(cells(&chain), Side::Blue));
    }

    #[test]
    fn test_other_diagonal_is_not_adjacent() {
        // (c, r) -> (c + 1, r + 1) is not a hex neighbor
        let chain: Vec<(i32, i32)> = (0..=10).map(|r| (r, r)).collect();
        assert!(!has_connection(cells(&chain), Side::Red));
    }

    #[test]
    fn test_gap_breaks_chain() {
        let chain: Vec<(i32, i32)> = (0..=10).filter(|&r| r != 6).map(|r| (2, r)).collect();
        assert!(!has_connection(cells(&chain), Side::Red));
    }

    #[test]
    fn test_missing_edge_short_circuits() {
        // Touches the top edge but never the bottom one
        let chain: Vec<(i32, i32)> = (0..10).map(|r| (3, r)).collect();
        let set: CellSet = cells(&chain).into_iter().filter_map(Cell::index).collect();
        let (_, bottom) = goal_edges(Side::Red);
        assert!(set.intersection(bottom).is_empty());
        assert!(!set.has_connection(Side::Red));
    }

    #[test]
    fn test_winding_path() {
        let path = [
            (0, 0), (0, 1), (1, 1), (2, 1), (2, 2), (2, 3), (1, 4), (0, 5),
            (0, 6), (0, 7), (1, 7), (1, 8), (1, 9), (1, 10),
        ];
        assert!(has_connection(cells(&path), Side::Red));
    }

    #[test]
    fn test_off_board_cells_ignored() {
        let mut chain = cells(&(0..=10).map(|r| (4, r)).collect::<Vec<_>>());
        chain.push(Cell::new(99, 99));
        assert!(has_connection(chain, Side::Red));
    }

    #[test]
    fn test_on_goal_edge() {
        let top_left = Offset::new(0, 0).index().unwrap();
        let middle = Offset::new(5, 5).index().unwrap();
        assert!(on_goal_edge(top_left, Side::Red));
        assert!(on_goal_edge(top_left, Side::Blue));
        assert!(!on_goal_edge(middle, Side::Red));
    }
}
