//! Greedy shortest-path player
//!
//! Opens in the center, then extends toward the nearer goal edge along the
//! cheapest route through empty cells.

use std::collections::VecDeque;

use crate::agent::Agent;
use crate::board::{cell_at, Cell, CellSet, Offset, CELL_COUNT, CENTER_OFFSET, MAX_COORD, NEIGHBOR_MASKS};
use crate::error::Result;
use crate::game::{BoardState, Side};

/// Shortest-path heuristic player
#[derive(Clone, Debug, Default)]
pub struct HeuristicAgent;

impl HeuristicAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn best_move(&self, state: &BoardState) -> Option<Cell> {
        let available = state.available();
        if available.is_empty() {
            return None;
        }

        let me = state.to_move();
        let own = state.stones(me);
        if own.is_empty() {
            return opening_move(available).map(cell_at);
        }

        path_move(available, own, me)
            .or_else(|| available.first())
            .map(cell_at)
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn choose_move(&mut self, state: &BoardState) -> Result<Option<Cell>> {
        Ok(self.best_move(state))
    }
}

/// Center if free, else the first free neighbor of the center
fn opening_move(available: CellSet) -> Option<usize> {
    let center = CENTER_OFFSET.index()?;
    if available.contains(center) {
        return Some(center);
    }
    CENTER_OFFSET
        .neighbors()
        .into_iter()
        .filter_map(Offset::index)
        .find(|&i| available.contains(i))
        .or_else(|| available.first())
}

/// Rows (red) or columns (blue) still to cross to the nearer goal edge
fn distance_to_edge(index: usize, side: Side) -> i32 {
    let o = Offset::from_index(index);
    match side {
        Side::Red => o.row.min(MAX_COORD - o.row),
        Side::Blue => o.col.min(MAX_COORD - o.col),
    }
}

/// BFS from every own stone through empty cells; pick the reached cell
/// minimizing `steps + distance_to_edge`. Ties go to the lowest index.
fn path_move(available: CellSet, own: CellSet, side: Side) -> Option<usize> {
    let mut distance: [Option<i32>; CELL_COUNT] = [None; CELL_COUNT];
    let mut queue: VecDeque<usize> = VecDeque::new();

    for stone in own.iter() {
        distance[stone] = Some(0);
        queue.push_back(stone);
    }

    while let Some(current) = queue.pop_front() {
        let steps = distance[current].unwrap_or(0);
        let open = CellSet::from_bits(NEIGHBOR_MASKS[current] & available.bits());
        for next in open.iter() {
            if distance[next].is_none() {
                distance[next] = Some(steps + 1);
                queue.push_back(next);
            }
        }
    }

    available
        .iter()
        .filter_map(|i| distance[i].map(|d| (d + distance_to_edge(i, side), i)))
        .min()
        .map(|(_, i)| i)
}
