//! Engine error type

use crate::board::Cell;

/// Errors reported by the decision engines
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("cell {0} is not on the board")]
    OffBoard(Cell),

    #[error("cell {0} appears in more than one cell set")]
    Overlap(Cell),

    #[error("cell {0} is not available")]
    Unavailable(Cell),

    #[error("search tree has no children although {0} moves are available")]
    EmptySearchTree(usize),
}

pub type Result<T> = std::result::Result<T, EngineError>;
