//! JSON position snapshots exchanged with an orchestrator

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::error::Result;
use crate::game::BoardState;

/// Cell lists plus side to move, as handed over by the caller
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub available: Vec<Cell>,
    pub red: Vec<Cell>,
    pub blue: Vec<Cell>,
    pub red_to_move: bool,
}

impl Position {
    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let position = serde_json::from_str(&content)?;
        Ok(position)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate into a search snapshot
    pub fn to_state(&self) -> Result<BoardState> {
        BoardState::from_cells(
            self.available.iter().copied(),
            self.red.iter().copied(),
            self.blue.iter().copied(),
            self.red_to_move,
        )
    }

    pub fn from_state(state: &BoardState) -> Self {
        Self {
            available: state.available().cells().collect(),
            red: state.red().cells().collect(),
            blue: state.blue().cells().collect(),
            red_to_move: state.red_to_move(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CENTER_CELL;
    use crate::error::EngineError;

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "available": [{"x": 1, "y": 0}],
            "red": [{"x": 0, "y": 0}],
            "blue": [],
            "red_to_move": false
        }"#;
        let position: Position = serde_json::from_str(json).unwrap();
        let state = position.to_state().unwrap();
        assert!(state.available().contains_cell(CENTER_CELL));
        assert_eq!(state.red().len(), 1);
        assert!(!state.red_to_move());
    }

    #[test]
    fn test_invalid_cell_rejected() {
        let position = Position {
            available: vec![Cell::new(50, 0)],
            ..Default::default()
        };
        assert_eq!(position.to_state(), Err(EngineError::OffBoard(Cell::new(50, 0))));
    }

    #[test]
    fn test_extreme_json_coordinates_rejected() {
        let json = r#"{
            "available": [{"x": 0, "y": -2147483648}],
            "red": [],
            "blue": [],
            "red_to_move": true
        }"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.to_state(), Err(EngineError::OffBoard(Cell::new(0, i32::MIN))));
    }

    #[test]
    fn test_state_round_trip() {
        let state = BoardState::new_game().apply_cell(CENTER_CELL).unwrap();
        let position = Position::from_state(&state);
        assert_eq!(position.to_state().unwrap(), state);
    }
}
