//! Hex Core - Board model and search engines
//!
//! This crate provides the core game logic for 11x11 Hex:
//! - Board geometry (native cells and offset coordinates)
//! - Board state snapshots and win detection
//! - Static evaluation and Zobrist hashing
//! - One-ply tactics shared by all engines
//! - CPU-based alpha-beta AI, heuristic and random players

pub mod board;
pub mod game;
pub mod connect;
pub mod eval;
pub mod zobrist;
pub mod tactics;
pub mod agent;
pub mod ai;
pub mod heuristic;
pub mod position;
pub mod error;

// Re-exports for convenient access
pub use board::{Cell, CellSet, Offset, BOARD_SIZE, CELL_COUNT, CENTER_CELL, DIRECTIONS};
pub use game::{BoardState, Game, GameResult, Side};
pub use connect::has_connection;
pub use eval::{evaluate, EvalWeights, WIN_SCORE};
pub use zobrist::ZobristKeys;
pub use tactics::{immediate_move, Tactic};
pub use agent::{Agent, RandomAgent};
pub use ai::{AlphaBetaAI, AlphaBetaConfig};
pub use heuristic::HeuristicAgent;
pub use position::Position;
pub use error::{EngineError, Result};
