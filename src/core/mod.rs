//! Core module - pure game logic with no I/O
//!
//! Contains the board, the match scanner, the gravity pass, and the turn
//! controller. Deterministic for a given seed and fully testable headless.

pub mod board;
pub mod engine;
pub mod gravity;
pub mod matching;
pub mod rng;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use engine::{BoardEngine, MoveListener, NullListener};
pub use rng::SimpleRng;
pub use snapshot::EngineSnapshot;
