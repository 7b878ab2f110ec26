//! Match-3 board engine with rotation-driven gravity
//!
//! This crate owns the rules of a grid-based tile-matching puzzle: board
//! state, match detection, directional gravity after board rotations, and
//! the fill/cascade loop. It is deliberately headless: rendering, input
//! devices and animation timing live elsewhere and talk to the engine
//! through two gestures in ([`core::BoardEngine::select_cell`],
//! [`core::BoardEngine::request_rotate`]) and one callback out
//! ([`core::MoveListener`]).
//!
//! # Module Structure
//!
//! - [`core::board`]: the grid with its immutable playability mask
//! - [`core::matching`]: run detection, placement guard, valid-move probe
//! - [`core::gravity`]: one-pass directional compaction
//! - [`core::engine`]: selection, swaps, cascades, rotation, shuffle
//! - [`core::rng`]: deterministic LCG so sessions replay from one seed
//! - [`config`]: session configuration and playability-pattern parsing
//!
//! # Example
//!
//! ```
//! use gemgrid::config::EngineConfig;
//! use gemgrid::core::BoardEngine;
//! use gemgrid::types::RotateDir;
//!
//! let mut engine = BoardEngine::new(EngineConfig::default(), 12345).unwrap();
//!
//! // Click two adjacent cells to attempt a swap
//! engine.select_cell(3, 4);
//! engine.select_cell(3, 5);
//!
//! // Quarter-turn the board; gravity now pulls toward the left columns
//! engine.request_rotate(RotateDir::Right);
//! assert_eq!(engine.rotations_left(), 2);
//! ```

pub mod config;
pub mod core;
pub mod types;

pub use crate::config::{BoardPattern, EngineConfig};
pub use crate::core::{Board, BoardEngine, EngineSnapshot, MoveListener, NullListener, SimpleRng};
