//! Core game logic module for Snake
//!
//! This module contains all the game logic without any terminal or rendering dependencies.
//! Randomness comes in through the engine's generator, so a seeded engine replays exactly.

pub mod board;
pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use board::Board;
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use state::{Apple, GameState, Position, Snake};
