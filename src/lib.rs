//! The Snake - a real-time Snake game on a wrap-around grid
//!
//! This library provides:
//! - Core game logic (game module)
//! - Terminal rendering through a small drawing surface (render module)
//! - Keyboard mapping (input module)
//! - Session metrics such as the length record (metrics module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
