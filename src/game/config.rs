use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Highest starting speed accepted, in ticks per second
pub const MAX_BASE_SPEED: u32 = 1000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Caption shown in front of the status line
    pub title: String,
    /// Width of the board in pixels
    pub board_width: i32,
    /// Height of the board in pixels
    pub board_height: i32,
    /// Side of one grid cell in pixels
    pub cell_size: i32,
    /// Ticks per second for a fresh snake
    pub base_speed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Snake".to_string(),
            board_width: 640,
            board_height: 480,
            cell_size: 20,
            base_speed: 5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            board_width: width,
            board_height: height,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file, defaulting missing fields
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_size <= 0 {
            return Err(format!("cell_size must be positive, got {}", self.cell_size));
        }

        if self.board_width <= 0 || self.board_height <= 0 {
            return Err(format!(
                "board must be positive, got {}x{}",
                self.board_width, self.board_height
            ));
        }

        if self.board_width % self.cell_size != 0 || self.board_height % self.cell_size != 0 {
            return Err(format!(
                "board {}x{} is not a multiple of cell_size {}",
                self.board_width, self.board_height, self.cell_size
            ));
        }

        if !(1..=MAX_BASE_SPEED).contains(&self.base_speed) {
            return Err(format!(
                "base_speed must be in [1, {}], got {}",
                MAX_BASE_SPEED, self.base_speed
            ));
        }

        Ok(())
    }
}
