use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use the_snake::game::{GameConfig, GameEngine};
use the_snake::logging;
use the_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "the_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Board height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Side of one grid cell in pixels
    #[arg(long)]
    cell_size: Option<i32>,

    /// Starting speed in ticks per second
    #[arg(long)]
    speed: Option<u32>,

    /// Caption in front of the score line
    #[arg(long)]
    title: Option<String>,

    /// Seed for apple placement and reset directions
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(speed) = self.speed {
            config.base_speed = speed;
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }

        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    tracing::info!(?config, seed = ?cli.seed, "configuration loaded");

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::new(engine);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_file(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("the_snake_{}_{}.json", name, std::process::id()));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["the_snake"]);
        assert_eq!(cli.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_file_values_then_flag_overrides() {
        let path = config_file(
            "merge",
            r#"{ "title": "Zmeyka", "board_width": 400, "base_speed": 8 }"#,
        );
        let path_arg = path.to_string_lossy().into_owned();

        let from_file = Cli::parse_from(["the_snake", "--config", &path_arg])
            .game_config()
            .unwrap();
        let overridden =
            Cli::parse_from(["the_snake", "--config", &path_arg, "--speed", "12", "--title", "Snake"])
                .game_config()
                .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(from_file.title, "Zmeyka");
        assert_eq!(from_file.board_width, 400);
        assert_eq!(from_file.base_speed, 8);
        assert_eq!(from_file.board_height, 480);

        assert_eq!(overridden.title, "Snake");
        assert_eq!(overridden.base_speed, 12);
        assert_eq!(overridden.board_width, 400);
    }

    #[test]
    fn test_invalid_flag_fails_validation() {
        let path = config_file("invalid", r#"{ "board_width": 400 }"#);
        let path_arg = path.to_string_lossy().into_owned();

        let result =
            Cli::parse_from(["the_snake", "--config", &path_arg, "--cell-size", "30"]).game_config();
        std::fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("not a multiple of cell_size 30"));
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let cli = Cli::parse_from(["the_snake", "--config", "/nonexistent/the_snake.json"]);
        assert!(cli.game_config().is_err());
    }
}
