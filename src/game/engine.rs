use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use super::{
    board::Board,
    config::GameConfig,
    direction::Direction,
    state::{Apple, GameState, Position, Snake},
};

/// Self-collision is only checked once the body is longer than this
pub const COLLISION_THRESHOLD: usize = 4;

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate the apple this step
    pub ate_apple: bool,
    /// Whether the snake ran into itself and was reset
    pub collided: bool,
    /// Cell the tail left behind, for the renderer to erase
    pub vacated: Option<Position>,
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    board: Board,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from OS entropy
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose random choices repeat for a given seed
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let board = Board::from_config(&config);
        Self { config, board, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Fresh game: one-cell snake at the center heading right, apple anywhere
    pub fn new_game(&mut self) -> GameState {
        let snake = Snake::new(self.board.center(), self.config.base_speed);
        let apple = Apple::new(&self.board, &mut self.rng);

        GameState::new(snake, apple)
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        state.snake.update_direction();
        state.snake.advance(&self.board);

        let collided = self.resolve_self_collision(state);

        let ate_apple = state.snake.head() == state.apple.position;
        if ate_apple {
            state.snake.grow(state.apple.position);
            state.apple.relocate(&self.board, &mut self.rng);
            debug!(
                length = state.snake.length,
                speed = state.snake.speed,
                "apple eaten"
            );
        }

        state.ticks += 1;

        StepResult {
            ate_apple,
            collided,
            vacated: state.snake.last,
        }
    }

    /// Reset the snake if its head sits on its own body.
    ///
    /// Returns true when a reset happened.
    pub fn resolve_self_collision(&mut self, state: &mut GameState) -> bool {
        if !state.snake.bites_itself(COLLISION_THRESHOLD) {
            return false;
        }

        info!(length = state.snake.length, tick = state.ticks, "snake bit itself");

        let direction = Direction::random(&mut self.rng);
        state
            .snake
            .reset(self.board.center(), direction, self.config.base_speed);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::seeded(GameConfig::default(), 1)
    }

    /// A state whose apple is parked away from the snake's row
    fn state_with_apple(engine: &mut GameEngine, apple: Position) -> GameState {
        let mut state = engine.new_game();
        state.apple = Apple::at(apple);
        state
    }

    #[test]
    fn test_new_game() {
        let mut engine = engine();
        let state = engine.new_game();

        assert_eq!(state.snake.positions, vec![Position::new(320, 240)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.speed, 5);
        assert_eq!(state.ticks, 0);
        assert!(engine.board().contains(state.apple.position));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = state_with_apple(&mut engine, Position::new(0, 0));

        let result = engine.step(&mut state);

        assert!(!result.ate_apple);
        assert!(!result.collided);
        assert_eq!(state.snake.head(), Position::new(340, 240));
        assert_eq!(result.vacated, Some(Position::new(320, 240)));
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_full_row_wraps_back_to_start() {
        let mut engine = engine();
        let mut state = state_with_apple(&mut engine, Position::new(0, 0));

        for _ in 0..32 {
            engine.step(&mut state);
            assert!(engine.board().contains(state.snake.head()));
            assert_eq!(state.snake.positions.len(), 1);
        }

        assert_eq!(state.snake.head(), Position::new(320, 240));
    }

    #[test]
    fn test_head_stays_on_board_while_turning() {
        let mut engine = engine();
        let mut state = state_with_apple(&mut engine, Position::new(0, 0));
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

        for i in 0..200 {
            if i % 7 == 0 {
                state.snake.request_direction(turns[(i / 7) % turns.len()]);
            }
            engine.step(&mut state);
            assert!(engine.board().contains(state.snake.head()));
        }
    }

    #[test]
    fn test_pending_turn_applies_on_next_step() {
        let mut engine = engine();
        let mut state = state_with_apple(&mut engine, Position::new(0, 0));

        assert!(state.snake.request_direction(Direction::Up));
        assert_eq!(state.snake.direction, Direction::Right);

        engine.step(&mut state);

        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.snake.head(), Position::new(320, 220));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut state = state_with_apple(&mut engine, Position::new(0, 0));
        state.snake.direction = Direction::Up;

        state.snake.request_direction(Direction::Down);
        engine.step(&mut state);

        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.snake.head(), Position::new(320, 220));
    }

    #[test]
    fn test_apple_consumption() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 99);
        let mut state = state_with_apple(&mut engine, Position::new(340, 240));

        // Replay the engine's draws: first the apple of new_game(), then its replacement
        let board = *engine.board();
        let mut probe = StdRng::seed_from_u64(99);
        board.random_cell(&mut probe);
        let expected_apple = board.random_cell(&mut probe);

        let result = engine.step(&mut state);

        assert!(result.ate_apple);
        assert_eq!(state.snake.length, 2);
        assert_eq!(state.snake.speed, 6);
        assert_eq!(
            state.snake.positions,
            vec![Position::new(340, 240), Position::new(340, 240)]
        );
        assert_eq!(state.apple.position, expected_apple);
    }

    #[test]
    fn test_growth_settles_after_eating() {
        let mut engine = engine();
        let mut state = state_with_apple(&mut engine, Position::new(340, 240));

        engine.step(&mut state);
        state.apple = Apple::at(Position::new(0, 0));
        let result = engine.step(&mut state);

        assert_eq!(state.snake.positions.len(), state.snake.length);
        assert_eq!(result.vacated, Some(Position::new(340, 240)));
        assert_eq!(state.snake.head(), Position::new(360, 240));
    }

    #[test]
    fn test_self_collision_resets_snake() {
        let mut engine = engine();
        let mut state = state_with_apple(&mut engine, Position::new(0, 0));
        let a = Position::new(100, 100);
        state.snake.positions = vec![
            a,
            Position::new(120, 100),
            a,
            Position::new(100, 120),
            Position::new(120, 120),
        ];
        state.snake.length = 5;
        state.snake.speed = 9;

        assert!(engine.resolve_self_collision(&mut state));

        assert_eq!(state.snake.positions, vec![Position::new(320, 240)]);
        assert_eq!(state.snake.length, 1);
        assert_eq!(state.snake.speed, 5);
        assert_eq!(state.snake.pending_direction, None);
        assert!(Direction::ALL.contains(&state.snake.direction));
    }

    #[test]
    fn test_step_detects_self_collision() {
        let mut engine = engine();
        let mut state = state_with_apple(&mut engine, Position::new(0, 0));

        // Heading right from (100,100); the cell ahead is already body
        state.snake.positions = vec![
            Position::new(100, 100),
            Position::new(100, 120),
            Position::new(120, 120),
            Position::new(120, 100),
            Position::new(140, 100),
        ];
        state.snake.length = 5;
        state.snake.direction = Direction::Right;

        let result = engine.step(&mut state);

        assert!(result.collided);
        assert_eq!(result.vacated, None);
        assert_eq!(state.snake.positions.len(), 1);
        assert_eq!(state.snake.head(), engine.board().center());
    }

    #[test]
    fn test_short_snake_never_collides() {
        let mut engine = engine();
        let mut state = state_with_apple(&mut engine, Position::new(0, 0));
        let a = Position::new(100, 100);
        state.snake.positions = vec![a, Position::new(120, 100), a, Position::new(100, 120)];
        state.snake.length = 4;

        assert!(!engine.resolve_self_collision(&mut state));
        assert_eq!(state.snake.positions.len(), 4);
    }

    #[test]
    fn test_threshold_in_config_file_is_ignored() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "collision_threshold": 0 }"#).unwrap();
        assert!(config.validate().is_ok());

        let mut engine = GameEngine::seeded(config, 4);
        let mut state = state_with_apple(&mut engine, Position::new(0, 0));

        let result = engine.step(&mut state);

        assert!(!result.collided);
        assert_eq!(state.snake.head(), Position::new(340, 240));
    }

    #[test]
    fn test_eating_at_top_speed_does_not_overflow() {
        let mut config = GameConfig::default();
        config.base_speed = u32::MAX;
        let mut engine = GameEngine::seeded(config, 8);
        let mut state = state_with_apple(&mut engine, Position::new(340, 240));

        let result = engine.step(&mut state);

        assert!(result.ate_apple);
        assert_eq!(state.snake.speed, u32::MAX);
        assert_eq!(state.snake.length, 2);
    }
}
