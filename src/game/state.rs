use rand::Rng;
use std::time::Duration;

use super::{board::Board, direction::Direction};

/// A position on the board, in pixels, aligned to the cell grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one cell in a direction, without wrapping
    pub fn stepped(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }
}

/// The player-controlled snake
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Occupied cells, with head at index 0
    pub positions: Vec<Position>,
    /// Target number of segments
    pub length: usize,
    /// Ticks per second
    pub speed: u32,
    /// Current direction of movement
    pub direction: Direction,
    /// Turn requested since the last tick
    pub pending_direction: Option<Direction>,
    /// Cell given up by the tail on the last move
    pub last: Option<Position>,
}

impl Snake {
    /// A one-cell snake heading right
    pub fn new(start: Position, speed: u32) -> Self {
        Self {
            positions: vec![start],
            length: 1,
            speed,
            direction: Direction::Right,
            pending_direction: None,
            last: None,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.positions[0]
    }

    /// Queue a turn for the next tick.
    ///
    /// The request is dropped if it points straight back along the current
    /// direction. A later accepted request in the same tick replaces an earlier one.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }

        self.pending_direction = Some(direction);
        true
    }

    /// Apply the queued turn, if any
    pub fn update_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// Push a new head one cell ahead and drop the tail once past `length`.
    ///
    /// Returns the vacated tail cell, which is also kept in `last`.
    pub fn advance(&mut self, board: &Board) -> Option<Position> {
        let new_head = board.wrap(self.head().stepped(self.direction, board.cell_size));
        self.positions.insert(0, new_head);

        self.last = if self.positions.len() > self.length {
            self.positions.pop()
        } else {
            None
        };

        self.last
    }

    /// True if the head overlaps the body from index 2 on.
    ///
    /// Bodies of `threshold` cells or fewer are never checked.
    pub fn bites_itself(&self, threshold: usize) -> bool {
        if self.positions.len() <= threshold {
            return false;
        }

        let head = self.head();
        self.positions.iter().skip(2).any(|pos| *pos == head)
    }

    /// Eat at `at`: the cell is inserted right behind the head so the body
    /// extends this tick, and the snake gets longer and faster.
    pub fn grow(&mut self, at: Position) {
        self.positions.insert(1, at);
        self.length += 1;
        self.speed = self.speed.saturating_add(1);
    }

    /// Back to a single cell at `start`
    pub fn reset(&mut self, start: Position, direction: Direction, speed: u32) {
        self.positions.clear();
        self.positions.push(start);
        self.length = 1;
        self.speed = speed;
        self.direction = direction;
        self.pending_direction = None;
        self.last = None;
    }

    /// Delay between two ticks at the current speed
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.speed.max(1)))
    }

}

/// The apple the snake is chasing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apple {
    pub position: Position,
}

impl Apple {
    pub fn new<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Self {
        Self {
            position: board.random_cell(rng),
        }
    }

    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Move to a fresh random cell; the snake body is not avoided
    pub fn relocate<R: Rng + ?Sized>(&mut self, board: &Board, rng: &mut R) {
        self.position = board.random_cell(rng);
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Apple,
    pub ticks: u64,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, apple: Apple) -> Self {
        Self {
            snake,
            apple,
            ticks: 0,
        }
    }
}
