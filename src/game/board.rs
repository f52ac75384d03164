use rand::Rng;

use super::{config::GameConfig, state::Position};

/// The wrap-around playing field, measured in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Board {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.board_width, config.board_height, config.cell_size)
    }

    pub fn grid_width(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn grid_height(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Board center, where every snake starts
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Fold a position back onto the board; leaving one edge re-enters at the opposite one
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    /// Uniformly random cell across the whole grid, occupied or not
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(
            rng.gen_range(0..self.grid_width()) * self.cell_size,
            rng.gen_range(0..self.grid_height()) * self.cell_size,
        )
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board() -> Board {
        Board::new(640, 480, 20)
    }

    #[test]
    fn test_grid_dimensions() {
        let board = board();
        assert_eq!(board.grid_width(), 32);
        assert_eq!(board.grid_height(), 24);
        assert_eq!(board.center(), Position::new(320, 240));
    }

    #[test]
    fn test_wrap_each_edge() {
        let board = board();
        assert_eq!(board.wrap(Position::new(640, 240)), Position::new(0, 240));
        assert_eq!(board.wrap(Position::new(-20, 240)), Position::new(620, 240));
        assert_eq!(board.wrap(Position::new(100, 480)), Position::new(100, 0));
        assert_eq!(board.wrap(Position::new(100, -20)), Position::new(100, 460));
        assert_eq!(board.wrap(Position::new(100, 200)), Position::new(100, 200));
    }

    #[test]
    fn test_random_cell_is_grid_aligned() {
        let board = board();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let cell = board.random_cell(&mut rng);
            assert!(board.contains(cell));
            assert_eq!(cell.x % board.cell_size, 0);
            assert_eq!(cell.y % board.cell_size, 0);
        }
    }

    #[test]
    fn test_from_config() {
        let board = Board::from_config(&GameConfig::new(200, 100));
        assert_eq!(board, Board::new(200, 100, 20));
        assert_eq!(board.grid_width(), 10);
        assert_eq!(board.grid_height(), 5);
    }
}
