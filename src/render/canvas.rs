//! Drawing surface shared by every board entity
//!
//! Entities draw themselves onto a [`Surface`] through the [`Drawable`] trait.
//! [`CellCanvas`] is the surface the terminal renderer uses: a persistent
//! buffer with one cell per grid square, so anything not redrawn or erased
//! stays on screen between frames.

use std::ops::Range;

use crate::game::{Board, Position};

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const BOARD_BACKGROUND_COLOR: Color = Color::rgb(0, 0, 0);
pub const BORDER_COLOR: Color = Color::rgb(93, 216, 228);
pub const APPLE_COLOR: Color = Color::rgb(255, 0, 0);
pub const SNAKE_COLOR: Color = Color::rgb(0, 255, 0);

/// Axis-aligned rectangle in board pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The grid cell whose top-left corner is `pos`
    pub fn cell(pos: Position, cell_size: i32) -> Self {
        Self::new(pos.x, pos.y, cell_size, cell_size)
    }
}

/// Something entities can be drawn onto
pub trait Surface {
    /// Side of one grid cell in pixels
    fn cell_size(&self) -> i32;

    /// Paint the whole surface with one color
    fn fill(&mut self, color: Color);

    /// Paint a rectangle, or only its outline when `border_only` is set
    fn draw_rect(&mut self, color: Color, rect: Rect, border_only: bool);
}

/// A board entity that knows how to draw itself
pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface);
}

/// One grid square of a [`CellCanvas`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub fill: Color,
    pub border: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            fill: BOARD_BACKGROUND_COLOR,
            border: None,
        }
    }
}

/// Persistent cell buffer covering the whole board
#[derive(Debug, Clone, PartialEq)]
pub struct CellCanvas {
    columns: usize,
    rows: usize,
    cell_size: i32,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(board: &Board) -> Self {
        let columns = board.grid_width().max(0) as usize;
        let rows = board.grid_height().max(0) as usize;

        Self {
            columns,
            rows,
            cell_size: board.cell_size,
            cells: vec![Cell::default(); columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(self.cells[row * self.columns + column])
    }

    /// Cell under a board position
    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.cell(
            (pos.x / self.cell_size) as usize,
            (pos.y / self.cell_size) as usize,
        )
    }

    /// One row of cells, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    /// Cells touched by a pixel span, clipped to `0..limit`
    fn span(&self, start: i32, len: i32, limit: usize) -> Range<usize> {
        let end = start.saturating_add(len);
        if len <= 0 || end <= 0 {
            return 0..0;
        }

        let first = (start.max(0) / self.cell_size) as usize;
        let last = ((end + self.cell_size - 1) / self.cell_size) as usize;
        first.min(limit)..last.min(limit)
    }
}

impl Surface for CellCanvas {
    fn cell_size(&self) -> i32 {
        self.cell_size
    }

    fn fill(&mut self, color: Color) {
        self.cells.fill(Cell {
            fill: color,
            border: None,
        });
    }

    fn draw_rect(&mut self, color: Color, rect: Rect, border_only: bool) {
        let columns = self.span(rect.x, rect.width, self.columns);
        let rows = self.span(rect.y, rect.height, self.rows);

        for row in rows {
            for column in columns.clone() {
                let cell = &mut self.cells[row * self.columns + column];
                if border_only {
                    cell.border = Some(color);
                } else {
                    *cell = Cell {
                        fill: color,
                        border: None,
                    };
                }
            }
        }
    }
}
