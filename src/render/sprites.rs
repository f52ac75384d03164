use super::canvas::{
    APPLE_COLOR, BOARD_BACKGROUND_COLOR, BORDER_COLOR, Drawable, Rect, SNAKE_COLOR, Surface,
};
use crate::game::{Apple, Snake};

impl Drawable for Snake {
    /// Paints every segment, then erases the cell the tail just left
    fn draw(&self, surface: &mut dyn Surface) {
        let size = surface.cell_size();

        for position in &self.positions {
            let rect = Rect::cell(*position, size);
            surface.draw_rect(SNAKE_COLOR, rect, false);
            surface.draw_rect(BORDER_COLOR, rect, true);
        }

        if let Some(last) = self.last {
            surface.draw_rect(BOARD_BACKGROUND_COLOR, Rect::cell(last, size), false);
        }
    }
}

impl Drawable for Apple {
    fn draw(&self, surface: &mut dyn Surface) {
        let rect = Rect::cell(self.position, surface.cell_size());
        surface.draw_rect(APPLE_COLOR, rect, false);
        surface.draw_rect(BORDER_COLOR, rect, true);
    }
}
