pub mod canvas;
pub mod renderer;
pub mod sprites;

pub use canvas::{CellCanvas, Color, Drawable, Rect, Surface};
pub use renderer::{Renderer, status_line};
