use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color as TuiColor, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::canvas::{Cell, CellCanvas, Color};
use crate::game::Snake;
use crate::metrics::GameMetrics;

/// The live score line, also used as the window title
pub fn status_line(title: &str, snake: &Snake, record: usize) -> String {
    format!(
        "{} | Speed: {} | Length: {} | Record: {}",
        title, snake.speed, snake.length, record
    )
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        canvas: &CellCanvas,
        status: &str,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let header = self.render_status(status);
        frame.render_widget(header, chunks[0]);

        let board = self.render_board(canvas);
        frame.render_widget(board, chunks[1]);

        let footer = self.render_controls(metrics);
        frame.render_widget(footer, chunks[2]);
    }

    fn render_board(&self, canvas: &CellCanvas) -> Paragraph<'_> {
        let lines: Vec<Line> = (0..canvas.rows())
            .map(|row| Line::from(canvas.row(row).iter().map(cell_span).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(TuiColor::White)),
            )
            .alignment(Alignment::Center)
    }

    fn render_status<'a>(&self, status: &'a str) -> Paragraph<'a> {
        let text = vec![Line::from(vec![Span::styled(
            status,
            Style::default()
                .fg(TuiColor::Yellow)
                .add_modifier(Modifier::BOLD),
        )])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_controls(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(TuiColor::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(TuiColor::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(TuiColor::Red)),
            Span::raw(" to quit | "),
            Span::styled("Time: ", Style::default().fg(TuiColor::Yellow)),
            Span::raw(metrics.format_time()),
            Span::raw("  "),
            Span::styled("Resets: ", Style::default().fg(TuiColor::Yellow)),
            Span::raw(metrics.resets.to_string()),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn tui_color(color: Color) -> TuiColor {
    TuiColor::Rgb(color.r, color.g, color.b)
}

/// Two terminal columns per cell keep squares roughly square
fn cell_span(cell: &Cell) -> Span<'static> {
    let style = Style::default().bg(tui_color(cell.fill));

    match cell.border {
        Some(border) => Span::styled("[]", style.fg(tui_color(border))),
        None => Span::styled("  ", style),
    }
}
