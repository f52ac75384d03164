use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::game::{GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{
    CellCanvas, Drawable, Renderer, Surface, canvas::BOARD_BACKGROUND_COLOR, status_line,
};

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    canvas: CellCanvas,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(mut engine: GameEngine) -> Self {
        let state = engine.new_game();
        let canvas = CellCanvas::new(engine.board());

        Self {
            engine,
            state,
            canvas,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            board_width = self.engine.board().width,
            board_height = self.engine.board().height,
            cell_size = self.engine.board().cell_size,
            "game started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(record = self.metrics.record, resets = self.metrics.resets, "game closed");

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        self.canvas.fill(BOARD_BACKGROUND_COLOR);
        self.draw_entities();
        self.present(terminal)?;

        // Tick deadline follows the snake's speed, re-armed after every tick
        let tick = sleep(self.state.snake.tick_interval());
        tokio::pin!(tick);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, terminal)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                () = &mut tick => {
                    self.update_game();
                    self.present(terminal)?;
                    tick.as_mut().reset(Instant::now() + self.state.snake.tick_interval());
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(
        &mut self,
        event: Event,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Turn(direction) => {
                        if !self.state.snake.request_direction(direction) {
                            debug!(?direction, current = ?self.state.snake.direction, "reversal ignored");
                        }
                    }
                    KeyAction::Quit => {
                        info!("quit requested");
                        self.should_quit = true;
                    }
                    KeyAction::None => {}
                }
            }
            Event::Resize(_, _) => self.present(terminal)?,
            _ => {}
        }

        Ok(())
    }

    /// One tick: step the engine, then draw apple and snake onto the canvas
    fn update_game(&mut self) {
        let result = self.engine.step(&mut self.state);

        if result.collided {
            self.canvas.fill(BOARD_BACKGROUND_COLOR);
            self.metrics.on_reset();
        }
        self.metrics.observe_length(self.state.snake.length);

        self.draw_entities();
    }

    fn draw_entities(&mut self) {
        self.state.apple.draw(&mut self.canvas);
        self.state.snake.draw(&mut self.canvas);
    }

    fn status(&self) -> String {
        status_line(
            &self.engine.config().title,
            &self.state.snake,
            self.metrics.record,
        )
    }

    /// Push the canvas to the screen and refresh the window title
    fn present(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        let status = self.status();

        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, &self.canvas, &status, &self.metrics);
            })
            .context("Failed to draw frame")?;

        execute!(terminal.backend_mut(), SetTitle(&status)).context("Failed to set title")?;

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
