use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

use rain_config::RainConfig;
use rain_core::Theme;
use rain_engine::{MAX_FRAME_DELTA, RainEngine};

mod cell_surface;
use cell_surface::CellSurface;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let terminal = ratatui::init();
    let result = App::new().run(terminal);
    ratatui::restore();
    result
}

/// Frame pacing: how long to wait for input between frames.
const FRAME_POLL: Duration = Duration::from_millis(16);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Live appearance parameters, loaded from the previous session.
    config: RainConfig,
    /// Current preset theme, cycled with `t`.
    theme: Theme,
    /// The simulation and renderer.
    engine: RainEngine,
    /// Persistent cell buffer the engine draws into.
    surface: CellSurface,
    /// Timestamp of the previous tick.
    last_tick: Instant,
    /// Outcome of the most recent failed save, reported at exit.
    save_error: Option<io::Error>,
}

impl App {
    /// Construct a new instance of [`App`] from the saved session.
    pub fn new() -> Self {
        Self {
            running: false,
            config: rain_config::load(),
            theme: Theme::default(),
            engine: RainEngine::new(),
            surface: CellSurface::new(),
            last_tick: Instant::now(),
            save_error: None,
        }
    }

    /// Run the application's main loop: while running, wait for the next
    /// frame tick, then execute one simulation and render step.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.last_tick = Instant::now();
        while self.running {
            let now = Instant::now();
            let dt = clamp_delta(now.duration_since(self.last_tick));
            self.last_tick = now;

            terminal.draw(|frame| self.render(frame, dt))?;
            self.handle_crossterm_events()?;
        }
        // Session persistence on exit; a save failure from earlier in the
        // session surfaces here if this attempt does not clear it.
        self.record_save(self.config.save());
        match self.save_error.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Renders one frame of rain, plus the status line while paused.
    fn render(&mut self, frame: &mut Frame, dt: f32) {
        let area = frame.area();
        self.surface.resize(area.width, area.height, self.config.glyph());
        self.engine.render_frame(&mut self.surface, &self.config, dt);
        frame.render_widget(self.surface.as_paragraph(), area);

        if self.config.paused && area.height > 0 {
            let status = Line::from(vec![
                "paused".bold(),
                "  space".bold(),
                " resume  ".dark_gray(),
                "t".bold(),
                " theme  ".dark_gray(),
                "s".bold(),
                " save  ".dark_gray(),
                "q".bold(),
                " quit".dark_gray(),
            ])
            .centered();
            let bottom = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
            frame.render_widget(Paragraph::new(status).style(Style::new()), bottom);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// The poll timeout doubles as frame pacing.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_POLL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                // The next draw picks the new dimensions up from the frame
                // area and the engine repopulates on its own.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),

            (_, KeyCode::Char(' ')) => self.config.paused = !self.config.paused,
            (_, KeyCode::Char('o')) => self.config.prevent_overlap = !self.config.prevent_overlap,

            (_, KeyCode::Char('+') | KeyCode::Char('=')) => {
                self.config.fall_speed = (self.config.fall_speed + 1.0).min(60.0);
            }
            (_, KeyCode::Char('-')) => {
                self.config.fall_speed = (self.config.fall_speed - 1.0).max(0.5);
            }

            (_, KeyCode::Char(']')) => {
                self.config.density = (self.config.density + 0.1).min(8.0);
            }
            (_, KeyCode::Char('[')) => {
                self.config.density = (self.config.density - 0.1).max(0.1);
            }

            (_, KeyCode::Char('>')) => {
                self.config.glyph_size = (self.config.glyph_size + 2.0).min(64.0);
            }
            (_, KeyCode::Char('<')) => {
                self.config.glyph_size = (self.config.glyph_size - 2.0).max(8.0);
            }

            (_, KeyCode::Char('m')) => {
                self.config.mutation_rate = (self.config.mutation_rate + 2.0).min(60.0);
            }
            (_, KeyCode::Char('n')) => {
                self.config.mutation_rate = (self.config.mutation_rate - 2.0).max(0.0);
            }

            (_, KeyCode::Char('f')) => {
                self.config.fade = (self.config.fade + 0.01).min(1.0);
            }
            (_, KeyCode::Char('d')) => {
                self.config.fade = (self.config.fade - 0.01).max(0.01);
            }

            (_, KeyCode::Char('g')) => {
                self.config.head_glow = (self.config.head_glow + 0.25).min(4.0);
            }
            (_, KeyCode::Char('h')) => {
                self.config.head_glow = (self.config.head_glow - 0.25).max(0.0);
            }

            (_, KeyCode::Char('t')) => self.cycle_theme(),
            (_, KeyCode::Char('s')) => {
                let result = self.config.save();
                self.record_save(result);
            }
            (_, KeyCode::Char('r')) => {
                // Fresh entropy; the engine repopulates on the next frame
                self.engine = RainEngine::new();
            }
            _ => {}
        }
    }

    /// Remember the outcome of a save attempt so a failure can be
    /// reported at exit. The latest attempt wins: a save that succeeds
    /// clears any earlier failure.
    fn record_save(&mut self, result: io::Result<()>) {
        self.save_error = result.err();
    }

    /// Cycle through the preset color themes.
    fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        let (background, trail, head) = self.theme.colors();
        self.config.background_color = background.to_string();
        self.config.trail_color = trail.to_string();
        self.config.head_color = head.to_string();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Clamp a frame gap so a suspended terminal or a debugger pause cannot
/// make the next tick teleport every stream.
fn clamp_delta(elapsed: Duration) -> f32 {
    elapsed.as_secs_f32().min(MAX_FRAME_DELTA)
}
