//! The rain engine: owns the column layout and the stream population,
//! renders one frame per tick.

use rand::{Rng, SeedableRng, rngs::StdRng};

use rain_config::RainConfig;
use rain_core::hex_to_rgba;

use crate::{
    layout::Layout,
    stream::{self, Stream, Tick},
    surface::{Glow, Surface},
};

/// Upper bound on a frame delta in seconds. The driver clamps large gaps
/// (terminal suspended, debugger attached) so a single tick cannot
/// teleport every stream across the viewport.
pub const MAX_FRAME_DELTA: f32 = 0.05;

/// Simulation and render state for one rain instance.
///
/// All state lives here rather than in module globals so multiple
/// instances can coexist and tests can run deterministically with a
/// seeded random source.
#[derive(Debug)]
pub struct RainEngine<R = StdRng> {
    layout: Layout,
    streams: Vec<Stream>,
    last_width: f32,
    last_height: f32,
    last_glyph: f32,
    last_density: f32,
    rng: R,
}

impl RainEngine<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for RainEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RainEngine<R> {
    /// Build an engine around an explicit random source.
    pub fn with_rng(rng: R) -> Self {
        Self {
            layout: Layout::default(),
            streams: Vec::new(),
            last_width: -1.0,
            last_height: -1.0,
            last_glyph: -1.0,
            last_density: -1.0,
            rng,
        }
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    /// Mutable access to the stream population.
    pub fn streams_mut(&mut self) -> &mut Vec<Stream> {
        &mut self.streams
    }

    pub fn column_count(&self) -> usize {
        self.layout.column_count()
    }

    /// Recompute the column table and rebuild the stream population if the
    /// viewport, glyph size, or density changed since the last frame.
    /// Changes take effect immediately; in-flight stream state is
    /// discarded without transition.
    pub fn sync_layout(&mut self, width: f32, height: f32, cfg: &RainConfig) {
        let glyph = cfg.glyph();
        let density = cfg.density_clamped();
        let unchanged = width == self.last_width
            && height == self.last_height
            && glyph == self.last_glyph
            && density == self.last_density;
        if unchanged && !self.streams.is_empty() {
            return;
        }

        self.layout = Layout::compute(width, glyph);
        let pool = cfg.pool();
        self.streams = stream::repopulate(
            self.layout.column_count(),
            density,
            height,
            &pool,
            &mut self.rng,
        );
        self.last_width = width;
        self.last_height = height;
        self.last_glyph = glyph;
        self.last_density = density;
    }

    /// Render one frame and advance the simulation by `dt` seconds.
    ///
    /// A no-op while paused: nothing is drawn and nothing moves. Each
    /// stream is drawn at its pre-advance position and only moves for the
    /// next frame, so the visible head lags the internal `y` by one tick.
    pub fn render_frame<S: Surface>(&mut self, surface: &mut S, cfg: &RainConfig, dt: f32) {
        if cfg.paused {
            return;
        }
        let (width, height) = surface.size();
        self.sync_layout(width, height, cfg);

        surface.fade(hex_to_rgba(&cfg.background_color, cfg.fade));

        let glyph = cfg.glyph();
        let pool = cfg.pool();
        let head_color = hex_to_rgba(&cfg.head_color, 1.0);
        let trail_color = hex_to_rgba(&cfg.trail_color, 1.0);
        let glow = (cfg.head_glow > 0.0).then(|| Glow {
            radius: 10.0 * cfg.head_glow,
            color: head_color,
        });
        let column_count = self.layout.column_count();

        for s in &mut self.streams {
            s.mutate(dt, cfg.mutation_rate, &pool, &mut self.rng);

            let x = self.layout.column_x(s.column);
            let draw_y = if cfg.prevent_overlap {
                (s.y / glyph).round() * glyph
            } else {
                s.y
            };
            surface.draw_glyph(s.head, x, draw_y, head_color, glow);
            surface.draw_glyph(s.trail, x, draw_y - glyph, trail_color, None);

            s.fall(dt, cfg.fall_speed, glyph);
            if s.off_screen(height, glyph) {
                s.recycle(
                    column_count,
                    height,
                    cfg.mutation_rate > 0.0,
                    &pool,
                    &mut self.rng,
                );
            }
        }
    }

    /// Advance the simulation one tick without drawing.
    pub fn step(&mut self, width: f32, height: f32, cfg: &RainConfig, dt: f32) {
        if cfg.paused {
            return;
        }
        self.sync_layout(width, height, cfg);
        let pool = cfg.pool();
        let tick = Tick {
            dt,
            glyph: cfg.glyph(),
            viewport_h: height,
            column_count: self.layout.column_count(),
            fall_speed: cfg.fall_speed,
            mutation_rate: cfg.mutation_rate,
            pool: &pool,
        };
        for s in &mut self.streams {
            s.advance(&tick, &mut self.rng);
        }
    }
}
