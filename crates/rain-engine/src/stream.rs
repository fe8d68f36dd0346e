//! Falling stream simulation.

use rand::Rng;

use rain_config::{MAX_DENSITY, MIN_DENSITY};

/// Vertical speed in pixels/second is `fall_speed` (rows/s) × glyph size ×
/// this factor.
pub const SPEED_FACTOR: f32 = 1.2;

/// Chance that a recycled stream moves to a new random column, spreading
/// load across the viewport over time.
const RECYCLE_COLUMN_CHANCE: f64 = 0.2;

/// One falling column of text: a head glyph, the previous glyph trailing
/// one cell above it, and a mutation timer.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    /// Column slot this stream occupies. May go stale across a viewport
    /// shrink until the next repopulation; the renderer falls back to x=0.
    pub column: usize,
    /// Vertical position of the head in logical pixels. Negative while the
    /// stream is still above the viewport.
    pub y: f32,
    /// Currently displayed head glyph.
    pub head: char,
    /// Previous glyph, drawn as the trail.
    pub trail: char,
    /// Seconds accumulated toward the next mutation.
    pub char_timer: f32,
}

/// Per-tick simulation inputs shared by every stream.
#[derive(Debug, Clone, Copy)]
pub struct Tick<'a> {
    pub dt: f32,
    pub glyph: f32,
    pub viewport_h: f32,
    pub column_count: usize,
    pub fall_speed: f32,
    pub mutation_rate: f32,
    pub pool: &'a [char],
}

impl Stream {
    /// Spawn a stream on a random column, staggered somewhere above the
    /// viewport so the columns do not all arrive at once.
    pub fn spawn(
        column_count: usize,
        viewport_h: f32,
        pool: &[char],
        rng: &mut impl Rng,
    ) -> Self {
        let column = if column_count > 0 {
            rng.gen_range(0..column_count)
        } else {
            0
        };
        Self {
            column,
            y: -rng.gen_range(0.0..=1.0) * viewport_h.max(0.0),
            head: sample(pool, rng),
            trail: sample(pool, rng),
            char_timer: 0.0,
        }
    }

    /// Accumulate mutation time and reroll glyphs, draining every whole
    /// interval. The loop matters: a frame hitch or a very high rate can
    /// owe several mutations at once, and afterwards the timer is always
    /// below one interval.
    pub fn mutate(&mut self, dt: f32, rate: f32, pool: &[char], rng: &mut impl Rng) {
        if rate <= 0.0 {
            return;
        }
        let interval = 1.0 / rate;
        self.char_timer += dt;
        while self.char_timer >= interval {
            self.char_timer -= interval;
            self.trail = self.head;
            self.head = sample(pool, rng);
        }
    }

    /// Advance the head position by one tick.
    pub fn fall(&mut self, dt: f32, fall_speed: f32, glyph: f32) {
        self.y += fall_speed * glyph * SPEED_FACTOR * dt;
    }

    /// Whether the head has fallen past the bottom of the viewport.
    pub fn off_screen(&self, viewport_h: f32, glyph: f32) -> bool {
        self.y > viewport_h + glyph
    }

    /// Reset an off-screen stream in place: a new start height in the top
    /// half above the viewport, occasionally a new column, and a fresh
    /// glyph pair when mutation is enabled.
    pub fn recycle(
        &mut self,
        column_count: usize,
        viewport_h: f32,
        mutating: bool,
        pool: &[char],
        rng: &mut impl Rng,
    ) {
        self.y = -rng.gen_range(0.0..0.5) * viewport_h.max(0.0);
        if column_count > 0 && rng.gen_bool(RECYCLE_COLUMN_CHANCE) {
            self.column = rng.gen_range(0..column_count);
        }
        if mutating {
            self.head = sample(pool, rng);
            self.trail = sample(pool, rng);
        }
    }

    /// One full simulation step: mutate, fall, recycle when off screen.
    pub fn advance(&mut self, tick: &Tick, rng: &mut impl Rng) {
        self.mutate(tick.dt, tick.mutation_rate, tick.pool, rng);
        self.fall(tick.dt, tick.fall_speed, tick.glyph);
        if self.off_screen(tick.viewport_h, tick.glyph) {
            self.recycle(
                tick.column_count,
                tick.viewport_h,
                tick.mutation_rate > 0.0,
                tick.pool,
                rng,
            );
        }
    }
}

/// Discard and rebuild the stream population for a column count and
/// density. Pure reset: in-flight stream state is not migrated.
pub fn repopulate(
    column_count: usize,
    density: f32,
    viewport_h: f32,
    pool: &[char],
    rng: &mut impl Rng,
) -> Vec<Stream> {
    let density = density.clamp(MIN_DENSITY, MAX_DENSITY);
    let count = ((column_count as f32 * density).floor() as usize).max(1);
    (0..count)
        .map(|_| Stream::spawn(column_count, viewport_h, pool, rng))
        .collect()
}

/// Uniform draw from the pool, with replacement. An empty pool falls back
/// to digits so sampling is always defined.
pub(crate) fn sample(pool: &[char], rng: &mut impl Rng) -> char {
    if pool.is_empty() {
        return char::from(b'0' + rng.gen_range(0..10u8));
    }
    pool[rng.gen_range(0..pool.len())]
}
