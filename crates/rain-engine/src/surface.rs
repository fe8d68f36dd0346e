//! Drawing surface abstraction consumed by the frame renderer.

use rain_core::Rgba;

/// Glow applied to a head glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Blur radius in logical pixels.
    pub radius: f32,
    pub color: Rgba,
}

/// A logical-pixel drawing surface.
///
/// Backends scale once by the device pixel ratio; every coordinate the
/// engine passes here is pre-scale. Drawing is infallible: a backend that
/// cannot honor a call degrades visually instead of erroring.
pub trait Surface {
    /// Viewport size in logical pixels.
    fn size(&self) -> (f32, f32);

    /// Composite a full-viewport rectangle over the previous frame using
    /// straight alpha. Called once per frame with the background color at
    /// the fade alpha; this partially erases old glyphs instead of
    /// clearing, which is what produces the trails.
    fn fade(&mut self, color: Rgba);

    /// Draw one glyph with its cell origin at (x, y).
    fn draw_glyph(&mut self, ch: char, x: f32, y: f32, color: Rgba, glow: Option<Glow>);
}
