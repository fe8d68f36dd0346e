//! Color parsing and blending for the rain renderer.

use ratatui::style::Color;

/// An RGB color carrying a straight (non-premultiplied) alpha component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Composite this color over an existing channel triple using straight
    /// alpha: `under × (1 − a) + self × a`.
    pub fn over(self, under: (f32, f32, f32)) -> (f32, f32, f32) {
        let a = self.a.clamp(0.0, 1.0);
        (
            under.0 + (self.r as f32 - under.0) * a,
            under.1 + (self.g as f32 - under.1) * a,
            under.2 + (self.b as f32 - under.2) * a,
        )
    }

    pub fn to_ratatui(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

/// Parse a `#rgb` or `#rrggbb` hex color and attach the given alpha.
///
/// Malformed input degrades to opaque black rather than failing: a bad
/// color string glitches the visuals, it never stops the loop.
pub fn hex_to_rgba(hex: &str, alpha: f32) -> Rgba {
    let a = alpha.clamp(0.0, 1.0);
    match parse_hex(hex) {
        Some((r, g, b)) => Rgba::new(r, g, b, a),
        None => Rgba::new(0, 0, 0, a),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let s = hex.strip_prefix('#').unwrap_or(hex);
    match s.len() {
        // #rgb expands each digit: 0xf -> 0xff
        3 => {
            let mut it = s.chars();
            let r = nibble(it.next()?)?;
            let g = nibble(it.next()?)?;
            let b = nibble(it.next()?)?;
            Some((r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn nibble(c: char) -> Option<u8> {
    c.to_digit(16).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        assert_eq!(hex_to_rgba("#00ff88", 0.5), Rgba::new(0, 255, 136, 0.5));
        assert_eq!(hex_to_rgba("#000000", 1.0), Rgba::opaque(0, 0, 0));
        // Leading '#' is optional
        assert_eq!(hex_to_rgba("00ff88", 1.0), Rgba::opaque(0, 255, 136));
    }

    #[test]
    fn test_parse_three_digit_hex() {
        // #0f8 expands to the same channels as #00ff88
        assert_eq!(hex_to_rgba("#0f8", 0.5), Rgba::new(0, 255, 136, 0.5));
        assert_eq!(hex_to_rgba("#fff", 1.0), Rgba::opaque(255, 255, 255));
    }

    #[test]
    fn test_malformed_hex_degrades_to_black() {
        assert_eq!(hex_to_rgba("", 0.3), Rgba::new(0, 0, 0, 0.3));
        assert_eq!(hex_to_rgba("#zzz", 1.0), Rgba::opaque(0, 0, 0));
        assert_eq!(hex_to_rgba("#12345", 1.0), Rgba::opaque(0, 0, 0));
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(hex_to_rgba("#fff", 2.0).a, 1.0);
        assert_eq!(hex_to_rgba("#fff", -1.0).a, 0.0);
    }

    #[test]
    fn test_to_ratatui_keeps_channels() {
        assert_eq!(Rgba::opaque(0, 255, 136).to_ratatui(), Color::Rgb(0, 255, 136));
        assert_eq!(
            hex_to_rgba("#0f8", 0.5).to_ratatui(),
            Color::Rgb(0, 255, 136)
        );
    }

    #[test]
    fn test_straight_alpha_over() {
        let black = Rgba::new(0, 0, 0, 0.5);
        assert_eq!(black.over((255.0, 255.0, 255.0)), (127.5, 127.5, 127.5));

        let opaque = Rgba::opaque(10, 20, 30);
        assert_eq!(opaque.over((200.0, 200.0, 200.0)), (10.0, 20.0, 30.0));

        let clear = Rgba::new(255, 255, 255, 0.0);
        assert_eq!(clear.over((5.0, 5.0, 5.0)), (5.0, 5.0, 5.0));
    }
}
