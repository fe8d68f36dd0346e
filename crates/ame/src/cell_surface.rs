//! Terminal cell surface: a persistent color buffer that emulates
//! canvas-style fade compositing on a character grid.
//!
//! Each cell keeps its glyph and a floating-point foreground color. The
//! per-frame fade overlay blends every cell toward the background instead
//! of clearing, so glyphs linger and dim over successive frames exactly
//! like the translucent-rectangle trick on a pixel canvas.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use rain_core::Rgba;
use rain_engine::{Glow, Surface};

/// Channel distance below which a faded cell is considered fully erased.
const ERASE_EPSILON: f32 = 2.0;

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    fg: (f32, f32, f32),
}

/// Character-grid backend for the rain engine.
///
/// Reports its size in logical pixels (`cols × glyph, rows × glyph`) so
/// the engine's column math lands exactly on terminal cells. The device
/// pixel ratio of a terminal is 1:1 by construction.
#[derive(Debug)]
pub struct CellSurface {
    cols: u16,
    rows: u16,
    glyph: f32,
    background: (f32, f32, f32),
    cells: Vec<Cell>,
}

impl CellSurface {
    pub fn new() -> Self {
        Self {
            cols: 0,
            rows: 0,
            glyph: 1.0,
            background: (0.0, 0.0, 0.0),
            cells: Vec::new(),
        }
    }

    /// Match the buffer to the terminal dimensions, clearing it when they
    /// change.
    pub fn resize(&mut self, cols: u16, rows: u16, glyph: f32) {
        if cols == self.cols && rows == self.rows && glyph == self.glyph {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.glyph = glyph.max(1.0);
        self.cells = vec![
            Cell {
                ch: ' ',
                fg: self.background,
            };
            cols as usize * rows as usize
        ];
    }

    /// Build the frame's widget from the cell buffer.
    pub fn as_paragraph(&self) -> Paragraph<'static> {
        let bg = channel_color(self.background);
        let lines: Vec<Line> = (0..self.rows)
            .map(|row| {
                let spans: Vec<Span> = (0..self.cols)
                    .map(|col| {
                        let cell = self.cells[self.index(col, row)];
                        if cell.ch == ' ' {
                            Span::raw(" ")
                        } else {
                            let fg = channel_color(cell.fg);
                            Span::styled(cell.ch.to_string(), Style::new().fg(fg))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        Paragraph::new(lines).style(Style::new().bg(bg))
    }

    fn index(&self, col: u16, row: u16) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    #[cfg(test)]
    fn cell(&self, col: u16, row: u16) -> (char, (f32, f32, f32)) {
        let cell = self.cells[self.index(col, row)];
        (cell.ch, cell.fg)
    }
}

impl Default for CellSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a working-precision channel triple back to a terminal color.
fn channel_color(channels: (f32, f32, f32)) -> Color {
    Rgba::opaque(channels.0 as u8, channels.1 as u8, channels.2 as u8).to_ratatui()
}

impl Surface for CellSurface {
    fn size(&self) -> (f32, f32) {
        (self.cols as f32 * self.glyph, self.rows as f32 * self.glyph)
    }

    fn fade(&mut self, color: Rgba) {
        self.background = (color.r as f32, color.g as f32, color.b as f32);
        for cell in &mut self.cells {
            cell.fg = color.over(cell.fg);
            let erased = (cell.fg.0 - self.background.0).abs() < ERASE_EPSILON
                && (cell.fg.1 - self.background.1).abs() < ERASE_EPSILON
                && (cell.fg.2 - self.background.2).abs() < ERASE_EPSILON;
            if erased {
                cell.ch = ' ';
                cell.fg = self.background;
            }
        }
    }

    fn draw_glyph(&mut self, ch: char, x: f32, y: f32, color: Rgba, glow: Option<Glow>) {
        let col = (x / self.glyph).floor() as i32;
        let row = (y / self.glyph).floor() as i32;
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }

        let mut fg = (color.r as f32, color.g as f32, color.b as f32);
        if let Some(glow) = glow {
            // Terminal cells cannot blur; approximate the glow by pushing
            // the head color toward white, scaled by the radius.
            let boost = (glow.radius / 40.0).min(1.0) * 0.6;
            fg = (
                fg.0 + (255.0 - fg.0) * boost,
                fg.1 + (255.0 - fg.1) * boost,
                fg.2 + (255.0 - fg.2) * boost,
            );
        }

        let index = self.index(col as u16, row as u16);
        self.cells[index] = Cell { ch, fg };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

    fn surface() -> CellSurface {
        let mut s = CellSurface::new();
        s.resize(10, 5, 16.0);
        s
    }

    #[test]
    fn test_size_in_logical_pixels() {
        assert_eq!(surface().size(), (160.0, 80.0));
    }

    #[test]
    fn test_draw_maps_pixels_to_cells() {
        let mut s = surface();
        s.draw_glyph('x', 32.0, 48.0, Rgba::opaque(0, 255, 0), None);
        assert_eq!(s.cell(2, 3).0, 'x');
    }

    #[test]
    fn test_free_position_lands_between_rows() {
        let mut s = surface();
        // y = 23 px with 16 px cells falls in row 1
        s.draw_glyph('x', 0.0, 23.0, Rgba::opaque(0, 255, 0), None);
        assert_eq!(s.cell(0, 1).0, 'x');
    }

    #[test]
    fn test_offscreen_draws_are_ignored() {
        let mut s = surface();
        s.draw_glyph('x', -16.0, 0.0, Rgba::opaque(255, 0, 0), None);
        s.draw_glyph('x', 0.0, -16.0, Rgba::opaque(255, 0, 0), None);
        s.draw_glyph('x', 500.0, 0.0, Rgba::opaque(255, 0, 0), None);
        s.draw_glyph('x', 0.0, 500.0, Rgba::opaque(255, 0, 0), None);
        for row in 0..5 {
            for col in 0..10 {
                assert_eq!(s.cell(col, row).0, ' ');
            }
        }
    }

    #[test]
    fn test_fade_converges_and_erases() {
        let mut s = surface();
        s.draw_glyph('x', 0.0, 0.0, Rgba::opaque(0, 255, 0), None);

        let overlay = Rgba::new(0, 0, 0, 0.2);
        s.fade(overlay);
        let (ch, fg) = s.cell(0, 0);
        assert_eq!(ch, 'x');
        assert!(fg.1 < 255.0 && fg.1 > 0.0);

        for _ in 0..100 {
            s.fade(overlay);
        }
        assert_eq!(s.cell(0, 0).0, ' ');
    }

    #[test]
    fn test_glow_brightens_head_color() {
        let mut s = surface();
        s.draw_glyph('x', 0.0, 0.0, Rgba::opaque(0, 200, 0), None);
        let plain = s.cell(0, 0).1;

        s.draw_glyph(
            'x',
            16.0,
            0.0,
            Rgba::opaque(0, 200, 0),
            Some(Glow {
                radius: 20.0,
                color: Rgba::opaque(0, 200, 0),
            }),
        );
        let glowing = s.cell(1, 0).1;
        assert!(glowing.0 > plain.0);
        assert!(glowing.1 > plain.1);
    }

    #[test]
    fn test_paragraph_carries_cell_colors() {
        let mut s = surface();
        s.draw_glyph('x', 0.0, 0.0, Rgba::opaque(0, 200, 50), None);

        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        s.as_paragraph().render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), "x");
        assert_eq!(cell.style().fg, Some(Color::Rgb(0, 200, 50)));
    }

    #[test]
    fn test_resize_clears_buffer() {
        let mut s = surface();
        s.draw_glyph('x', 0.0, 0.0, Rgba::opaque(0, 255, 0), None);
        s.resize(8, 4, 16.0);
        assert_eq!(s.cell(0, 0).0, ' ');
    }
}
