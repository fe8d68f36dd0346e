//! Column layout derived from viewport width and glyph size.

/// Dense table of column x-positions for the current viewport.
///
/// Recomputed whenever the viewport width or the glyph size changes; a
/// recompute also triggers stream repopulation since the stream count
/// depends on the column count.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    columns: Vec<f32>,
}

impl Layout {
    /// Compute columns for a viewport width in logical pixels and a glyph
    /// size that has already been minimum-clamped.
    pub fn compute(width: f32, glyph: f32) -> Self {
        let count = if width > 0.0 && glyph > 0.0 {
            (width / glyph).floor() as usize
        } else {
            0
        };
        Self {
            columns: (0..count).map(|i| i as f32 * glyph).collect(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// X position for a column index. A stale index left over from a
    /// viewport shrink falls back to 0 instead of failing.
    pub fn column_x(&self, index: usize) -> f32 {
        self.columns.get(index).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count_and_positions() {
        let layout = Layout::compute(160.0, 16.0);
        assert_eq!(layout.column_count(), 10);
        assert_eq!(layout.column_x(0), 0.0);
        assert_eq!(layout.column_x(3), 48.0);
        assert_eq!(layout.column_x(9), 144.0);
    }

    #[test]
    fn test_partial_column_is_dropped() {
        let layout = Layout::compute(170.0, 16.0);
        assert_eq!(layout.column_count(), 10);
    }

    #[test]
    fn test_zero_width_yields_no_columns() {
        let layout = Layout::compute(0.0, 16.0);
        assert_eq!(layout.column_count(), 0);
    }

    #[test]
    fn test_stale_index_falls_back_to_zero() {
        let layout = Layout::compute(64.0, 16.0);
        assert_eq!(layout.column_x(999), 0.0);
    }
}
