//! Preset color themes for the rain.

/// A background/trail/head color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Green,
    Purple,
    Amber,
    Ice,
}

impl Theme {
    /// Cycle to the next theme.
    pub fn next(self) -> Theme {
        match self {
            Theme::Green => Theme::Purple,
            Theme::Purple => Theme::Amber,
            Theme::Amber => Theme::Ice,
            Theme::Ice => Theme::Green,
        }
    }

    /// Hex colors as (background, trail, head).
    pub fn colors(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Theme::Green => ("#000000", "#00ff41", "#c8ffc8"),
            Theme::Purple => ("#050008", "#a050ff", "#f5cdff"),
            Theme::Amber => ("#080400", "#ffb000", "#ffebb4"),
            Theme::Ice => ("#000408", "#20b0ff", "#c8f5ff"),
        }
    }
}
