//! Core types for the ame digital rain.
//!
//! This crate holds the leaf pieces shared by the engine and the terminal
//! front-end: color parsing and straight-alpha blending, the default
//! character pools, and the preset color themes.

mod chars;
mod color;
mod theme;

pub use chars::{DEFAULT_POOL, FALLBACK_POOL};
pub use color::{Rgba, hex_to_rgba};
pub use theme::Theme;
