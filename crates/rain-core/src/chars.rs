//! Character pool constants for the rain effect.

/// Default glyph pool: katakana plus digits, the classic rain alphabet.
pub const DEFAULT_POOL: &str = "アイウエオカキクケコサシスセソタチツテト0123456789";

/// Pool substituted when the configured pool is empty, so sampling always
/// has something to draw from.
pub const FALLBACK_POOL: &str = "0123456789";
