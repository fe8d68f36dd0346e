//! Configuration for the rain effect, with session persistence.
//!
//! The config is a plain serde struct read by the engine every frame.
//! Fields are stored as the user set them; the clamping accessors apply
//! the engine's bounds so out-of-range values never reach the simulation.

use std::{fs, io, path::PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use rain_core::{DEFAULT_POOL, FALLBACK_POOL};

/// Smallest allowed glyph cell size in logical pixels.
pub const MIN_GLYPH_SIZE: f32 = 8.0;
/// Density multiplier bounds (streams per column).
pub const MIN_DENSITY: f32 = 0.1;
pub const MAX_DENSITY: f32 = 8.0;

/// Appearance and simulation parameters, read each frame by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// Characters sampled for stream glyphs.
    pub charset: String,
    /// Glyph cell size in logical pixels.
    pub glyph_size: f32,
    /// Fall speed in grid rows per second.
    pub fall_speed: f32,
    /// Glyph mutation rate in Hz; 0 freezes glyphs.
    pub mutation_rate: f32,
    /// Streams per column multiplier.
    pub density: f32,
    /// Per-frame fade overlay alpha.
    pub fade: f32,
    /// Head glow intensity; 0 disables the glow.
    pub head_glow: f32,
    pub background_color: String,
    pub trail_color: String,
    pub head_color: String,
    /// Suspends both simulation and rendering.
    pub paused: bool,
    /// Snap draw positions to the glyph grid.
    pub prevent_overlap: bool,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            charset: DEFAULT_POOL.to_string(),
            glyph_size: 16.0,
            fall_speed: 8.0,
            mutation_rate: 12.0,
            density: 1.0,
            fade: 0.08,
            head_glow: 0.6,
            background_color: "#000000".to_string(),
            trail_color: "#00ff41".to_string(),
            head_color: "#c8ffc8".to_string(),
            paused: false,
            prevent_overlap: false,
        }
    }
}

impl RainConfig {
    /// Glyph size with the minimum clamp applied.
    pub fn glyph(&self) -> f32 {
        self.glyph_size.max(MIN_GLYPH_SIZE)
    }

    /// Density clamped to the supported range.
    pub fn density_clamped(&self) -> f32 {
        self.density.clamp(MIN_DENSITY, MAX_DENSITY)
    }

    /// The character pool to sample from. An empty charset falls back to
    /// the digit pool so sampling is always defined.
    pub fn pool(&self) -> Vec<char> {
        if self.charset.is_empty() {
            FALLBACK_POOL.chars().collect()
        } else {
            self.charset.chars().collect()
        }
    }

    /// Write the config to the session file.
    pub fn save(&self) -> io::Result<()> {
        let path = config_path().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no config directory available")
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, content)
    }
}

/// Load the previous session's config, or defaults when there is none or
/// the file does not parse.
pub fn load() -> RainConfig {
    let Some(path) = config_path() else {
        return RainConfig::default();
    };
    match fs::read_to_string(&path) {
        Ok(content) => toml::from_str(&content).unwrap_or_default(),
        Err(_) => RainConfig::default(),
    }
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ame").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let cfg = RainConfig::default();
        assert!(cfg.glyph() >= MIN_GLYPH_SIZE);
        assert!(cfg.density_clamped() >= MIN_DENSITY);
        assert!(cfg.density_clamped() <= MAX_DENSITY);
        assert!((0.0..=1.0).contains(&cfg.fade));
        assert!(!cfg.pool().is_empty());
    }

    #[test]
    fn test_glyph_size_minimum_clamp() {
        let cfg = RainConfig {
            glyph_size: 4.0,
            ..Default::default()
        };
        assert_eq!(cfg.glyph(), 8.0);

        let cfg = RainConfig {
            glyph_size: f32::NAN,
            ..Default::default()
        };
        assert_eq!(cfg.glyph(), 8.0);
    }

    #[test]
    fn test_density_clamps() {
        let cfg = RainConfig {
            density: 20.0,
            ..Default::default()
        };
        assert_eq!(cfg.density_clamped(), 8.0);

        let cfg = RainConfig {
            density: 0.01,
            ..Default::default()
        };
        assert_eq!(cfg.density_clamped(), 0.1);
    }

    #[test]
    fn test_empty_charset_falls_back_to_digits() {
        let cfg = RainConfig {
            charset: String::new(),
            ..Default::default()
        };
        assert_eq!(cfg.pool(), FALLBACK_POOL.chars().collect::<Vec<_>>());
    }

    #[test]
    fn test_toml_round_trip() {
        let cfg = RainConfig {
            fall_speed: 3.5,
            prevent_overlap: true,
            trail_color: "#a050ff".to_string(),
            ..Default::default()
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: RainConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let cfg: RainConfig = toml::from_str("fall_speed = 2.0\npaused = true\n").unwrap();
        assert_eq!(cfg.fall_speed, 2.0);
        assert!(cfg.paused);
        assert_eq!(cfg.glyph_size, 16.0);
        assert_eq!(cfg.charset, DEFAULT_POOL);
    }
}
