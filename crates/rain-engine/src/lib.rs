//! Simulation and rendering engine for the ame digital rain.
//!
//! The engine owns the stream population and the column layout, reads a
//! [`rain_config::RainConfig`] every frame, and draws through the
//! [`Surface`] trait so terminal and test backends share one renderer.

mod engine;
mod layout;
mod stream;
mod surface;

pub use engine::{MAX_FRAME_DELTA, RainEngine};
pub use layout::Layout;
pub use stream::{SPEED_FACTOR, Stream, Tick, repopulate};
pub use surface::{Glow, Surface};
