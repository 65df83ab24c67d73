//! Platform abstraction layer
//!
//! Host-side adapters the simulation depends on:
//! - Frame timing (wall clock to clamped frame delta)
//! - Input events (key presses to an intent snapshot)

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{Intent, KeyboardIntents};
