//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard and pointer/touch resolved to a horizontal intent)
//! - Canvas-to-field coordinate mapping
//! - Frame time to fixed simulation ticks

pub mod input;
pub mod step;
pub mod viewport;

pub use input::InputState;
pub use step::FixedStep;
pub use viewport::Viewport;
