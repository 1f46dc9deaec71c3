//! Clock drawing widgets
//!
//! # Available Widgets
//!
//! - [`seven_segment`] - Digit and colon glyphs
//! - [`draw_clock_face`] - A full clock cell built from those glyphs

mod clock_face;
pub mod colors;
pub mod seven_segment;

pub use clock_face::{ClockFaceStyle, draw_clock_face};
pub use seven_segment::{SegmentStyle, draw_colon, draw_digit};
