//! Glyph cell geometry
//!
//! Every clock occupies one fixed-size cell. The digit and colon sizes are
//! shared with the seven-segment renderer so that the layout manager and the
//! renderer agree on where each clock ends.

use std::time::Duration;

/// Width of one seven-segment digit, including spacing
pub const DIGIT_WIDTH: u32 = 18;
/// Height of one seven-segment digit
pub const DIGIT_HEIGHT: u32 = 34;
/// Width of a colon glyph, including spacing
pub const COLON_WIDTH: u32 = 5;
/// Horizontal inset of the first digit inside the cell
pub const FACE_X_OFFSET: u32 = 3;
/// Vertical inset of the digits inside the cell
pub const FACE_Y_OFFSET: u32 = 2;
/// Extra room below the digits for the label
const LABEL_AREA_HEIGHT: u32 = 15;
/// Padding added to the digit run on top of the inset
const FACE_PADDING: u32 = 6;

/// Size of a clock cell for a given display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockMetrics {
    pub show_seconds: bool,
}

impl ClockMetrics {
    pub fn new(show_seconds: bool) -> Self {
        Self { show_seconds }
    }

    /// `HH:MM:SS` is six digits and two colons, `HH:MM` four and one
    pub fn cell_width(&self) -> u32 {
        if self.show_seconds {
            DIGIT_WIDTH * 6 + COLON_WIDTH * 2 + FACE_PADDING
        } else {
            DIGIT_WIDTH * 4 + COLON_WIDTH + FACE_PADDING
        }
    }

    pub fn cell_height(&self) -> u32 {
        DIGIT_HEIGHT + LABEL_AREA_HEIGHT
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width(), self.cell_height())
    }

    /// How often the host should tick: every second when seconds are shown,
    /// otherwise twice a minute.
    pub fn tick_period(&self) -> Duration {
        if self.show_seconds {
            Duration::from_secs(1)
        } else {
            Duration::from_secs(30)
        }
    }
}

impl Default for ClockMetrics {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_width_with_seconds() {
        assert_eq!(ClockMetrics::new(true).cell_width(), 118);
    }

    #[test]
    fn cell_width_without_seconds() {
        assert_eq!(ClockMetrics::new(false).cell_width(), 83);
    }

    #[test]
    fn cell_height_leaves_room_for_label() {
        assert_eq!(ClockMetrics::default().cell_height(), 49);
    }

    #[test]
    fn tick_period_follows_seconds_display() {
        assert_eq!(ClockMetrics::new(true).tick_period(), Duration::from_secs(1));
        assert_eq!(ClockMetrics::new(false).tick_period(), Duration::from_secs(30));
    }
}
