//! Seven-segment digit and colon glyphs
//!
//! Segment numbering (bit `i` of a digit mask lights segment `i`):
//!
//! ```text
//!    ─0─
//!   5   1
//!    ─6─
//!   4   2
//!    ─3─
//! ```
//!
//! Every segment is always drawn, either in the lit or the dark style, so a
//! redraw fully overwrites the previous digit.

use tiny_skia::Color;

use crate::renderer::Surface;
use worldclock_core::metrics::DIGIT_HEIGHT;

/// Segment masks for digits 0 through 9
pub const DIGIT_MASKS: [u8; 10] = [0x3f, 0x06, 0x5b, 0x4f, 0x66, 0x6d, 0x7d, 0x07, 0x7f, 0x6f];

/// Segment endpoints `(x0, y0, x1, y1)` relative to the digit origin
pub const SEGMENTS: [(u8, u8, u8, u8); 7] = [
    (2, 0, 10, 0),
    (13, 2, 13, 12),
    (13, 16, 13, 26),
    (2, 28, 10, 28),
    (0, 16, 0, 26),
    (0, 2, 0, 12),
    (2, 14, 10, 14),
];

/// Side of each colon dot
const COLON_DOT_SIZE: f32 = 2.0;

/// Pen used for one segment state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub color: Color,
    pub width: f32,
}

impl SegmentStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Segment mask for `digit`, `None` outside 0..=9
pub fn digit_mask(digit: u8) -> Option<u8> {
    DIGIT_MASKS.get(digit as usize).copied()
}

/// Draw one digit with its top-left corner at `(x, y)`.
///
/// Digits above 9 draw nothing.
pub fn draw_digit(
    surface: &mut impl Surface,
    x: f32,
    y: f32,
    digit: u8,
    lit: SegmentStyle,
    dark: SegmentStyle,
) {
    let Some(mask) = digit_mask(digit) else {
        return;
    };

    for (i, &(x0, y0, x1, y1)) in SEGMENTS.iter().enumerate() {
        let style = if mask & (1 << i) != 0 { lit } else { dark };
        surface.stroke_line(
            x + x0 as f32,
            y + y0 as f32,
            x + x1 as f32,
            y + y1 as f32,
            style.width,
            style.color,
        );
    }
}

/// Draw a colon: two small squares at 30% and 60% of the digit height
pub fn draw_colon(
    surface: &mut impl Surface,
    x: f32,
    y: f32,
    on: bool,
    lit: SegmentStyle,
    dark: SegmentStyle,
) {
    let color = if on { lit.color } else { dark.color };
    for dot_y in [DIGIT_HEIGHT * 3 / 10, DIGIT_HEIGHT * 6 / 10] {
        surface.fill_rect(x, y + dot_y as f32, COLON_DOT_SIZE, COLON_DOT_SIZE, color);
    }
}


#[cfg(test)]
mod tests {
    use super::test_surface::{Op, RecordingSurface};
    use super::*;

    fn lit() -> SegmentStyle {
        SegmentStyle::new(Color::from_rgba8(255, 0, 0, 255), 2.0)
    }

    fn dark() -> SegmentStyle {
        SegmentStyle::new(Color::from_rgba8(255, 255, 255, 255), 2.0)
    }

    /// Indices of the segments drawn in the lit color
    fn lit_segments(digit: u8) -> Vec<usize> {
        let mut surface = RecordingSurface::default();
        draw_digit(&mut surface, 0.0, 0.0, digit, lit(), dark());
        assert_eq!(surface.ops.len(), 7);
        surface
            .ops
            .iter()
            .enumerate()
            .filter_map(|(i, op)| match op {
                Op::Line { color, .. } if *color == lit().color => Some(i),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn zero_lights_everything_but_the_middle() {
        assert_eq!(lit_segments(0), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn one_lights_the_right_side() {
        assert_eq!(lit_segments(1), vec![1, 2]);
    }

    #[test]
    fn eight_lights_everything() {
        assert_eq!(lit_segments(8), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn every_digit_matches_its_mask() {
        let expected: [&[usize]; 10] = [
            &[0, 1, 2, 3, 4, 5],
            &[1, 2],
            &[0, 1, 3, 4, 6],
            &[0, 1, 2, 3, 6],
            &[1, 2, 5, 6],
            &[0, 2, 3, 5, 6],
            &[0, 2, 3, 4, 5, 6],
            &[0, 1, 2],
            &[0, 1, 2, 3, 4, 5, 6],
            &[0, 1, 2, 3, 5, 6],
        ];
        for (digit, segments) in expected.iter().enumerate() {
            assert_eq!(lit_segments(digit as u8), segments.to_vec(), "digit {digit}");
        }
    }

    #[test]
    fn segments_are_offset_from_origin() {
        let mut surface = RecordingSurface::default();
        draw_digit(&mut surface, 21.0, 2.0, 7, lit(), dark());
        assert_eq!(
            surface.ops[1],
            Op::Line {
                from: (34.0, 4.0),
                to: (34.0, 14.0),
                color: lit().color,
            }
        );
        assert_eq!(
            surface.ops[6],
            Op::Line {
                from: (23.0, 16.0),
                to: (31.0, 16.0),
                color: dark().color,
            }
        );
    }

    #[test]
    fn out_of_range_digit_draws_nothing() {
        let mut surface = RecordingSurface::default();
        draw_digit(&mut surface, 0.0, 0.0, 10, lit(), dark());
        draw_digit(&mut surface, 0.0, 0.0, 255, lit(), dark());
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn colon_dots_at_thirty_and_sixty_percent() {
        let mut surface = RecordingSurface::default();
        draw_colon(&mut surface, 39.0, 2.0, true, lit(), dark());
        assert_eq!(
            surface.ops,
            vec![
                Op::Rect { x: 39.0, y: 12.0, w: 2.0, h: 2.0, color: lit().color },
                Op::Rect { x: 39.0, y: 22.0, w: 2.0, h: 2.0, color: lit().color },
            ]
        );
    }

    #[test]
    fn colon_off_uses_dark_style() {
        let mut surface = RecordingSurface::default();
        draw_colon(&mut surface, 0.0, 0.0, false, lit(), dark());
        assert!(surface
            .ops
            .iter()
            .all(|op| matches!(op, Op::Rect { color, .. } if *color == dark().color)));
    }
}
