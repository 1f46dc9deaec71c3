//! One clock cell: border, seven-segment time and label

use tiny_skia::Color;

use super::colors;
use super::seven_segment::{SegmentStyle, draw_colon, draw_digit};
use crate::renderer::Surface;
use worldclock_core::metrics::{
    COLON_WIDTH, DIGIT_HEIGHT, DIGIT_WIDTH, FACE_X_OFFSET, FACE_Y_OFFSET,
};
use worldclock_core::{ClockFace, ClockMetrics, LocalTime, Rect};

/// Stroke width of every segment
const SEGMENT_WIDTH: f32 = 2.0;
const BORDER_WIDTH: f32 = 1.0;
const LABEL_FONT_SIZE: f32 = 11.0;
/// Gap between the bottom of the digits and the label baseline
const LABEL_BASELINE_GAP: f32 = 11.0;

/// Colors and pens for a clock cell
#[derive(Debug, Clone, Copy)]
pub struct ClockFaceStyle {
    pub lit: SegmentStyle,
    pub dark: SegmentStyle,
    pub background: Color,
    pub border: Color,
    pub label: Color,
}

impl Default for ClockFaceStyle {
    fn default() -> Self {
        Self {
            lit: SegmentStyle::new(colors::segment_lit(), SEGMENT_WIDTH),
            dark: SegmentStyle::new(colors::segment_dark(), SEGMENT_WIDTH),
            background: colors::face_background(),
            border: colors::face_border(),
            label: colors::label_text(),
        }
    }
}

/// Glyph sequence for a time: digits interleaved with colons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Digit(u8),
    Colon,
}

fn glyphs(time: LocalTime, show_seconds: bool) -> Vec<Glyph> {
    let mut out = vec![
        Glyph::Digit(time.hour / 10),
        Glyph::Digit(time.hour % 10),
        Glyph::Colon,
        Glyph::Digit(time.minute / 10),
        Glyph::Digit(time.minute % 10),
    ];
    if show_seconds {
        out.extend([
            Glyph::Colon,
            Glyph::Digit(time.second / 10),
            Glyph::Digit(time.second % 10),
        ]);
    }
    out
}

/// Draw a full clock cell at `cell`
pub fn draw_clock_face(
    surface: &mut impl Surface,
    cell: Rect,
    face: &ClockFace<'_>,
    metrics: ClockMetrics,
    style: &ClockFaceStyle,
) {
    let x0 = cell.x as f32;
    let y0 = cell.y as f32;
    let w = cell.width as f32;
    let h = cell.height as f32;

    surface.fill_rect(x0, y0, w, h, style.background);
    surface.fill_rect(x0, y0, w, BORDER_WIDTH, style.border);
    surface.fill_rect(x0, y0 + h - BORDER_WIDTH, w, BORDER_WIDTH, style.border);
    surface.fill_rect(x0, y0, BORDER_WIDTH, h, style.border);
    surface.fill_rect(x0 + w - BORDER_WIDTH, y0, BORDER_WIDTH, h, style.border);

    let mut x = x0 + FACE_X_OFFSET as f32;
    let y = y0 + FACE_Y_OFFSET as f32;
    for glyph in glyphs(face.time, metrics.show_seconds) {
        match glyph {
            Glyph::Digit(digit) => {
                draw_digit(surface, x, y, digit, style.lit, style.dark);
                x += DIGIT_WIDTH as f32;
            }
            Glyph::Colon => {
                draw_colon(surface, x, y, true, style.lit, style.dark);
                x += COLON_WIDTH as f32;
            }
        }
    }

    if !face.label.is_empty() {
        let (text_width, _) = surface.measure_text(face.label, LABEL_FONT_SIZE);
        let label_x = x0 + ((w - text_width) / 2.0).max(BORDER_WIDTH);
        let baseline = y + DIGIT_HEIGHT as f32 + LABEL_BASELINE_GAP;
        surface.draw_text(face.label, label_x, baseline, LABEL_FONT_SIZE, style.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::seven_segment::test_surface::{Op, RecordingSurface};

    fn face(label: &str, hour: u8, minute: u8, second: u8) -> ClockFace<'_> {
        ClockFace {
            label,
            time: LocalTime { hour, minute, second },
        }
    }

    fn digit_origins(ops: &[Op]) -> Vec<f32> {
        // Each digit strokes seven lines; the first (top) starts 2 right of the origin
        ops.iter()
            .filter_map(|op| match op {
                Op::Line { from, .. } => Some(from.0),
                _ => None,
            })
            .collect::<Vec<_>>()
            .chunks(7)
            .map(|digit| digit[0] - 2.0)
            .collect()
    }

    #[test]
    fn digits_advance_by_glyph_width() {
        let mut surface = RecordingSurface::default();
        let cell = Rect::new(0, 0, 118, 49);
        draw_clock_face(
            &mut surface,
            cell,
            &face("GMT", 12, 34, 56),
            ClockMetrics::new(true),
            &ClockFaceStyle::default(),
        );

        assert_eq!(
            digit_origins(&surface.ops),
            vec![3.0, 21.0, 44.0, 62.0, 85.0, 103.0]
        );
    }

    #[test]
    fn without_seconds_only_four_digits() {
        let mut surface = RecordingSurface::default();
        draw_clock_face(
            &mut surface,
            Rect::new(0, 0, 83, 49),
            &face("GMT", 9, 5, 0),
            ClockMetrics::new(false),
            &ClockFaceStyle::default(),
        );

        let lines = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Line { .. }))
            .count();
        assert_eq!(lines, 4 * 7);
        assert_eq!(digit_origins(&surface.ops), vec![3.0, 21.0, 44.0, 62.0]);
    }

    #[test]
    fn cell_origin_offsets_everything() {
        let mut surface = RecordingSurface::default();
        draw_clock_face(
            &mut surface,
            Rect::new(118, 49, 118, 49),
            &face("Tokyo", 0, 0, 0),
            ClockMetrics::new(true),
            &ClockFaceStyle::default(),
        );

        assert_eq!(
            surface.ops[0],
            Op::Rect {
                x: 118.0,
                y: 49.0,
                w: 118.0,
                h: 49.0,
                color: colors::face_background(),
            }
        );
        assert_eq!(digit_origins(&surface.ops)[0], 121.0);
    }

    #[test]
    fn label_is_centered_below_digits() {
        let mut surface = RecordingSurface::default();
        draw_clock_face(
            &mut surface,
            Rect::new(0, 0, 118, 49),
            &face("GMT", 1, 2, 3),
            ClockMetrics::new(true),
            &ClockFaceStyle::default(),
        );

        // RecordingSurface measures 6px per byte: (118 - 18) / 2
        let text = surface
            .ops
            .iter()
            .find(|op| matches!(op, Op::Text { .. }))
            .cloned();
        assert_eq!(
            text,
            Some(Op::Text {
                text: "GMT".to_string(),
                x: 50.0,
                y: 47.0,
            })
        );
    }

    #[test]
    fn glyph_sequence_splits_each_field() {
        let time = LocalTime { hour: 23, minute: 7, second: 9 };
        assert_eq!(
            glyphs(time, true),
            vec![
                Glyph::Digit(2),
                Glyph::Digit(3),
                Glyph::Colon,
                Glyph::Digit(0),
                Glyph::Digit(7),
                Glyph::Colon,
                Glyph::Digit(0),
                Glyph::Digit(9),
            ]
        );
    }
}
