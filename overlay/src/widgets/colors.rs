use tiny_skia::Color;

#[inline]
pub fn black() -> Color {
    Color::from_rgba8(0, 0, 0, 255)
}

#[inline]
pub fn white() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

#[inline]
pub fn red() -> Color {
    Color::from_rgba8(255, 0, 0, 255)
}

// ─────────────────────────────────────────────────────────────────────────
// Clock Face Colors
// ─────────────────────────────────────────────────────────────────────────

/// Lit segment color
#[inline]
pub fn segment_lit() -> Color {
    red()
}

/// Unlit segments are drawn over the background so they disappear
#[inline]
pub fn segment_dark() -> Color {
    white()
}

#[inline]
pub fn face_background() -> Color {
    white()
}

#[inline]
pub fn face_border() -> Color {
    black()
}

#[inline]
pub fn label_text() -> Color {
    black()
}
