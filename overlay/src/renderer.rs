//! Software renderer using tiny-skia and cosmic-text
//!
//! All drawing happens on the CPU into an RGBA pixel buffer owned by the
//! platform window. [`Surface`] is the drawing interface the widgets use;
//! [`PixmapSurface`] binds a [`Renderer`] to one such buffer.
#![allow(clippy::too_many_arguments)]
use std::collections::HashMap;

use cosmic_text::{
    Attrs, Buffer, Color as CosmicColor, Family, FontSystem, LayoutGlyph, Metrics, Shaping,
    SwashCache,
};
use tiny_skia::{Color, LineCap, Paint, PathBuilder, PixmapMut, Rect, Stroke, Transform};

/// Maximum number of shaped labels kept around
const TEXT_CACHE_MAX_ENTRIES: usize = 64;

/// Drawing operations the clock widgets need
pub trait Surface {
    /// Stroke a straight line
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Color);

    /// Fill an axis-aligned rectangle
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Draw text with its baseline at `y`
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color);

    /// Measure text as (width, height)
    fn measure_text(&mut self, text: &str, font_size: f32) -> (f32, f32);
}

/// Pre-shaped glyphs for one label at one size
struct CachedText {
    glyphs: Vec<LayoutGlyph>,
    width: f32,
    height: f32,
}

/// Key for text cache: (text content, font size in tenths)
type TextCacheKey = (String, u32);

/// A software renderer for clock content
pub struct Renderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    text_cache: HashMap<TextCacheKey, CachedText>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            text_cache: HashMap::with_capacity(TEXT_CACHE_MAX_ENTRIES),
        }
    }

    /// Shape `text` if it is not cached yet. Returns (width, height).
    fn ensure_cached(&mut self, text: &str, font_size: f32) -> (f32, f32) {
        let key = (text.to_string(), (font_size * 10.0).round() as u32);
        if let Some(cached) = self.text_cache.get(&key) {
            return (cached.width, cached.height);
        }

        // Labels change rarely; start over rather than tracking recency
        if self.text_cache.len() >= TEXT_CACHE_MAX_ENTRIES {
            self.text_cache.clear();
        }

        let metrics = Metrics::new(font_size, font_size * 1.2);
        let mut text_buffer = Buffer::new(&mut self.font_system, metrics);
        let attrs = Attrs::new().family(Family::SansSerif);
        text_buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        text_buffer.shape_until_scroll(&mut self.font_system, false);

        let mut glyphs = Vec::new();
        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for run in text_buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
            glyphs.extend(run.glyphs.iter().cloned());
        }

        self.text_cache.insert(
            key,
            CachedText {
                glyphs,
                width,
                height,
            },
        );
        (width, height)
    }

    /// Create a new pixel buffer (RGBA format)
    pub fn create_buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0u8; (width * height * 4) as usize]
    }

    /// Clear a pixel buffer with a color
    pub fn clear(&self, buffer: &mut [u8], width: u32, height: u32, color: Color) {
        if let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) {
            pixmap.fill(color);
        }
    }

    /// Draw a filled rectangle
    pub fn fill_rect(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) else {
            return;
        };
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(color);
        // Segments sit on whole pixels; keep their edges crisp
        paint.anti_alias = false;

        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Stroke a straight line with square caps
    pub fn stroke_line(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        stroke_width: f32,
        color: Color,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) else {
            return;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
        let Some(path) = pb.finish() else { return };

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = false;

        let stroke = Stroke {
            width: stroke_width,
            line_cap: LineCap::Butt,
            ..Default::default()
        };

        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// Draw text at the specified position (uses shaping cache)
    pub fn draw_text(
        &mut self,
        buffer: &mut [u8],
        buf_width: u32,
        buf_height: u32,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        color: Color,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(buffer, buf_width, buf_height) else {
            return;
        };

        self.ensure_cached(text, font_size);
        let key = (text.to_string(), (font_size * 10.0).round() as u32);
        let Some(cached) = self.text_cache.get(&key) else {
            return;
        };

        let text_color = CosmicColor::rgba(
            (color.red() * 255.0) as u8,
            (color.green() * 255.0) as u8,
            (color.blue() * 255.0) as u8,
            (color.alpha() * 255.0) as u8,
        );

        for glyph in &cached.glyphs {
            let physical_glyph = glyph.physical((x, y), 1.0);
            let Some(image) = self
                .swash_cache
                .get_image(&mut self.font_system, physical_glyph.cache_key)
            else {
                continue;
            };

            draw_glyph_to_pixmap(
                &mut pixmap,
                &image.data,
                image.placement.width,
                image.placement.height,
                physical_glyph.x + image.placement.left,
                physical_glyph.y - image.placement.top,
                text_color,
            );
        }
    }

    /// Measure text dimensions (uses shaping cache)
    pub fn measure_text(&mut self, text: &str, font_size: f32) -> (f32, f32) {
        self.ensure_cached(text, font_size)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Renderer`] bound to one RGBA buffer
pub struct PixmapSurface<'a> {
    renderer: &'a mut Renderer,
    buffer: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> PixmapSurface<'a> {
    pub fn new(renderer: &'a mut Renderer, buffer: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            renderer,
            buffer,
            width,
            height,
        }
    }
}

impl Surface for PixmapSurface<'_> {
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Color) {
        self.renderer.stroke_line(
            self.buffer,
            self.width,
            self.height,
            x0,
            y0,
            x1,
            y1,
            width,
            color,
        );
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.renderer
            .fill_rect(self.buffer, self.width, self.height, x, y, w, h, color);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        self.renderer.draw_text(
            self.buffer,
            self.width,
            self.height,
            text,
            x,
            y,
            font_size,
            color,
        );
    }

    fn measure_text(&mut self, text: &str, font_size: f32) -> (f32, f32) {
        self.renderer.measure_text(text, font_size)
    }
}

/// Draw a glyph image onto a pixmap with alpha blending
fn draw_glyph_to_pixmap(
    pixmap: &mut PixmapMut,
    glyph_data: &[u8],
    glyph_width: u32,
    glyph_height: u32,
    dest_x: i32,
    dest_y: i32,
    color: CosmicColor,
) {
    let pixmap_width = pixmap.width() as i32;
    let pixmap_height = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for gy in 0..glyph_height as i32 {
        let py = dest_y + gy;
        if py < 0 || py >= pixmap_height {
            continue;
        }

        for gx in 0..glyph_width as i32 {
            let px = dest_x + gx;
            if px < 0 || px >= pixmap_width {
                continue;
            }

            let glyph_idx = (gy as u32 * glyph_width + gx as u32) as usize;
            let Some(&alpha) = glyph_data.get(glyph_idx) else {
                continue;
            };
            if alpha == 0 {
                continue;
            }

            let pixel_idx = ((py * pixmap_width + px) * 4) as usize;
            if pixel_idx + 3 >= data.len() {
                continue;
            }

            let src_a = (alpha as u32 * color.a() as u32) / 255;
            let inv_a = 255 - src_a;
            let blend = |src: u8, dst: u8| ((src as u32 * src_a + dst as u32 * inv_a) / 255) as u8;

            data[pixel_idx] = blend(color.r(), data[pixel_idx]);
            data[pixel_idx + 1] = blend(color.g(), data[pixel_idx + 1]);
            data[pixel_idx + 2] = blend(color.b(), data[pixel_idx + 2]);
            data[pixel_idx + 3] = (src_a + (data[pixel_idx + 3] as u32 * inv_a) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buffer: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [buffer[i], buffer[i + 1], buffer[i + 2], buffer[i + 3]]
    }

    #[test]
    fn clear_fills_every_pixel() {
        let renderer = Renderer::new();
        let mut buffer = Renderer::create_buffer(4, 3);
        renderer.clear(&mut buffer, 4, 3, Color::from_rgba8(255, 255, 255, 255));
        assert!(buffer.iter().all(|&b| b == 255));
    }

    #[test]
    fn vertical_line_covers_its_column() {
        let renderer = Renderer::new();
        let mut buffer = Renderer::create_buffer(10, 10);
        renderer.stroke_line(&mut buffer, 10, 10, 5.0, 2.0, 5.0, 8.0, 2.0, Color::from_rgba8(255, 0, 0, 255));

        assert_eq!(pixel(&buffer, 10, 4, 5), [255, 0, 0, 255]);
        assert_eq!(pixel(&buffer, 10, 5, 5), [255, 0, 0, 255]);
        assert_eq!(pixel(&buffer, 10, 7, 5), [0, 0, 0, 0]);
        assert_eq!(pixel(&buffer, 10, 5, 9), [0, 0, 0, 0]);
    }

    #[test]
    fn fill_rect_outside_buffer_is_ignored() {
        let renderer = Renderer::new();
        let mut buffer = Renderer::create_buffer(4, 4);
        renderer.fill_rect(&mut buffer, 4, 4, 10.0, 10.0, 2.0, 2.0, Color::from_rgba8(0, 0, 255, 255));
        assert!(buffer.iter().all(|&b| b == 0));
    }
}
