//! Container window hosting every clock
//!
//! [`ClockWindow`] owns one platform window and its renderer. Each clock is a
//! cell of that window's pixel buffer; the registry drives it through
//! [`ClockHost`].

use std::collections::HashMap;

use crate::platform::{OverlayConfig, OverlayPlatform, PlatformError};
use crate::renderer::{PixmapSurface, Renderer};
use crate::widgets::{ClockFaceStyle, draw_clock_face};
use worldclock_core::{ClockFace, ClockHost, ClockId, ClockMetrics, HostError, Rect};

#[cfg(any(all(unix, not(target_os = "macos")), target_os = "windows"))]
use crate::platform::NativeOverlay;

/// Largest window side the platforms accept
const MAX_CONTAINER_EXTENT: u32 = u16::MAX as u32;

/// The container window backed by the native platform
#[cfg(any(all(unix, not(target_os = "macos")), target_os = "windows"))]
pub type NativeClockWindow = ClockWindow<NativeOverlay>;

/// The container window with its own renderer
pub struct ClockWindow<P: OverlayPlatform> {
    platform: P,
    renderer: Renderer,
    style: ClockFaceStyle,
    metrics: ClockMetrics,
    cells: HashMap<ClockId, Rect>,
    /// Pixels changed since the last commit
    dirty: bool,
}

impl<P: OverlayPlatform> ClockWindow<P> {
    /// Open the platform window. It stays empty until the first relayout.
    pub fn new(config: OverlayConfig, metrics: ClockMetrics) -> Result<Self, PlatformError> {
        let platform = P::new(config)?;
        Ok(Self::with_platform(platform, metrics))
    }

    pub fn with_platform(platform: P, metrics: ClockMetrics) -> Self {
        Self {
            platform,
            renderer: Renderer::new(),
            style: ClockFaceStyle::default(),
            metrics,
            cells: HashMap::new(),
            dirty: false,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Push pending drawing to the screen
    pub fn present(&mut self) {
        if std::mem::take(&mut self.dirty) {
            self.platform.commit();
        }
    }

    /// Poll for events (non-blocking)
    /// Returns false if the window should close
    pub fn poll_events(&mut self) -> bool {
        self.platform.poll_events()
    }

    /// Last click in container coordinates, if any
    pub fn take_pending_click(&mut self) -> Option<(i32, i32)> {
        self.platform
            .take_pending_click()
            .map(|(x, y)| (x.floor() as i32, y.floor() as i32))
    }

    /// Extent of the container along its long side with `count` clocks
    fn extent_with(&self, count: usize) -> u64 {
        let (cell_width, cell_height) = self.metrics.cell_size();
        cell_width.max(cell_height) as u64 * count as u64
    }

    fn clear(&mut self) {
        let width = self.platform.width();
        let height = self.platform.height();
        if let Some(buffer) = self.platform.pixel_buffer() {
            self.renderer
                .clear(buffer, width, height, self.style.background);
        }
        self.dirty = true;
    }
}

impl<P: OverlayPlatform> ClockHost for ClockWindow<P> {
    fn screen_size(&self) -> (u32, u32) {
        self.platform.screen_size()
    }

    fn create_clock(&mut self, id: ClockId) -> Result<(), HostError> {
        if self.extent_with(self.cells.len() + 1) > MAX_CONTAINER_EXTENT as u64 {
            return Err(HostError::ResourceExhausted {
                id,
                reason: format!(
                    "container would exceed {MAX_CONTAINER_EXTENT} pixels with {} clocks",
                    self.cells.len() + 1
                ),
            });
        }
        self.cells.insert(id, Rect::default());
        Ok(())
    }

    fn destroy_clock(&mut self, id: ClockId) {
        self.cells.remove(&id);
    }

    fn place_clock(&mut self, id: ClockId, cell: Rect) {
        if let Some(slot) = self.cells.get_mut(&id) {
            *slot = cell;
        }
    }

    fn place_container(&mut self, container: Rect, always_on_top: bool) {
        self.platform.set_size(container.width, container.height);
        self.platform.set_position(container.x, container.y);
        self.platform.set_always_on_top(always_on_top);
        self.clear();
    }

    fn draw_clock(&mut self, id: ClockId, face: &ClockFace<'_>) {
        let Some(&cell) = self.cells.get(&id) else {
            tracing::debug!(%id, "Draw for unknown clock ignored");
            return;
        };

        let width = self.platform.width();
        let height = self.platform.height();
        let Some(buffer) = self.platform.pixel_buffer() else {
            return;
        };
        let mut surface = PixmapSurface::new(&mut self.renderer, buffer, width, height);
        draw_clock_face(&mut surface, cell, face, self.metrics, &self.style);
        self.dirty = true;
    }

    fn notify(&mut self, title: &str, message: &str) {
        tracing::info!(title, message, "Notification");
        self.platform.show_message(title, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worldclock_core::{ClockRegistry, ClockSettings, LayoutConfig, LocalTime};

    /// In-memory platform for exercising the window without a display
    struct MemoryPlatform {
        width: u32,
        height: u32,
        x: i32,
        y: i32,
        always_on_top: bool,
        pixels: Vec<u8>,
        commits: usize,
        click: Option<(f32, f32)>,
        messages: Vec<String>,
    }

    impl OverlayPlatform for MemoryPlatform {
        fn new(config: OverlayConfig) -> Result<Self, PlatformError> {
            Ok(Self {
                width: config.width,
                height: config.height,
                x: config.x,
                y: config.y,
                always_on_top: config.always_on_top,
                pixels: vec![0; (config.width * config.height * 4) as usize],
                commits: 0,
                click: None,
                messages: Vec::new(),
            })
        }

        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn x(&self) -> i32 {
            self.x
        }

        fn y(&self) -> i32 {
            self.y
        }

        fn screen_size(&self) -> (u32, u32) {
            (1920, 1080)
        }

        fn set_position(&mut self, x: i32, y: i32) {
            self.x = x;
            self.y = y;
        }

        fn set_size(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
            self.pixels.resize((width * height * 4) as usize, 0);
        }

        fn set_always_on_top(&mut self, on_top: bool) {
            self.always_on_top = on_top;
        }

        fn take_pending_click(&mut self) -> Option<(f32, f32)> {
            self.click.take()
        }

        fn pixel_buffer(&mut self) -> Option<&mut [u8]> {
            Some(&mut self.pixels)
        }

        fn commit(&mut self) {
            self.commits += 1;
        }

        fn poll_events(&mut self) -> bool {
            true
        }

        fn show_message(&mut self, _title: &str, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    const RED: [u8; 4] = [255, 0, 0, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn window() -> ClockWindow<MemoryPlatform> {
        ClockWindow::new(OverlayConfig::default(), ClockMetrics::new(true)).unwrap()
    }

    fn pixel(window: &ClockWindow<MemoryPlatform>, x: u32, y: u32) -> [u8; 4] {
        let p = window.platform();
        let i = ((y * p.width + x) * 4) as usize;
        [p.pixels[i], p.pixels[i + 1], p.pixels[i + 2], p.pixels[i + 3]]
    }

    fn eight_o_clock() -> ClockFace<'static> {
        ClockFace {
            label: "",
            time: LocalTime { hour: 8, minute: 0, second: 0 },
        }
    }

    #[test]
    fn place_container_moves_and_resizes() {
        let mut window = window();
        window.place_container(Rect::new(1566, 0, 354, 49), true);

        let p = window.platform();
        assert_eq!((p.x, p.y, p.width, p.height), (1566, 0, 354, 49));
        assert!(p.always_on_top);
        assert_eq!(pixel(&window, 100, 20), WHITE);
    }

    #[test]
    fn draw_paints_segments_inside_the_cell() {
        let mut window = window();
        let id = ClockId::from_raw(1);
        window.create_clock(id).unwrap();
        window.place_container(Rect::new(0, 0, 118, 49), false);
        window.place_clock(id, Rect::new(0, 0, 118, 49));
        window.draw_clock(id, &eight_o_clock());

        // Border
        assert_eq!(pixel(&window, 0, 0), BLACK);
        assert_eq!(pixel(&window, 117, 48), BLACK);
        // First digit 0: top lit, middle dark
        assert_eq!(pixel(&window, 8, 2), RED);
        assert_eq!(pixel(&window, 8, 16), WHITE);
        // Second digit 8: middle lit
        assert_eq!(pixel(&window, 26, 16), RED);
        // Background below the digits
        assert_eq!(pixel(&window, 2, 45), WHITE);
    }

    #[test]
    fn second_cell_is_drawn_at_its_offset() {
        let mut window = window();
        let (a, b) = (ClockId::from_raw(1), ClockId::from_raw(2));
        window.create_clock(a).unwrap();
        window.create_clock(b).unwrap();
        window.place_container(Rect::new(0, 0, 236, 49), false);
        window.place_clock(a, Rect::new(0, 0, 118, 49));
        window.place_clock(b, Rect::new(118, 0, 118, 49));
        window.draw_clock(b, &eight_o_clock());

        assert_eq!(pixel(&window, 8, 2), WHITE);
        assert_eq!(pixel(&window, 118 + 8, 2), RED);
    }

    #[test]
    fn unknown_clock_is_not_drawn() {
        let mut window = window();
        window.draw_clock(ClockId::from_raw(9), &eight_o_clock());
        window.present();
        assert_eq!(window.platform().commits, 0);
    }

    #[test]
    fn present_commits_once_per_change() {
        let mut window = window();
        window.place_container(Rect::new(0, 0, 118, 49), false);
        window.present();
        window.present();
        assert_eq!(window.platform().commits, 1);
    }

    #[test]
    fn create_fails_past_the_window_size_limit() {
        let mut window = window();
        // 118 px per clock: 555 fit in 65535, 556 do not
        for raw in 0..555 {
            window.create_clock(ClockId::from_raw(raw)).unwrap();
        }
        let err = window.create_clock(ClockId::from_raw(555)).unwrap_err();
        assert!(matches!(err, HostError::ResourceExhausted { .. }));
    }

    #[test]
    fn clicks_are_reported_in_whole_pixels() {
        let mut window = window();
        window.platform.click = Some((130.7, 10.2));
        assert_eq!(window.take_pending_click(), Some((130, 10)));
        assert_eq!(window.take_pending_click(), None);
    }

    #[test]
    fn notify_reaches_the_platform() {
        let mut window = window();
        window.notify("World Clock", "Cannot delete the last clock");
        assert_eq!(window.platform().messages, vec!["Cannot delete the last clock"]);
    }

    #[test]
    fn registry_lays_out_the_window() {
        let clocks = [
            ClockSettings::new("GMT", 0),
            ClockSettings::new("Tokyo", 9),
            ClockSettings::new("New York", -5),
        ];
        let registry = ClockRegistry::new(
            window(),
            LayoutConfig::from_bits(LayoutConfig::ALIGN_RIGHT),
            ClockMetrics::new(true),
            &clocks,
        )
        .unwrap();

        let p = registry.host().platform();
        assert_eq!((p.x, p.y, p.width, p.height), (1566, 0, 354, 49));
        assert_eq!(registry.host().cells.len(), 3);
        // Every cell got a border
        for x in [0, 118, 236] {
            assert_eq!(pixel(registry.host(), x, 0), BLACK);
        }
    }
}
