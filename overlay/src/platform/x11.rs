//! X11 platform implementation for the clock container
//!
//! Uses XCB via x11rb. The window is override-redirect so the window manager
//! neither decorates nor moves it; stacking is handled here.

use x11rb::atom_manager;
use x11rb::connection::{Connection, RequestConnection as _};
use x11rb::protocol::Event;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use super::{OverlayConfig, OverlayPlatform, PlatformError};

/// Bytes reserved for the PutImage request header when splitting uploads
const PUT_IMAGE_HEADER_BYTES: usize = 64;

/// Left and right mouse buttons; either selects a clock
const SELECT_BUTTONS: [u8; 2] = [1, 3];

/// Restacking needed when always-on-top changes from `was` to `now`.
///
/// On top is re-raised every time; leaving on top lowers the window once.
fn stack_mode_for(was: bool, now: bool) -> Option<StackMode> {
    match (was, now) {
        (_, true) => Some(StackMode::ABOVE),
        (true, false) => Some(StackMode::BELOW),
        (false, false) => None,
    }
}

// Atoms needed for EWMH hints
atom_manager! {
    pub AtomCollection: AtomCollectionCookie {
        _NET_WM_NAME,
        _NET_WM_WINDOW_TYPE,
        _NET_WM_WINDOW_TYPE_DOCK,
        UTF8_STRING,
        ATOM,
    }
}

pub struct X11Overlay {
    conn: RustConnection,
    window: Window,
    gc: Gcontext,
    atoms: AtomCollection,
    depth: u8,
    screen_width: u32,
    screen_height: u32,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    always_on_top: bool,

    // Pixel buffers
    pixel_data: Vec<u8>,  // RGBA from renderer
    bgra_buffer: Vec<u8>, // Z_PIXMAP byte order

    pending_click: Option<(f32, f32)>,
    running: bool,
}

impl X11Overlay {
    /// Set the title and EWMH hints
    fn setup_window_hints(&self, title: &str) -> Result<(), PlatformError> {
        self.conn
            .change_property8(
                PropMode::REPLACE,
                self.window,
                self.atoms._NET_WM_NAME,
                self.atoms.UTF8_STRING,
                title.as_bytes(),
            )
            .map_err(|e| PlatformError::Other(e.to_string()))?;

        // Window type: dock (no decorations, no taskbar entry)
        self.conn
            .change_property32(
                PropMode::REPLACE,
                self.window,
                self.atoms._NET_WM_WINDOW_TYPE,
                self.atoms.ATOM,
                &[self.atoms._NET_WM_WINDOW_TYPE_DOCK],
            )
            .map_err(|e| PlatformError::Other(e.to_string()))?;

        Ok(())
    }

    fn raise(&self) {
        self.restack(StackMode::ABOVE);
    }

    fn restack(&self, mode: StackMode) {
        let _ = self.conn.configure_window(
            self.window,
            &ConfigureWindowAux::new().stack_mode(mode),
        );
        let _ = self.conn.flush();
    }

    fn resize_buffers(&mut self) {
        let size = (self.width * self.height * 4) as usize;
        self.pixel_data.resize(size, 0);
        self.bgra_buffer.resize(size, 0);
    }
}

impl OverlayPlatform for X11Overlay {
    fn new(config: OverlayConfig) -> Result<Self, PlatformError> {
        let (conn, screen_num) =
            x11rb::connect(None).map_err(|e| PlatformError::ConnectionFailed(e.to_string()))?;

        // Intern atoms
        let atoms = AtomCollection::new(&conn)
            .map_err(|e| PlatformError::Other(e.to_string()))?
            .reply()
            .map_err(|e| PlatformError::Other(e.to_string()))?;

        let setup = conn.setup();
        let screen = &setup.roots[screen_num];
        let root = screen.root;
        let depth = screen.root_depth;
        // Z_PIXMAP uploads below assume 32 bits per pixel
        if depth != 24 && depth != 32 {
            return Err(PlatformError::UnsupportedFeature(format!(
                "root depth {depth}, need 24 or 32"
            )));
        }
        let screen_width = screen.width_in_pixels as u32;
        let screen_height = screen.height_in_pixels as u32;

        let window = conn
            .generate_id()
            .map_err(|e| PlatformError::Other(e.to_string()))?;

        let win_aux = CreateWindowAux::new()
            .background_pixel(screen.white_pixel)
            .border_pixel(0)
            .event_mask(EventMask::EXPOSURE | EventMask::BUTTON_PRESS | EventMask::STRUCTURE_NOTIFY)
            .override_redirect(1);

        conn.create_window(
            depth,
            window,
            root,
            config.x as i16,
            config.y as i16,
            config.width.max(1) as u16,
            config.height.max(1) as u16,
            0,
            WindowClass::INPUT_OUTPUT,
            screen.root_visual,
            &win_aux,
        )
        .map_err(|e| PlatformError::Other(e.to_string()))?;

        // Create graphics context
        let gc = conn
            .generate_id()
            .map_err(|e| PlatformError::Other(e.to_string()))?;
        conn.create_gc(gc, window, &CreateGCAux::new())
            .map_err(|e| PlatformError::Other(e.to_string()))?;

        let size = (config.width * config.height * 4) as usize;
        let overlay = Self {
            conn,
            window,
            gc,
            atoms,
            depth,
            screen_width,
            screen_height,
            width: config.width,
            height: config.height,
            x: config.x,
            y: config.y,
            always_on_top: config.always_on_top,
            pixel_data: vec![0u8; size],
            bgra_buffer: vec![0u8; size],
            pending_click: None,
            running: true,
        };

        overlay.setup_window_hints(&config.namespace)?;

        // Map window
        overlay
            .conn
            .map_window(window)
            .map_err(|e| PlatformError::Other(e.to_string()))?;
        overlay
            .conn
            .flush()
            .map_err(|e| PlatformError::Other(e.to_string()))?;

        if overlay.always_on_top {
            overlay.raise();
        }

        tracing::debug!(
            window,
            depth,
            screen_width,
            screen_height,
            "X11 container window created"
        );
        Ok(overlay)
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
        (self.screen_width, self.screen_height)
    }

    fn set_position(&mut self, x: i32, y: i32) {
        if x == self.x && y == self.y {
            return;
        }
        self.x = x;
        self.y = y;

        let _ = self
            .conn
            .configure_window(self.window, &ConfigureWindowAux::new().x(x).y(y));
        let _ = self.conn.flush();
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.resize_buffers();

        let _ = self.conn.configure_window(
            self.window,
            &ConfigureWindowAux::new()
                .width(width.max(1))
                .height(height.max(1)),
        );
        let _ = self.conn.flush();
    }

    fn set_always_on_top(&mut self, on_top: bool) {
        let was_on_top = std::mem::replace(&mut self.always_on_top, on_top);
        if let Some(mode) = stack_mode_for(was_on_top, on_top) {
            self.restack(mode);
        }
    }

    fn take_pending_click(&mut self) -> Option<(f32, f32)> {
        self.pending_click.take()
    }

    fn pixel_buffer(&mut self) -> Option<&mut [u8]> {
        Some(&mut self.pixel_data)
    }

    fn commit(&mut self) {
        let stride = self.width as usize * 4;
        if stride == 0 || self.height == 0 {
            return;
        }

        // Convert RGBA to BGRA
        for (src, dst) in self
            .pixel_data
            .chunks_exact(4)
            .zip(self.bgra_buffer.chunks_exact_mut(4))
        {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = src[3];
        }

        // Split tall containers so no request exceeds the server limit
        let max_bytes = self
            .conn
            .maximum_request_bytes()
            .saturating_sub(PUT_IMAGE_HEADER_BYTES);
        let band_rows = (max_bytes / stride).max(1);

        for (band, rows) in self.bgra_buffer.chunks(stride * band_rows).enumerate() {
            let _ = self.conn.put_image(
                ImageFormat::Z_PIXMAP,
                self.window,
                self.gc,
                self.width as u16,
                (rows.len() / stride) as u16,
                0,
                (band * band_rows) as i16,
                0,
                self.depth,
                rows,
            );
        }
        let _ = self.conn.flush();
    }

    fn poll_events(&mut self) -> bool {
        while let Ok(Some(event)) = self.conn.poll_for_event() {
            match event {
                Event::ButtonPress(e) if SELECT_BUTTONS.contains(&e.detail) => {
                    self.pending_click = Some((e.event_x as f32, e.event_y as f32));
                }
                Event::Expose(e) if e.count == 0 => {
                    self.commit();
                }
                Event::DestroyNotify(e) if e.window == self.window => {
                    self.running = false;
                    return false;
                }
                _ => {}
            }
        }
        self.running
    }
}

impl Drop for X11Overlay {
    fn drop(&mut self) {
        let _ = self.conn.destroy_window(self.window);
        let _ = self.conn.free_gc(self.gc);
        let _ = self.conn.flush();
    }
}
