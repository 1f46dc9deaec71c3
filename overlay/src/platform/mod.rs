//! Platform abstraction for the clock container window
//!
//! This module defines the trait that all platform backends must implement,
//! allowing the clock rendering code to be platform-agnostic.

use thiserror::Error;

#[cfg(all(unix, not(target_os = "macos")))]
pub mod x11;

#[cfg(target_os = "windows")]
pub mod windows;

/// Configuration for creating the container window
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Initial X position (from left edge of screen)
    pub x: i32,
    /// Initial Y position (from top edge of screen)
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Window title, also used by window rules
    pub namespace: String,
    pub always_on_top: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 118,
            height: 49,
            namespace: "World Clock".to_string(),
            always_on_top: false,
        }
    }
}

/// Errors that can occur in platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to connect to display server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Required protocol/feature not available
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
    /// Buffer/memory allocation failed
    #[error("Buffer error: {0}")]
    BufferError(String),
    /// Generic platform error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Trait that all platform backends must implement
pub trait OverlayPlatform: Sized {
    /// Create and show the window with the given configuration
    fn new(config: OverlayConfig) -> Result<Self, PlatformError>;

    /// Get the current width of the window
    fn width(&self) -> u32;

    /// Get the current height of the window
    fn height(&self) -> u32;

    /// Get the current X position
    fn x(&self) -> i32;

    /// Get the current Y position
    fn y(&self) -> i32;

    /// Size of the screen the window lives on
    fn screen_size(&self) -> (u32, u32);

    /// Move the window
    fn set_position(&mut self, x: i32, y: i32);

    /// Resize the window and its pixel buffer
    fn set_size(&mut self, width: u32, height: u32);

    /// Put the window above all normal windows, or back among them.
    ///
    /// Applying the current state again re-raises the window.
    fn set_always_on_top(&mut self, on_top: bool);

    /// Take a pending click position (if any)
    ///
    /// Returns window-relative coordinates of the last button press.
    /// The click is consumed (subsequent calls return None until next click).
    fn take_pending_click(&mut self) -> Option<(f32, f32)>;

    /// Get mutable access to the pixel buffer (RGBA format)
    /// Returns None if buffer is not ready
    fn pixel_buffer(&mut self) -> Option<&mut [u8]>;

    /// Commit the current pixel buffer to the screen
    fn commit(&mut self);

    /// Process pending platform events (non-blocking)
    /// Returns false if the window should close
    fn poll_events(&mut self) -> bool;

    /// Show a message to the user
    fn show_message(&mut self, title: &str, message: &str) {
        println!("[{title}] {message}");
    }
}

/// Re-export the appropriate platform for the current target
#[cfg(all(unix, not(target_os = "macos")))]
pub use x11::X11Overlay as NativeOverlay;

#[cfg(target_os = "windows")]
pub use windows::WindowsOverlay as NativeOverlay;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_errors_name_their_kind() {
        let err = PlatformError::ConnectionFailed("no display".to_string());
        assert_eq!(err.to_string(), "Connection failed: no display");

        let boxed: Box<dyn std::error::Error> = Box::new(PlatformError::Other("gone".to_string()));
        assert_eq!(boxed.to_string(), "Platform error: gone");
    }
}
