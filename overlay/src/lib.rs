//! World Clock overlay library
//!
//! Software rendering of the clock container and its native window.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    manager                          │
//! │                  ClockWindow                        │
//! │     (implements ClockHost: cells + window)          │
//! ├─────────────────────────────────────────────────────┤
//! │                    widgets/                         │
//! │         seven_segment, clock_face, colors           │
//! ├─────────────────────────────────────────────────────┤
//! │                    renderer                         │
//! │            tiny-skia + cosmic-text                  │
//! │              (drawing primitives)                   │
//! ├─────────────────────────────────────────────────────┤
//! │                    platform/                        │
//! │                  x11, windows                       │
//! │            (OS window management)                   │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod manager;
pub mod platform;
pub mod renderer;
pub mod widgets;

// Re-export commonly used types
pub use manager::ClockWindow;
#[cfg(any(all(unix, not(target_os = "macos")), target_os = "windows"))]
pub use manager::NativeClockWindow;
#[cfg(any(all(unix, not(target_os = "macos")), target_os = "windows"))]
pub use platform::NativeOverlay;
pub use platform::{OverlayConfig, OverlayPlatform, PlatformError};
pub use renderer::{PixmapSurface, Renderer, Surface};

// Re-export tiny_skia Color for external use
pub use tiny_skia::Color;
