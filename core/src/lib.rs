//! World Clock core
//!
//! Platform-independent model of the clock display:
//!
//! - [`registry`]: ordered clocks, layout manager and tick driver
//! - [`layout`]: row/column placement and corner pinning
//! - [`clock`]: clock widgets and offset arithmetic
//! - [`metrics`]: glyph cell geometry shared with the renderer
//! - [`host`]: trait implemented by the windowing layer
//! - [`settings`]: persisted clock list and layout

pub mod clock;
pub mod error;
pub mod host;
pub mod layout;
pub mod metrics;
pub mod registry;
pub mod settings;

pub use clock::{ClockFace, ClockId, ClockWidget, LocalTime, local_hour};
pub use error::{ClockError, HostError, SettingsError};
pub use host::ClockHost;
pub use layout::{LayoutPlan, Rect};
pub use metrics::ClockMetrics;
pub use registry::ClockRegistry;
pub use settings::{SETTINGS_FILE_NAME, Settings, SettingsStore};
pub use worldclock_types::{ClockSettings, Corner, LayoutConfig, Orientation};
