//! Host windowing abstraction
//!
//! The registry never talks to a window system directly. Everything it needs
//! from the outside world goes through [`ClockHost`], which the overlay crate
//! implements on top of a native window and tests implement with a recorder.

use crate::clock::{ClockFace, ClockId};
use crate::error::HostError;
use crate::layout::Rect;

/// Trait that every clock host must implement
pub trait ClockHost {
    /// Dimensions of the screen the container is pinned to
    fn screen_size(&self) -> (u32, u32);

    /// Allocate whatever the host needs to show a new clock
    fn create_clock(&mut self, id: ClockId) -> Result<(), HostError>;

    /// Release a clock's resources
    fn destroy_clock(&mut self, id: ClockId);

    /// Move a clock's cell inside the container
    fn place_clock(&mut self, id: ClockId, cell: Rect);

    /// Resize and move the container, re-applying its stacking order.
    ///
    /// Called on every relayout; applying the same values twice must be safe.
    fn place_container(&mut self, container: Rect, always_on_top: bool);

    /// Redraw one clock
    fn draw_clock(&mut self, id: ClockId, face: &ClockFace<'_>);

    /// Show a message to the user
    fn notify(&mut self, title: &str, message: &str);
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::{HostCall, RecordingHost};

#[cfg(any(test, feature = "test-support"))]
mod recording {
    use super::*;
    use crate::clock::LocalTime;

    /// A host call captured by [`RecordingHost`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum HostCall {
        Create(ClockId),
        Destroy(ClockId),
        PlaceClock(ClockId, Rect),
        PlaceContainer(Rect, bool),
        Draw(ClockId, String, LocalTime),
        Notify(String, String),
    }

    /// Headless host that records every call for inspection
    #[derive(Debug, Clone)]
    pub struct RecordingHost {
        pub screen: (u32, u32),
        pub calls: Vec<HostCall>,
        /// Make the next `create_clock` fail
        pub fail_next_create: bool,
    }

    impl RecordingHost {
        pub fn new(screen_width: u32, screen_height: u32) -> Self {
            Self {
                screen: (screen_width, screen_height),
                calls: Vec::new(),
                fail_next_create: false,
            }
        }

        pub fn clear(&mut self) {
            self.calls.clear();
        }

        pub fn draws(&self) -> Vec<(ClockId, String, LocalTime)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    HostCall::Draw(id, label, time) => Some((*id, label.clone(), *time)),
                    _ => None,
                })
                .collect()
        }

        pub fn last_container(&self) -> Option<(Rect, bool)> {
            self.calls.iter().rev().find_map(|call| match call {
                HostCall::PlaceContainer(rect, on_top) => Some((*rect, *on_top)),
                _ => None,
            })
        }

        pub fn placements(&self) -> Vec<(ClockId, Rect)> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    HostCall::PlaceClock(id, rect) => Some((*id, *rect)),
                    _ => None,
                })
                .collect()
        }

        pub fn notifications(&self) -> Vec<String> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    HostCall::Notify(_, message) => Some(message.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Default for RecordingHost {
        fn default() -> Self {
            Self::new(1920, 1080)
        }
    }

    impl ClockHost for RecordingHost {
        fn screen_size(&self) -> (u32, u32) {
            self.screen
        }

        fn create_clock(&mut self, id: ClockId) -> Result<(), HostError> {
            if std::mem::take(&mut self.fail_next_create) {
                return Err(HostError::ResourceExhausted {
                    id,
                    reason: "simulated allocation failure".to_string(),
                });
            }
            self.calls.push(HostCall::Create(id));
            Ok(())
        }

        fn destroy_clock(&mut self, id: ClockId) {
            self.calls.push(HostCall::Destroy(id));
        }

        fn place_clock(&mut self, id: ClockId, cell: Rect) {
            self.calls.push(HostCall::PlaceClock(id, cell));
        }

        fn place_container(&mut self, container: Rect, always_on_top: bool) {
            self.calls.push(HostCall::PlaceContainer(container, always_on_top));
        }

        fn draw_clock(&mut self, id: ClockId, face: &ClockFace<'_>) {
            self.calls
                .push(HostCall::Draw(id, face.label.to_string(), face.time));
        }

        fn notify(&mut self, title: &str, message: &str) {
            self.calls
                .push(HostCall::Notify(title.to_string(), message.to_string()));
        }
    }
}
