//! Error types for clock registry, host and settings operations

use std::path::PathBuf;
use thiserror::Error;

use crate::clock::ClockId;

/// Errors raised by registry operations
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("cannot delete the last clock")]
    LastClock,

    #[error("offset {offset} is outside -23..=23 hours")]
    InvalidOffset { offset: i32 },

    #[error("label is {len} bytes, 1 to 31 are allowed")]
    InvalidLabel { len: usize },

    #[error("no clock with id {0}")]
    UnknownClock(ClockId),

    #[error(transparent)]
    Host(#[from] HostError),
}

impl ClockError {
    /// Whether the process must stop rather than carry on with a partially
    /// built registry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ClockError::Host(HostError::ResourceExhausted { .. }))
    }
}

/// Errors raised by the windowing host
#[derive(Debug, Error)]
pub enum HostError {
    #[error("out of resources creating clock {id}: {reason}")]
    ResourceExhausted { id: ClockId, reason: String },

    #[error("host failure: {0}")]
    Other(String),
}

/// Errors during settings persistence
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings from {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("failed to save settings to {path}")]
    Save {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },
}
