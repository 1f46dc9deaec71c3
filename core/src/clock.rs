//! Clock widgets and their local-time computation

use std::fmt;

use chrono::{DateTime, Timelike, Utc};

use crate::error::ClockError;
use crate::layout::Rect;
use worldclock_types::{MAX_LABEL_BYTES, MAX_OFFSET_HOURS};

/// Stable identity of a clock, assigned by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockId(u32);

impl ClockId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ClockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One clock: a label and a whole-hour offset from UTC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockWidget {
    id: ClockId,
    label: String,
    offset: i8,
    /// Cell inside the container, provisional until the next relayout
    pub(crate) cell: Rect,
}

impl ClockWidget {
    pub(crate) fn new(id: ClockId, label: String, offset: i8) -> Self {
        Self {
            id,
            label,
            offset,
            cell: Rect::default(),
        }
    }

    pub fn id(&self) -> ClockId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn offset(&self) -> i8 {
        self.offset
    }

    pub fn cell(&self) -> Rect {
        self.cell
    }

    pub(crate) fn set(&mut self, label: String, offset: i8) {
        self.label = label;
        self.offset = offset;
    }

    /// Local time shown by this clock at `now`
    pub fn local_time(&self, now: DateTime<Utc>) -> LocalTime {
        LocalTime::at(now, self.offset as i32)
    }

    /// Snapshot handed to the host for drawing
    pub fn face(&self, now: DateTime<Utc>) -> ClockFace<'_> {
        ClockFace {
            label: &self.label,
            time: self.local_time(now),
        }
    }
}

/// Wall-clock time at a fixed offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl LocalTime {
    pub fn at(now: DateTime<Utc>, offset_hours: i32) -> Self {
        Self {
            hour: local_hour(now.hour(), offset_hours),
            minute: now.minute() as u8,
            second: now.second().min(59) as u8,
        }
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// What a host needs to draw one clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockFace<'a> {
    pub label: &'a str,
    pub time: LocalTime,
}

/// Hour of day at `offset_hours` from UTC, always in `0..24`.
///
/// Wraps in both directions and for any offset magnitude.
pub fn local_hour(utc_hour: u32, offset_hours: i32) -> u8 {
    (utc_hour as i64 + offset_hours as i64).rem_euclid(24) as u8
}

pub fn validate_offset(offset: i32) -> Result<i8, ClockError> {
    let max = MAX_OFFSET_HOURS as i32;
    if (-max..=max).contains(&offset) {
        Ok(offset as i8)
    } else {
        Err(ClockError::InvalidOffset { offset })
    }
}

pub fn validate_label(label: &str) -> Result<(), ClockError> {
    if label.is_empty() || label.len() > MAX_LABEL_BYTES {
        return Err(ClockError::InvalidLabel { len: label.len() });
    }
    Ok(())
}

/// Cut a label down to the storable size without splitting a character
pub fn truncate_label(label: &str) -> &str {
    if label.len() <= MAX_LABEL_BYTES {
        return label;
    }
    let mut end = MAX_LABEL_BYTES;
    while !label.is_char_boundary(end) {
        end -= 1;
    }
    &label[..end]
}
