//! Shared configuration types for World Clock
//!
//! This crate contains the serializable settings record and the layout
//! bitfield shared between the clock core, the overlay renderer and the
//! application binary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Longest label a clock can carry, in bytes.
///
/// The settings record reserves 32 bytes per name including the terminator.
pub const MAX_LABEL_BYTES: usize = 31;

/// Largest offset magnitude (in hours) a clock may be configured with.
pub const MAX_OFFSET_HOURS: i8 = 23;

/// Label given to the clock created when no settings exist.
pub const DEFAULT_CLOCK_LABEL: &str = "GMT";

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Screen corner the clock container is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Corner {
    #[default]
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// Direction in which successive clocks are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// One row, clocks left to right
    #[default]
    Horizontal,
    /// One column, clocks top to bottom
    Vertical,
}

/// Placement of the clock container: orientation, corner and stacking.
///
/// Persisted as a bitfield (see [`LayoutConfig::bits`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub align_right: bool,
    pub align_bottom: bool,
    pub vertical: bool,
    pub always_on_top: bool,
}

impl LayoutConfig {
    pub const ALIGN_RIGHT: u8 = 0x01;
    pub const ALIGN_BOTTOM: u8 = 0x02;
    pub const VERTICAL: u8 = 0x04;
    pub const ALWAYS_ON_TOP: u8 = 0x08;

    /// Decode the persisted bitfield. Unknown bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            align_right: bits & Self::ALIGN_RIGHT != 0,
            align_bottom: bits & Self::ALIGN_BOTTOM != 0,
            vertical: bits & Self::VERTICAL != 0,
            always_on_top: bits & Self::ALWAYS_ON_TOP != 0,
        }
    }

    /// Encode into the persisted bitfield
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.align_right {
            bits |= Self::ALIGN_RIGHT;
        }
        if self.align_bottom {
            bits |= Self::ALIGN_BOTTOM;
        }
        if self.vertical {
            bits |= Self::VERTICAL;
        }
        if self.always_on_top {
            bits |= Self::ALWAYS_ON_TOP;
        }
        bits
    }

    pub fn corner(&self) -> Corner {
        match (self.align_right, self.align_bottom) {
            (false, false) => Corner::UpperLeft,
            (true, false) => Corner::UpperRight,
            (false, true) => Corner::LowerLeft,
            (true, true) => Corner::LowerRight,
        }
    }

    pub fn set_corner(&mut self, corner: Corner) {
        let (right, bottom) = match corner {
            Corner::UpperLeft => (false, false),
            Corner::UpperRight => (true, false),
            Corner::LowerLeft => (false, true),
            Corner::LowerRight => (true, true),
        };
        self.align_right = right;
        self.align_bottom = bottom;
    }

    pub fn orientation(&self) -> Orientation {
        if self.vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.vertical = orientation == Orientation::Vertical;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Clock Settings
// ─────────────────────────────────────────────────────────────────────────────

/// One clock as stored in (or restored from) the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSettings {
    pub name: String,
    pub offset: i8,
}

impl ClockSettings {
    pub fn new(name: impl Into<String>, offset: i8) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self::new(DEFAULT_CLOCK_LABEL, 0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings File Record
// ─────────────────────────────────────────────────────────────────────────────

/// `[WindowData]` section of the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowData {
    /// Layout bitfield, see [`LayoutConfig::from_bits`]
    #[serde(rename = "Layout", default = "default_layout_bits")]
    pub layout: u8,
    #[serde(rename = "ShowSeconds", default = "default_show_seconds")]
    pub show_seconds: bool,
}

fn default_layout_bits() -> u8 {
    LayoutConfig::ALIGN_RIGHT
}

fn default_show_seconds() -> bool {
    true
}

impl Default for WindowData {
    fn default() -> Self {
        Self {
            layout: default_layout_bits(),
            show_seconds: default_show_seconds(),
        }
    }
}

/// A single value in the `[ClockData]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClockValue {
    Int(i64),
    Text(String),
}

/// `[ClockData]` section: `NumClocks` followed by numbered
/// `Clock{i}Name` / `Clock{i}Offset` keys, 1-based.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClockData {
    #[serde(rename = "NumClocks", default)]
    pub num_clocks: usize,
    #[serde(flatten)]
    pub entries: BTreeMap<String, ClockValue>,
}

impl ClockData {
    pub fn name_key(index: usize) -> String {
        format!("Clock{}Name", index)
    }

    pub fn offset_key(index: usize) -> String {
        format!("Clock{}Offset", index)
    }

    /// Name of the 1-based clock `index`, if present and textual
    pub fn name(&self, index: usize) -> Option<&str> {
        match self.entries.get(&Self::name_key(index)) {
            Some(ClockValue::Text(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Offset of the 1-based clock `index`, if present and numeric
    pub fn offset(&self, index: usize) -> Option<i64> {
        match self.entries.get(&Self::offset_key(index)) {
            Some(ClockValue::Int(offset)) => Some(*offset),
            _ => None,
        }
    }

    /// Build the section from an ordered clock list
    pub fn from_clocks(clocks: &[ClockSettings]) -> Self {
        let mut entries = BTreeMap::new();
        for (i, clock) in clocks.iter().enumerate() {
            let index = i + 1;
            entries.insert(Self::name_key(index), ClockValue::Text(clock.name.clone()));
            entries.insert(Self::offset_key(index), ClockValue::Int(clock.offset as i64));
        }
        Self {
            num_clocks: clocks.len(),
            entries,
        }
    }
}

/// The whole settings file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(rename = "WindowData", default)]
    pub window_data: WindowData,
    #[serde(rename = "ClockData", default)]
    pub clock_data: ClockData,
}
