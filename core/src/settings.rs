//! Settings persistence
//!
//! Clocks and layout are kept in a small TOML file next to the executable's
//! working directory. The record shape is a flat key-value list:
//!
//! ```toml
//! [WindowData]
//! Layout = 1
//! ShowSeconds = true
//!
//! [ClockData]
//! NumClocks = 2
//! Clock1Name = "GMT"
//! Clock1Offset = 0
//! Clock2Name = "Tokyo"
//! Clock2Offset = 9
//! ```

use std::path::{Path, PathBuf};

use crate::clock::{truncate_label, validate_offset};
use crate::error::SettingsError;
use worldclock_types::{ClockData, ClockSettings, LayoutConfig, SettingsFile, WindowData};

/// Settings file name, resolved against the working directory
pub const SETTINGS_FILE_NAME: &str = "WorldClock.toml";

/// Decoded settings: what the registry is built from and what is saved back
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub layout: LayoutConfig,
    pub show_seconds: bool,
    pub clocks: Vec<ClockSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_file(&SettingsFile::default())
    }
}

impl Settings {
    /// Decode the on-disk record.
    ///
    /// Reading stops at the first missing or empty name. Entries whose offset
    /// is missing or out of range are skipped. With nothing usable left the
    /// default clock is returned.
    pub fn from_file(file: &SettingsFile) -> Self {
        let data = &file.clock_data;
        let mut clocks = Vec::new();

        for index in 1..=data.num_clocks {
            let name = match data.name(index) {
                Some(name) if !name.is_empty() => name,
                _ => break,
            };

            let Some(offset) = data.offset(index) else {
                tracing::warn!(index, name, "Clock has no offset, skipping");
                continue;
            };
            let offset = match i32::try_from(offset).ok().map(validate_offset) {
                Some(Ok(offset)) => offset,
                _ => {
                    tracing::warn!(index, name, offset, "Clock offset out of range, skipping");
                    continue;
                }
            };

            clocks.push(ClockSettings::new(truncate_label(name), offset));
        }

        if clocks.is_empty() {
            clocks.push(ClockSettings::default());
        }

        Self {
            layout: LayoutConfig::from_bits(file.window_data.layout),
            show_seconds: file.window_data.show_seconds,
            clocks,
        }
    }

    pub fn to_file(&self) -> SettingsFile {
        SettingsFile {
            window_data: WindowData {
                layout: self.layout.bits(),
                show_seconds: self.show_seconds,
            },
            clock_data: ClockData::from_clocks(&self.clocks),
        }
    }
}

/// Loads and stores [`Settings`] at a fixed path
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`SETTINGS_FILE_NAME`] in the working directory
    pub fn at_default_location() -> Self {
        Self::new(SETTINGS_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when no file exists yet.
    ///
    /// A missing file is not created; only [`store`](Self::store) writes.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }

        let file: SettingsFile =
            confy::load_path(&self.path).map_err(|source| SettingsError::Load {
                path: self.path.clone(),
                source,
            })?;
        let settings = Settings::from_file(&file);
        tracing::info!(
            path = %self.path.display(),
            clocks = settings.clocks.len(),
            layout = settings.layout.bits(),
            "Settings loaded"
        );
        Ok(settings)
    }

    pub fn store(&self, settings: &Settings) -> Result<(), SettingsError> {
        confy::store_path(&self.path, settings.to_file()).map_err(|source| SettingsError::Save {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(
            path = %self.path.display(),
            clocks = settings.clocks.len(),
            "Settings saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worldclock_types::ClockValue;

    fn file_with(num_clocks: usize, entries: &[(&str, ClockValue)]) -> SettingsFile {
        let mut file = SettingsFile::default();
        file.clock_data.num_clocks = num_clocks;
        for (key, value) in entries {
            file.clock_data.entries.insert(key.to_string(), value.clone());
        }
        file
    }

    fn text(s: &str) -> ClockValue {
        ClockValue::Text(s.to_string())
    }

    #[test]
    fn defaults_are_one_gmt_clock_upper_right() {
        let settings = Settings::default();
        assert_eq!(settings.clocks, vec![ClockSettings::new("GMT", 0)]);
        assert!(settings.layout.align_right);
        assert!(!settings.layout.align_bottom);
        assert!(settings.show_seconds);
    }

    #[test]
    fn reading_stops_at_first_empty_name() {
        let file = file_with(
            3,
            &[
                ("Clock1Name", text("GMT")),
                ("Clock1Offset", ClockValue::Int(0)),
                ("Clock2Name", text("")),
                ("Clock2Offset", ClockValue::Int(1)),
                ("Clock3Name", text("Tokyo")),
                ("Clock3Offset", ClockValue::Int(9)),
            ],
        );
        let settings = Settings::from_file(&file);
        assert_eq!(settings.clocks, vec![ClockSettings::new("GMT", 0)]);
    }

    #[test]
    fn invalid_offsets_are_skipped() {
        let file = file_with(
            3,
            &[
                ("Clock1Name", text("Nowhere")),
                ("Clock1Offset", ClockValue::Int(24)),
                ("Clock2Name", text("Missing")),
                ("Clock3Name", text("Tokyo")),
                ("Clock3Offset", ClockValue::Int(9)),
            ],
        );
        let settings = Settings::from_file(&file);
        assert_eq!(settings.clocks, vec![ClockSettings::new("Tokyo", 9)]);
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "A".repeat(40);
        let file = file_with(
            1,
            &[("Clock1Name", text(&long)), ("Clock1Offset", ClockValue::Int(-3))],
        );
        let settings = Settings::from_file(&file);
        assert_eq!(settings.clocks[0].name.len(), 31);
        assert_eq!(settings.clocks[0].offset, -3);
    }

    #[test]
    fn store_then_load_preserves_order_and_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join(SETTINGS_FILE_NAME));
        let settings = Settings {
            layout: LayoutConfig::from_bits(LayoutConfig::VERTICAL | LayoutConfig::ALWAYS_ON_TOP),
            show_seconds: false,
            clocks: (1..=11)
                .map(|i| ClockSettings::new(format!("Zone {i}"), (i as i8) - 6))
                .collect(),
        };

        store.store(&settings).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn stored_file_uses_flat_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let store = SettingsStore::new(&path);
        store
            .store(&Settings {
                layout: LayoutConfig::from_bits(3),
                show_seconds: true,
                clocks: vec![ClockSettings::new("GMT", 0), ClockSettings::new("Tokyo", 9)],
            })
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[WindowData]"));
        assert!(contents.contains("Layout = 3"));
        assert!(contents.contains("NumClocks = 2"));
        assert!(contents.contains("Clock2Name = \"Tokyo\""));
        assert!(contents.contains("Clock2Offset = 9"));
    }

    #[test]
    fn missing_file_gives_defaults_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let store = SettingsStore::new(&path);

        let settings = store.load().unwrap();

        assert_eq!(settings, Settings::default());
        assert!(!path.exists());
    }

    #[test]
    fn hand_written_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(
            &path,
            "[WindowData]\nLayout = 6\n\n[ClockData]\nNumClocks = 1\nClock1Name = \"Kolkata\"\nClock1Offset = 5\n",
        )
        .unwrap();

        let settings = SettingsStore::new(&path).load().unwrap();

        assert_eq!(settings.clocks, vec![ClockSettings::new("Kolkata", 5)]);
        assert!(settings.layout.vertical);
        assert!(settings.layout.align_bottom);
        assert!(settings.show_seconds);
    }

    #[test]
    fn malformed_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "[WindowData\nLayout = ").unwrap();

        let err = SettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SettingsError::Load { .. }));
    }

    #[test]
    fn oversized_clock_count_reads_only_present_clocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(
            &path,
            "[WindowData]\nLayout = 1\n\n[ClockData]\nNumClocks = 9000000000000000000\nClock1Name = \"Tokyo\"\nClock1Offset = 9\n",
        )
        .unwrap();

        let settings = SettingsStore::new(&path).load().unwrap();

        assert_eq!(settings.clocks, vec![ClockSettings::new("Tokyo", 9)]);
    }
}
