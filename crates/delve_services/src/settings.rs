//! Settings management
//!
//! Settings are JSON. Every field has a default, so a file only needs the
//! values it overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest accepted map side, in tiles.
pub const MAX_DUNGEON_SIDE: u32 = 1024;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings from {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dungeon: DungeonSettings,
    pub simulation: SimulationSettings,
    /// `tracing_subscriber` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonSettings {
    pub width: u32,
    pub height: u32,
    /// Fraction of the interior to carve into floor before stopping.
    pub dug_percentage: f32,
    /// Inclusive `[min, max]` room width.
    pub room_width: [u32; 2],
    /// Inclusive `[min, max]` room height.
    pub room_height: [u32; 2],
    /// Fixed generator seed; `None` picks one per run.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of update ticks to run.
    pub ticks: u64,
    pub tick_rate_hz: u32,
    /// Print a frame every N ticks; `0` prints only the final frame.
    pub render_every: u64,
    /// Player input script, one roguelike key per action.
    pub script: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dungeon: DungeonSettings::default(),
            simulation: SimulationSettings::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl Default for DungeonSettings {
    fn default() -> Self {
        Self {
            width: 80,
            height: 50,
            dug_percentage: 0.3,
            room_width: [8, 12],
            room_height: [5, 10],
            seed: None,
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            ticks: 20,
            tick_rate_hz: 60,
            render_every: 0,
            script: "llllljjjhhhkk.".to_string(),
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&text).map_err(|err| match err {
            SettingsError::Parse { source, .. } => SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings =
            serde_json::from_str(text).map_err(|source| SettingsError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.dungeon.validate()?;
        if self.simulation.tick_rate_hz == 0 {
            return Err(invalid("simulation.tick_rate_hz", "must be at least 1"));
        }
        Ok(())
    }
}

impl DungeonSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, side) in [("dungeon.width", self.width), ("dungeon.height", self.height)] {
            if !(3..=MAX_DUNGEON_SIDE).contains(&side) {
                return Err(invalid(
                    field,
                    format!("{side} is outside 3..={MAX_DUNGEON_SIDE}"),
                ));
            }
        }
        if !(self.dug_percentage > 0.0 && self.dug_percentage <= 1.0) {
            return Err(invalid(
                "dungeon.dug_percentage",
                format!("{} is outside (0, 1]", self.dug_percentage),
            ));
        }
        for (field, [min, max], limit) in [
            ("dungeon.room_width", self.room_width, self.width - 2),
            ("dungeon.room_height", self.room_height, self.height - 2),
        ] {
            if min == 0 || min > max {
                return Err(invalid(field, format!("[{min}, {max}] is not a valid range")));
            }
            if max > limit {
                return Err(invalid(
                    field,
                    format!("rooms up to {max} tiles do not fit inside {limit} interior tiles"),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.dungeon.width, 80);
        assert_eq!(settings.dungeon.height, 50);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "dungeon": { "seed": 7 }, "simulation": { "ticks": 3 } }"#)
                .unwrap();
        assert_eq!(settings.dungeon.seed, Some(7));
        assert_eq!(settings.dungeon.room_width, [8, 12]);
        assert_eq!(settings.simulation.ticks, 3);
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn rejects_inverted_room_range() {
        let err = Settings::from_json(r#"{ "dungeon": { "room_width": [9, 4] } }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "dungeon.room_width",
                ..
            }
        ));
    }

    #[test]
    fn rejects_rooms_larger_than_the_map() {
        let err = Settings::from_json(r#"{ "dungeon": { "width": 10, "height": 10 } }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { .. }));
    }

    #[test]
    fn rejects_bad_dug_percentage() {
        for value in ["0.0", "1.5", "-0.2"] {
            let json = format!(r#"{{ "dungeon": {{ "dug_percentage": {value} }} }}"#);
            assert!(Settings::from_json(&json).is_err(), "{value} accepted");
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
