//! Session settings
//!
//! Read once at startup from an optional JSON file. Every field has a
//! default, so a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, PLAYER_RADIUS};
use crate::error::HostError;
use crate::sim::Arena;

/// Environment variable naming a settings file
pub const CONFIG_ENV: &str = "GROVE_ARENA_CONFIG";

/// Host and world settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena size in world units
    pub arena_width: f32,
    pub arena_height: f32,
    /// Fixed RNG seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
    /// Frame rate the host loop aims for
    pub target_fps: u32,

    // === Terminal floor ===
    pub min_cols: u16,
    pub min_rows: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            seed: None,
            target_fps: 60,
            min_cols: 60,
            min_rows: 20,
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, HostError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate().map_err(HostError::InvalidSettings)?;
        Ok(settings)
    }

    /// Load from `path` if one is given
    ///
    /// A file that cannot be read falls back to defaults with a warning.
    /// A file that reads but does not parse or validate is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, HostError> {
        let Some(path) = path else {
            log::info!("No settings file, using defaults");
            return Ok(Self::default());
        };

        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) => {
                log::warn!(
                    "Could not read settings file {}: {}, using defaults",
                    path.display(),
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Check values the world and host rely on
    pub fn validate(&self) -> Result<(), String> {
        // The arena must hold the player with room to move
        let floor = PLAYER_RADIUS * 4.0;
        if !(self.arena_width.is_finite() && self.arena_width >= floor) {
            return Err(format!("arena_width must be at least {floor}"));
        }
        if !(self.arena_height.is_finite() && self.arena_height >= floor) {
            return Err(format!("arena_height must be at least {floor}"));
        }
        if self.target_fps == 0 || self.target_fps > 240 {
            return Err("target_fps must be 1-240".to_string());
        }
        if self.min_cols == 0 || self.min_rows < 2 {
            return Err("min_cols must be > 0 and min_rows at least 2".to_string());
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    /// Configured seed, or `fallback` when none is set
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }
}
