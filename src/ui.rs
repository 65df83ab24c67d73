//! HUD text and end-of-run summary
//!
//! Everything a host needs to show as text, derived from the world.

use serde::{Deserialize, Serialize};

use crate::sim::World;

/// Values shown in the HUD each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub level: u32,
    /// Health rounded to the nearest integer
    pub health: i32,
    /// Survival time as `m:ss`
    pub time: String,
    /// Experience progress, 0-100
    pub xp_percent: f32,
}

impl HudSnapshot {
    pub fn from_world(world: &World) -> Self {
        Self {
            level: world.player.level,
            health: world.player.health.round() as i32,
            time: format_elapsed(world.elapsed),
            xp_percent: world.player.xp_percent(),
        }
    }
}

/// Format seconds as `minutes:seconds`, seconds zero-padded
pub fn format_elapsed(secs: f32) -> String {
    let secs = secs.max(0.0);
    let minutes = (secs / 60.0).floor() as u32;
    let seconds = (secs % 60.0).floor() as u32;
    format!("{minutes}:{seconds:02}")
}

/// Final results of a finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub level: u32,
    pub survived: String,
    pub survived_secs: f32,
    pub kills: u32,
}

impl SessionSummary {
    pub fn from_world(world: &World) -> Self {
        Self {
            seed: world.seed,
            level: world.player.level,
            survived: format_elapsed(world.elapsed),
            survived_secs: world.elapsed,
            kills: world.kills,
        }
    }
}
