//! Grove Arena - a top-down survival arena
//!
//! Core modules:
//! - `sim`: Simulation core (entities, spawning, combat, the per-frame tick)
//! - `renderer`: Shape primitives, the `Canvas` surface and a terminal canvas
//! - `platform`: Frame clock and keyboard intent adapters
//! - `ui`: HUD text and end-of-run summary
//! - `settings`: Host configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::HostError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default arena dimensions (world units)
    pub const DEFAULT_ARENA_WIDTH: f32 = 960.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 24.0;
    pub const PLAYER_SPEED: f32 = 220.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_XP_FOR_FIRST_LEVEL: u32 = 50;
    /// Grace window after a hit during which damage is ignored
    pub const PLAYER_INVULNERABLE_SECS: f32 = 0.6;

    /// Leveling curve
    pub const LEVEL_MAX_HEALTH_GAIN: f32 = 8.0;
    pub const LEVEL_SPEED_GAIN: f32 = 6.0;
    pub const LEVEL_XP_GROWTH: f32 = 1.35;

    /// Player weapon
    pub const SHOT_SPEED: f32 = 420.0;
    pub const SHOT_RADIUS: f32 = 7.0;
    pub const SHOT_MUZZLE_OFFSET: f32 = 4.0;
    pub const SHOT_COOLDOWN: f32 = 0.35;
    pub const SHOT_BASE_DAMAGE: f32 = 22.0;
    pub const SHOT_DAMAGE_PER_LEVEL: f32 = 2.0;

    /// Spawner
    pub const SPAWN_BORDER: f32 = 40.0;
    pub const SPAWN_BASE_INTERVAL: f32 = 2.2;
    pub const SPAWN_MIN_INTERVAL: f32 = 0.6;
    /// Seconds of survival per second shaved off the spawn interval
    pub const SPAWN_RAMP_DIVISOR: f32 = 40.0;
    /// Cumulative variant thresholds (Sapling, Stoneling, rest Flowerling)
    pub const SPAWN_SAPLING_ROLL: f32 = 0.45;
    pub const SPAWN_STONELING_ROLL: f32 = 0.75;

    /// Sapling
    pub const SAPLING_RADIUS: f32 = 18.0;
    pub const SAPLING_SPEED: f32 = 140.0;
    pub const SAPLING_HEALTH: f32 = 40.0;
    pub const SAPLING_XP: u32 = 16;
    pub const SAPLING_TRANSFORM_MIN: f32 = 3.8;
    pub const SAPLING_TRANSFORM_SPREAD: f32 = 1.5;
    pub const SAPLING_CONTACT_DAMAGE: f32 = 10.0;

    /// Stoneling
    pub const STONELING_RADIUS: f32 = 22.0;
    pub const STONELING_SPEED: f32 = 40.0;
    pub const STONELING_HEALTH: f32 = 90.0;
    pub const STONELING_XP: u32 = 28;
    pub const STONELING_JUMP_COOLDOWN: f32 = 2.6;
    /// Nominal leap length; the timer drains at double rate mid-air, so a
    /// leap lasts about 0.25s
    pub const STONELING_JUMP_DURATION: f32 = 0.5;
    pub const STONELING_JUMP_SPEED_FACTOR: f32 = 3.2;
    pub const STONELING_JUMP_CONTACT_DAMAGE: f32 = 24.0;

    /// Flowerling
    pub const FLOWERLING_RADIUS: f32 = 20.0;
    pub const FLOWERLING_HEALTH: f32 = 85.0;
    pub const FLOWERLING_SAPLING_HEALTH: f32 = 70.0;
    pub const FLOWERLING_XP: u32 = 34;
    pub const FLOWERLING_FIRST_SHOT: f32 = 0.5;
    pub const FLOWERLING_SHOT_MIN: f32 = 2.5;
    pub const FLOWERLING_SHOT_SPREAD: f32 = 0.8;
    pub const FLOWERLING_CONTACT_DAMAGE: f32 = 14.0;

    /// Flowerling seed projectile
    pub const SEED_SPEED: f32 = 120.0;
    pub const SEED_RADIUS: f32 = 8.0;
    pub const SEED_MUZZLE_OFFSET: f32 = 6.0;
    pub const SEED_DAMAGE: f32 = 18.0;

    /// Contact resolution
    /// Inward tolerance so grazing overlaps do not count as contact
    pub const CONTACT_TOLERANCE: f32 = 6.0;
    pub const CONTACT_PUSH: f32 = 12.0;

    /// Experience orbs
    pub const ORB_RADIUS: f32 = 8.0;
    pub const ORB_PICKUP_SLACK: f32 = 6.0;
    pub const ORB_BOB_RATE: f32 = 3.0;
    pub const ORB_BOB_AMPLITUDE: f32 = 0.2;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Normalize a vector, treating a zero-length vector as length 1
///
/// A zero input comes back as zero instead of NaN.
#[inline]
pub fn normalize_guarded(v: Vec2) -> Vec2 {
    let len = v.length();
    if len == 0.0 { v } else { v / len }
}
