//! Periodic enemy spawning from the arena edges
//!
//! The interval shrinks with survival time down to a floor.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::state::Arena;
use crate::consts::*;

/// Countdown to the next spawn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds until the next spawn; starts at zero so the first tick spawns
    pub timer: f32,
}

impl Spawner {
    /// Tick the countdown; returns a new enemy when it expires
    pub fn update(
        &mut self,
        dt: f32,
        elapsed: f32,
        arena: &Arena,
        rng: &mut impl Rng,
    ) -> Option<Enemy> {
        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }
        self.timer = spawn_interval(elapsed);
        let pos = spawn_position(arena, rng);
        let enemy = roll_enemy(pos, rng);
        log::debug!(
            "Spawned {} at ({:.0}, {:.0}), next in {:.2}s",
            enemy.name(),
            pos.x,
            pos.y,
            self.timer
        );
        Some(enemy)
    }
}

/// Seconds between spawns after `elapsed` seconds of survival
pub fn spawn_interval(elapsed: f32) -> f32 {
    (SPAWN_BASE_INTERVAL - elapsed / SPAWN_RAMP_DIVISOR).max(SPAWN_MIN_INTERVAL)
}

/// A random point just outside one of the four edges
pub fn spawn_position(arena: &Arena, rng: &mut impl Rng) -> Vec2 {
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random::<f32>() * arena.width, -SPAWN_BORDER),
        1 => Vec2::new(arena.width + SPAWN_BORDER, rng.random::<f32>() * arena.height),
        2 => Vec2::new(rng.random::<f32>() * arena.width, arena.height + SPAWN_BORDER),
        _ => Vec2::new(-SPAWN_BORDER, rng.random::<f32>() * arena.height),
    }
}

/// Weighted variant roll: 45% Sapling, 30% Stoneling, 25% Flowerling
pub fn roll_enemy(pos: Vec2, rng: &mut impl Rng) -> Enemy {
    let roll: f32 = rng.random();
    if roll < SPAWN_SAPLING_ROLL {
        Enemy::sapling(pos, rng)
    } else if roll < SPAWN_STONELING_ROLL {
        Enemy::stoneling(pos)
    } else {
        Enemy::flowerling(pos, false)
    }
}
