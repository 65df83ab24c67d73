//! Game state and core simulation types
//!
//! The `World` owns every live entity. Nothing in the simulation is global:
//! the host holds one `World` and passes it to `tick` each frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::player::Player;
use super::projectile::{ExperienceOrb, Projectile};
use super::spawner::Spawner;

/// Positional circular collider shared by every entity
pub trait Entity {
    fn pos(&self) -> Vec2;
    fn radius(&self) -> f32;
    /// Marked for eviction at the end of the current tick
    fn is_removed(&self) -> bool;

    /// Centers closer than the sum of radii minus `tolerance`
    fn overlaps(&self, other: &impl Entity, tolerance: f32) -> bool
    where
        Self: Sized,
    {
        crate::distance(self.pos(), other.pos()) < self.radius() + other.radius() - tolerance
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance the simulation
    Playing,
    /// Player health reached zero; ticks are ignored
    GameOver,
}

/// The rectangular play field, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a circle's center so the whole circle stays inside the arena
    ///
    /// An arena narrower than the circle pins it to the low edge.
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.min(self.width - radius).max(radius),
            pos.y.min(self.height - radius).max(radius),
        )
    }

    /// True once a circle has fully left the arena
    pub fn is_outside(&self, pos: Vec2, radius: f32) -> bool {
        pos.x < -radius
            || pos.x > self.width + radius
            || pos.y < -radius
            || pos.y > self.height + radius
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub arena: Arena,
    pub phase: GamePhase,
    /// Seconds survived
    pub elapsed: f32,
    /// Simulation tick counter
    pub ticks: u64,
    /// Enemies killed by damage (each dropped one orb)
    pub kills: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Friendly projectiles
    pub bullets: Vec<Projectile>,
    /// Hostile projectiles
    pub enemy_bullets: Vec<Projectile>,
    pub orbs: Vec<ExperienceOrb>,
    pub spawner: Spawner,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Create a new session with the player centered in the arena
    pub fn new(arena: Arena, seed: u64) -> Self {
        Self {
            seed,
            arena,
            phase: GamePhase::Playing,
            elapsed: 0.0,
            ticks: 0,
            kills: 0,
            player: Player::new(arena.center()),
            enemies: Vec::new(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            orbs: Vec::new(),
            spawner: Spawner::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Total entities across the four pooled collections
    pub fn pooled_count(&self) -> usize {
        self.enemies.len() + self.bullets.len() + self.enemy_bullets.len() + self.orbs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world() {
        let world = World::new(Arena::new(800.0, 600.0), 7);
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(world.pooled_count(), 0);
        assert_eq!(world.elapsed, 0.0);
    }

    #[test]
    fn test_clamp_circle() {
        let arena = Arena::new(100.0, 50.0);
        assert_eq!(arena.clamp_circle(Vec2::new(-20.0, 70.0), 10.0), Vec2::new(10.0, 40.0));
        assert_eq!(arena.clamp_circle(Vec2::new(50.0, 25.0), 10.0), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_clamp_circle_degenerate_arena() {
        // Must not panic when the arena is smaller than the collider
        let arena = Arena::new(10.0, 10.0);
        let p = arena.clamp_circle(Vec2::new(3.0, 3.0), 24.0);
        assert_eq!(p, Vec2::new(24.0, 24.0));
    }

    #[test]
    fn test_is_outside_uses_radius_margin() {
        let arena = Arena::new(100.0, 100.0);
        assert!(!arena.is_outside(Vec2::new(-5.0, 50.0), 7.0));
        assert!(arena.is_outside(Vec2::new(-8.0, 50.0), 7.0));
        assert!(arena.is_outside(Vec2::new(50.0, 108.0), 7.0));
    }
}
