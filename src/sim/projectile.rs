//! Projectiles and experience orbs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::state::{Arena, Entity};
use crate::consts::*;

/// A projectile fired by the player (friendly) or a Flowerling (hostile)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub friendly: bool,
    pub removed: bool,
}

impl Projectile {
    pub fn friendly(pos: Vec2, vel: Vec2, damage: f32) -> Self {
        Self {
            pos,
            vel,
            radius: SHOT_RADIUS,
            damage,
            friendly: true,
            removed: false,
        }
    }

    pub fn hostile(pos: Vec2, vel: Vec2, damage: f32) -> Self {
        Self {
            pos,
            vel,
            radius: SEED_RADIUS,
            damage,
            friendly: false,
            removed: false,
        }
    }

    /// Advance and mark for removal once fully outside the arena
    pub fn update(&mut self, dt: f32, arena: &Arena) {
        self.pos += self.vel * dt;
        if arena.is_outside(self.pos, self.radius) {
            self.removed = true;
        }
    }
}

impl Entity for Projectile {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn is_removed(&self) -> bool {
        self.removed
    }
}

/// Experience dropped by a killed enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceOrb {
    pub pos: Vec2,
    pub radius: f32,
    pub amount: u32,
    /// Bobbing phase (radians)
    pub pulse: f32,
    pub removed: bool,
}

impl ExperienceOrb {
    pub fn new(pos: Vec2, amount: u32, pulse: f32) -> Self {
        Self {
            pos,
            radius: ORB_RADIUS,
            amount,
            pulse,
            removed: false,
        }
    }

    /// Bob in place; hand the experience to the player when close enough
    ///
    /// Returns the number of levels the pickup granted.
    pub fn update(&mut self, dt: f32, player: &mut Player) -> u32 {
        if self.removed {
            return 0;
        }
        self.pulse += dt * ORB_BOB_RATE;
        self.pos.y += self.pulse.sin() * ORB_BOB_AMPLITUDE;

        if crate::distance(self.pos, player.pos) < player.radius + self.radius + ORB_PICKUP_SLACK {
            self.removed = true;
            return player.gain_xp(self.amount);
        }
        0
    }
}

impl Entity for ExperienceOrb {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn is_removed(&self) -> bool {
        self.removed
    }
}
