//! The player character: movement, firing, damage and leveling

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;
use super::state::{Arena, Entity};
use super::tick::TickInput;
use crate::consts::*;
use crate::normalize_guarded;

/// The player (one per session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_for_next: u32,
    /// Seconds until the next shot is allowed (fires at <= 0)
    pub shoot_cooldown: f32,
    /// Unit vector used when firing without a target
    pub last_aim: Vec2,
    /// Seconds of remaining damage immunity
    pub invulnerable_time: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            level: 1,
            xp: 0,
            xp_for_next: PLAYER_XP_FOR_FIRST_LEVEL,
            shoot_cooldown: 0.0,
            last_aim: Vec2::X,
            invulnerable_time: 0.0,
        }
    }

    /// Move from the intent snapshot, tick timers, and fire if allowed
    ///
    /// Returns the projectile fired this frame, if any.
    pub fn update(&mut self, dt: f32, input: &TickInput, arena: &Arena) -> Option<Projectile> {
        let direction = normalize_guarded(input.move_direction());

        self.pos += direction * self.speed * dt;
        self.pos = arena.clamp_circle(self.pos, self.radius);

        if direction != Vec2::ZERO {
            self.last_aim = direction;
        }

        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown -= dt;
        }
        if self.invulnerable_time > 0.0 {
            self.invulnerable_time -= dt;
        }

        if input.fire && self.shoot_cooldown <= 0.0 {
            Some(self.shoot(None))
        } else {
            None
        }
    }

    /// Fire one friendly projectile toward `target`, or along the last aim
    pub fn shoot(&mut self, target: Option<Vec2>) -> Projectile {
        let aim = match target {
            Some(target) => normalize_guarded(target - self.pos),
            None => self.last_aim,
        };
        self.shoot_cooldown = SHOT_COOLDOWN;

        Projectile::friendly(
            self.pos + aim * (self.radius + SHOT_MUZZLE_OFFSET),
            aim * SHOT_SPEED,
            SHOT_BASE_DAMAGE + self.level as f32 * SHOT_DAMAGE_PER_LEVEL,
        )
    }

    /// Apply damage unless still inside the post-hit grace window
    pub fn take_damage(&mut self, amount: f32) {
        if self.invulnerable_time > 0.0 {
            return;
        }
        self.health = (self.health - amount).max(0.0);
        self.invulnerable_time = PLAYER_INVULNERABLE_SECS;
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, self.max_health);
    }

    /// Add experience, applying every level-up it pays for
    ///
    /// Returns the number of levels gained.
    pub fn gain_xp(&mut self, amount: u32) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        while self.xp >= self.xp_for_next {
            self.xp -= self.xp_for_next;
            self.level += 1;
            self.max_health += LEVEL_MAX_HEALTH_GAIN;
            self.health = self.max_health;
            self.xp_for_next = (self.xp_for_next as f32 * LEVEL_XP_GROWTH).round() as u32;
            self.speed += LEVEL_SPEED_GAIN;
            gained += 1;
        }
        if gained > 0 {
            log::info!(
                "Level up: now level {} ({} hp, next at {} xp)",
                self.level,
                self.max_health,
                self.xp_for_next
            );
        }
        gained
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Experience progress toward the next level, 0-100
    pub fn xp_percent(&self) -> f32 {
        (self.xp as f32 / self.xp_for_next as f32 * 100.0).clamp(0.0, 100.0)
    }
}

impl Entity for Player {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn is_removed(&self) -> bool {
        false
    }
}
