//! Enemy variants and their per-frame behavior
//!
//! Variants are a closed set. Everything that differs per variant (movement,
//! attacks, contact damage) is a single `match` on `EnemyKind`, so adding a
//! variant is a compile error until each of those says what it does.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;
use super::state::Entity;
use crate::consts::*;
use crate::normalize_guarded;

/// Stoneling jump cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StonelingPose {
    Idle,
    Jumping,
    /// Landed; waits out the jump cooldown exactly like `Idle`
    Recover,
}

/// Variant-specific state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Chases the player, then roots into a Flowerling
    Sapling { timer: f32, transform_delay: f32 },
    /// Waits, then leaps at the player
    Stoneling { pose: StonelingPose, jump_timer: f32 },
    /// Stationary turret
    Flowerling {
        shoot_timer: f32,
        born_from_sapling: bool,
    },
}

/// Something an enemy produced during its update
#[derive(Debug, Clone)]
pub enum EnemyAction {
    /// The enemy removed itself and left this one in its place
    Transform(Enemy),
    /// A hostile projectile
    Fire(Projectile),
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    /// Experience carried by the orb this enemy drops
    pub xp_value: u32,
    pub removed: bool,
    /// Removed because health ran out (as opposed to transforming)
    pub killed: bool,
    /// Cleared once the orb has been spawned, or when no orb should drop
    pub drops_xp: bool,
    pub kind: EnemyKind,
}

impl Enemy {
    fn base(pos: Vec2, radius: f32, speed: f32, health: f32, xp_value: u32, kind: EnemyKind) -> Self {
        Self {
            pos,
            radius,
            speed,
            health,
            max_health: health,
            xp_value,
            removed: false,
            killed: false,
            drops_xp: true,
            kind,
        }
    }

    pub fn sapling(pos: Vec2, rng: &mut impl Rng) -> Self {
        let transform_delay = SAPLING_TRANSFORM_MIN + rng.random::<f32>() * SAPLING_TRANSFORM_SPREAD;
        Self::base(
            pos,
            SAPLING_RADIUS,
            SAPLING_SPEED,
            SAPLING_HEALTH,
            SAPLING_XP,
            EnemyKind::Sapling {
                timer: 0.0,
                transform_delay,
            },
        )
    }

    pub fn stoneling(pos: Vec2) -> Self {
        Self::base(
            pos,
            STONELING_RADIUS,
            STONELING_SPEED,
            STONELING_HEALTH,
            STONELING_XP,
            EnemyKind::Stoneling {
                pose: StonelingPose::Idle,
                jump_timer: 0.0,
            },
        )
    }

    pub fn flowerling(pos: Vec2, born_from_sapling: bool) -> Self {
        let health = if born_from_sapling {
            FLOWERLING_SAPLING_HEALTH
        } else {
            FLOWERLING_HEALTH
        };
        Self::base(
            pos,
            FLOWERLING_RADIUS,
            0.0,
            health,
            FLOWERLING_XP,
            EnemyKind::Flowerling {
                shoot_timer: FLOWERLING_FIRST_SHOT,
                born_from_sapling,
            },
        )
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            EnemyKind::Sapling { .. } => "sapling",
            EnemyKind::Stoneling { .. } => "stoneling",
            EnemyKind::Flowerling { .. } => "flowerling",
        }
    }

    /// Advance this enemy's state machine toward `target` (the player)
    pub fn update(&mut self, dt: f32, target: Vec2, rng: &mut impl Rng) -> Option<EnemyAction> {
        let to_target = normalize_guarded(target - self.pos);

        match &mut self.kind {
            EnemyKind::Sapling {
                timer,
                transform_delay,
            } => {
                *timer += dt;
                self.pos += to_target * self.speed * dt;

                if *timer >= *transform_delay {
                    self.drops_xp = false;
                    self.removed = true;
                    log::debug!("Sapling rooted at ({:.0}, {:.0})", self.pos.x, self.pos.y);
                    return Some(EnemyAction::Transform(Enemy::flowerling(self.pos, true)));
                }
                None
            }

            EnemyKind::Stoneling { pose, jump_timer } => {
                *jump_timer -= dt;
                if *pose != StonelingPose::Jumping && *jump_timer <= 0.0 {
                    *pose = StonelingPose::Jumping;
                    *jump_timer = STONELING_JUMP_DURATION;
                }

                if *pose == StonelingPose::Jumping {
                    self.pos += to_target * self.speed * STONELING_JUMP_SPEED_FACTOR * dt;
                    // Airborne time drains twice as fast
                    *jump_timer -= dt;
                    if *jump_timer <= 0.0 {
                        *pose = StonelingPose::Recover;
                        *jump_timer = STONELING_JUMP_COOLDOWN;
                    }
                }
                None
            }

            EnemyKind::Flowerling { shoot_timer, .. } => {
                *shoot_timer -= dt;
                if *shoot_timer > 0.0 {
                    return None;
                }
                *shoot_timer = FLOWERLING_SHOT_MIN + rng.random::<f32>() * FLOWERLING_SHOT_SPREAD;
                Some(EnemyAction::Fire(Projectile::hostile(
                    self.pos + to_target * (self.radius + SEED_MUZZLE_OFFSET),
                    to_target * SEED_SPEED,
                    SEED_DAMAGE,
                )))
            }
        }
    }

    /// Subtract health; at zero the enemy is removed and counts as killed
    ///
    /// No effect once the enemy is already removed.
    pub fn take_damage(&mut self, amount: f32) {
        if self.removed {
            return;
        }
        self.health -= amount;
        if self.health <= 0.0 {
            self.removed = true;
            self.killed = true;
        }
    }

    /// Damage dealt to the player on touch
    pub fn contact_damage(&self) -> f32 {
        match self.kind {
            EnemyKind::Sapling { .. } => SAPLING_CONTACT_DAMAGE,
            EnemyKind::Stoneling {
                pose: StonelingPose::Jumping,
                ..
            } => STONELING_JUMP_CONTACT_DAMAGE,
            EnemyKind::Stoneling { .. } => 0.0,
            EnemyKind::Flowerling { .. } => FLOWERLING_CONTACT_DAMAGE,
        }
    }

    /// Should an orb spawn for this enemy now
    pub fn pending_drop(&self) -> bool {
        self.removed && self.killed && self.drops_xp
    }
}

impl Entity for Enemy {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_sapling_delay_in_range() {
        let mut rng = rng();
        for _ in 0..100 {
            let sapling = Enemy::sapling(Vec2::ZERO, &mut rng);
            let EnemyKind::Sapling { transform_delay, .. } = sapling.kind else {
                panic!("expected sapling");
            };
            assert!(transform_delay >= SAPLING_TRANSFORM_MIN);
            assert!(transform_delay <= SAPLING_TRANSFORM_MIN + SAPLING_TRANSFORM_SPREAD);
        }
    }

    #[test]
    fn test_sapling_chases() {
        let mut rng = rng();
        let mut sapling = Enemy::sapling(Vec2::new(0.0, 0.0), &mut rng);
        let action = sapling.update(0.1, Vec2::new(100.0, 0.0), &mut rng);
        assert!(action.is_none());
        assert!((sapling.pos.x - SAPLING_SPEED * 0.1).abs() < 1e-4);
        assert_eq!(sapling.pos.y, 0.0);
    }

    #[test]
    fn test_sapling_transforms_into_flowerling() {
        let mut rng = rng();
        let mut sapling = Enemy::sapling(Vec2::new(50.0, 50.0), &mut rng);
        if let EnemyKind::Sapling {
            ref mut transform_delay,
            ..
        } = sapling.kind
        {
            *transform_delay = 0.05;
        }

        // Target on top of the sapling so it stays put
        let action = sapling.update(0.1, Vec2::new(50.0, 50.0), &mut rng);
        assert!(sapling.removed);
        assert!(!sapling.killed);
        assert!(!sapling.drops_xp);
        assert!(!sapling.pending_drop());

        let Some(EnemyAction::Transform(flower)) = action else {
            panic!("expected transform");
        };
        assert_eq!(flower.pos, Vec2::new(50.0, 50.0));
        assert_eq!(flower.health, FLOWERLING_SAPLING_HEALTH);
        assert!(matches!(
            flower.kind,
            EnemyKind::Flowerling {
                born_from_sapling: true,
                ..
            }
        ));
    }

    #[test]
    fn test_stoneling_jump_cycle() {
        let mut rng = rng();
        let mut stone = Enemy::stoneling(Vec2::new(0.0, 0.0));
        let target = Vec2::new(1000.0, 0.0);

        // Timer starts expired: jumps on the first update
        stone.update(0.1, target, &mut rng);
        assert!(matches!(
            stone.kind,
            EnemyKind::Stoneling {
                pose: StonelingPose::Jumping,
                ..
            }
        ));
        assert!((stone.pos.x - STONELING_SPEED * STONELING_JUMP_SPEED_FACTOR * 0.1).abs() < 1e-3);
        assert_eq!(stone.contact_damage(), STONELING_JUMP_CONTACT_DAMAGE);

        // Jump runs out after half its nominal duration
        let mut airborne = 0;
        while matches!(
            stone.kind,
            EnemyKind::Stoneling {
                pose: StonelingPose::Jumping,
                ..
            }
        ) {
            stone.update(1.0 / 60.0, target, &mut rng);
            airborne += 1;
            assert!(airborne <= 16, "stoneling never landed");
        }
        assert!(airborne >= 11);
        assert!(matches!(
            stone.kind,
            EnemyKind::Stoneling {
                pose: StonelingPose::Recover,
                ..
            }
        ));
        assert_eq!(stone.contact_damage(), 0.0);

        // Recovering stonelings stay put
        let landed = stone.pos;
        stone.update(0.1, target, &mut rng);
        assert_eq!(stone.pos, landed);

        // And jump again once the cooldown expires
        let mut updates = 0;
        while !matches!(
            stone.kind,
            EnemyKind::Stoneling {
                pose: StonelingPose::Jumping,
                ..
            }
        ) {
            stone.update(0.1, target, &mut rng);
            updates += 1;
            assert!(updates <= 27, "stoneling never jumped again");
        }
        assert!(updates >= 24);
    }

    #[test]
    fn test_flowerling_fires_on_interval() {
        let mut rng = rng();
        let mut flower = Enemy::flowerling(Vec2::new(100.0, 100.0), false);
        assert_eq!(flower.health, FLOWERLING_HEALTH);
        assert_eq!(flower.speed, 0.0);

        assert!(flower.update(0.4, Vec2::new(100.0, 300.0), &mut rng).is_none());
        let Some(EnemyAction::Fire(seed)) = flower.update(0.2, Vec2::new(100.0, 300.0), &mut rng)
        else {
            panic!("expected a shot");
        };
        assert!(!seed.friendly);
        assert_eq!(seed.damage, SEED_DAMAGE);
        assert_eq!(seed.vel, Vec2::new(0.0, SEED_SPEED));
        assert_eq!(
            seed.pos,
            Vec2::new(100.0, 100.0 + FLOWERLING_RADIUS + SEED_MUZZLE_OFFSET)
        );
        assert_eq!(flower.pos, Vec2::new(100.0, 100.0));

        let EnemyKind::Flowerling { shoot_timer, .. } = flower.kind else {
            panic!("expected flowerling");
        };
        assert!((FLOWERLING_SHOT_MIN..=FLOWERLING_SHOT_MIN + FLOWERLING_SHOT_SPREAD).contains(&shoot_timer));
    }

    #[test]
    fn test_take_damage_kills_once() {
        let mut stone = Enemy::stoneling(Vec2::ZERO);
        stone.take_damage(50.0);
        assert!(!stone.removed);
        stone.take_damage(40.0);
        assert!(stone.removed);
        assert!(stone.killed);
        assert!(stone.pending_drop());

        stone.take_damage(40.0);
        assert_eq!(stone.health, 0.0);
    }

    #[test]
    fn test_contact_damage_per_variant() {
        let mut rng = rng();
        assert_eq!(Enemy::sapling(Vec2::ZERO, &mut rng).contact_damage(), SAPLING_CONTACT_DAMAGE);
        assert_eq!(Enemy::stoneling(Vec2::ZERO).contact_damage(), 0.0);
        assert_eq!(
            Enemy::flowerling(Vec2::ZERO, false).contact_damage(),
            FLOWERLING_CONTACT_DAMAGE
        );
    }
}
