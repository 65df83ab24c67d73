//! Collision and combat resolution
//!
//! Runs once per tick after every entity has updated. Nothing is deleted
//! here: hits only set `removed` flags, and `cleanup` compacts the pools at
//! the end of the tick.

use rand::Rng;

use super::enemy::Enemy;
use super::player::Player;
use super::projectile::{ExperienceOrb, Projectile};
use super::state::{Entity, World};
use crate::consts::*;
use crate::normalize_guarded;

/// Tallies from one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CombatReport {
    /// Friendly projectiles that hit an enemy
    pub bullet_hits: u32,
    /// Hostile projectiles that reached the player
    pub seed_hits: u32,
    /// Enemies touching the player
    pub contacts: u32,
}

/// Resolve every projectile and contact interaction for this tick
pub fn resolve(
    player: &mut Player,
    enemies: &mut [Enemy],
    bullets: &mut [Projectile],
    enemy_bullets: &mut [Projectile],
) -> CombatReport {
    let mut report = CombatReport::default();

    // Friendly projectiles vs enemies: first overlap in iteration order wins
    for bullet in bullets.iter_mut() {
        for enemy in enemies.iter_mut() {
            if bullet.removed {
                break;
            }
            if enemy.removed || !bullet.overlaps(&*enemy, 0.0) {
                continue;
            }
            enemy.take_damage(bullet.damage);
            bullet.removed = true;
            report.bullet_hits += 1;
        }
    }

    // Hostile projectiles vs player
    for seed in enemy_bullets.iter_mut() {
        if !seed.removed && seed.overlaps(&*player, 0.0) {
            seed.removed = true;
            player.take_damage(seed.damage);
            report.seed_hits += 1;
        }
    }

    // Enemy contact: damage then a small shove away from the enemy
    for enemy in enemies.iter() {
        if enemy.removed || !enemy.overlaps(&*player, CONTACT_TOLERANCE) {
            continue;
        }
        let damage = enemy.contact_damage();
        if damage > 0.0 {
            player.take_damage(damage);
        }
        let push = normalize_guarded(player.pos - enemy.pos);
        player.pos += push * CONTACT_PUSH;
        report.contacts += 1;
    }

    report
}

/// Spawn one orb for every enemy killed by damage this tick
///
/// Returns the number of orbs spawned.
pub fn harvest_orbs(
    enemies: &mut [Enemy],
    orbs: &mut Vec<ExperienceOrb>,
    rng: &mut impl Rng,
) -> u32 {
    let mut spawned = 0;
    for enemy in enemies.iter_mut().filter(|e| e.pending_drop()) {
        enemy.drops_xp = false;
        let pulse = rng.random::<f32>() * std::f32::consts::TAU;
        orbs.push(ExperienceOrb::new(enemy.pos, enemy.xp_value, pulse));
        log::debug!("{} killed, dropped {} xp", enemy.name(), enemy.xp_value);
        spawned += 1;
    }
    spawned
}

/// Evict every removed entity, keeping survivors in order
pub fn compact<T: Entity>(pool: &mut Vec<T>) {
    pool.retain(|e| !e.is_removed());
}

/// Compact all four pools; the player is never touched
pub fn cleanup(world: &mut World) {
    compact(&mut world.enemies);
    compact(&mut world.bullets);
    compact(&mut world.enemy_bullets);
    compact(&mut world.orbs);
}
