//! Per-frame simulation tick
//!
//! Core game loop that advances the world by one frame delta.

use glam::Vec2;

use super::combat;
use super::enemy::EnemyAction;
use super::state::{GamePhase, World};
use crate::consts::*;
use crate::normalize_guarded;

/// Intent snapshot sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Fire held
    pub fire: bool,
}

impl TickInput {
    /// Raw (unnormalized) direction from the four movement intents
    pub fn move_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.move_up {
            dir.y -= 1.0;
        }
        if self.move_down {
            dir.y += 1.0;
        }
        if self.move_left {
            dir.x -= 1.0;
        }
        if self.move_right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Advance the world by `dt` seconds
///
/// Order: spawn, player, enemies, projectiles, orbs, combat, orb drops,
/// cleanup, then the game-over check. Does nothing once the game is over.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if world.phase == GamePhase::GameOver {
        return;
    }
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    world.ticks += 1;
    world.elapsed += dt;

    if let Some(enemy) = world
        .spawner
        .update(dt, world.elapsed, &world.arena, &mut world.rng)
    {
        world.enemies.push(enemy);
    }

    if let Some(shot) = world.player.update(dt, input, &world.arena) {
        world.bullets.push(shot);
    }

    // Holding fire locks aim onto the nearest enemy for the next shot
    if input.fire {
        if let Some(target) = nearest_enemy(world, world.player.pos) {
            let aim = normalize_guarded(target - world.player.pos);
            if aim != Vec2::ZERO {
                world.player.last_aim = aim;
            }
        }
    }

    let player_pos = world.player.pos;
    let mut rooted = Vec::new();
    for enemy in world.enemies.iter_mut().filter(|e| !e.removed) {
        match enemy.update(dt, player_pos, &mut world.rng) {
            Some(EnemyAction::Transform(flower)) => rooted.push(flower),
            Some(EnemyAction::Fire(seed)) => world.enemy_bullets.push(seed),
            None => {}
        }
    }
    world.enemies.extend(rooted);

    for bullet in &mut world.bullets {
        bullet.update(dt, &world.arena);
    }
    for seed in &mut world.enemy_bullets {
        seed.update(dt, &world.arena);
    }
    for orb in &mut world.orbs {
        orb.update(dt, &mut world.player);
    }

    let report = combat::resolve(
        &mut world.player,
        &mut world.enemies,
        &mut world.bullets,
        &mut world.enemy_bullets,
    );
    world.kills += combat::harvest_orbs(&mut world.enemies, &mut world.orbs, &mut world.rng);
    combat::cleanup(world);

    log::trace!(
        "tick {}: {} enemies, {} shots, {} seeds, {} orbs, {:?}",
        world.ticks,
        world.enemies.len(),
        world.bullets.len(),
        world.enemy_bullets.len(),
        world.orbs.len(),
        report
    );

    if world.player.is_dead() {
        world.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {:.1}s at level {} ({} kills)",
            world.elapsed,
            world.player.level,
            world.kills
        );
    }
}

/// Position of the live enemy closest to `from`
pub fn nearest_enemy(world: &World, from: Vec2) -> Option<Vec2> {
    world
        .enemies
        .iter()
        .filter(|e| !e.removed)
        .map(|e| e.pos)
        .min_by(|a, b| {
            a.distance_squared(from)
                .partial_cmp(&b.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
