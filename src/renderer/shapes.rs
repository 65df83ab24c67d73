//! Shape generation for world entities
//!
//! Each entity becomes a handful of circles and ellipses in world space.
//! Draw order: background, grid, orbs, enemies, player shots, seeds, player.

use std::f32::consts::PI;

use glam::Vec2;

use super::{Canvas, Rgba, Shape};
use crate::sim::{Enemy, EnemyKind, ExperienceOrb, Player, Projectile, StonelingPose, World};

const BACKGROUND: Rgba = Rgba::rgb(0x2b, 0x4a, 0x3f);
const GRID_LINE: Rgba = Rgba::rgba(255, 255, 255, 0.05);
const GRID_SIZE: f32 = 40.0;
const SMILE_SEGMENTS: u32 = 6;

const WHITE: Rgba = Rgba::rgb(255, 255, 255);
const BLACK: Rgba = Rgba::rgb(0, 0, 0);

const PLAYER_BODY: Rgba = Rgba::rgb(0xf6, 0xb3, 0xd2);
const PLAYER_MOUTH: Rgba = Rgba::rgb(0xfc, 0xd3, 0x6a);
/// Body color while the post-hit grace window runs
const PLAYER_FLASH: Rgba = Rgba::rgba(0xff, 0xff, 0xff, 0.8);

const SAPLING_BODY: Rgba = Rgba::rgb(0x8a, 0xf0, 0x9c);
const SAPLING_SHADE: Rgba = Rgba::rgb(0x5b, 0xa8, 0x70);
const STONELING_BODY: Rgba = Rgba::rgb(0x9a, 0xa1, 0xff);
const STONELING_SHADE: Rgba = Rgba::rgb(0x5f, 0x68, 0xcf);
const STONELING_DUST: Rgba = Rgba::rgba(255, 255, 255, 0.6);
const PETAL_LIGHT: Rgba = Rgba::rgb(0xff, 0xe0, 0x8a);
const PETAL_DARK: Rgba = Rgba::rgb(0xfc, 0xd3, 0x6a);
const FLOWER_FACE: Rgba = Rgba::rgb(0xff, 0x9e, 0xcf);

const SHOT_COLOR: Rgba = Rgba::rgb(0xfe, 0xfe, 0xfe);
const SEED_COLOR: Rgba = Rgba::rgba(255, 255, 255, 0.85);
const ORB_COLOR: Rgba = Rgba::rgb(0x8d, 0xf9, 0xff);

/// Draw a full frame of the world onto `canvas`
pub fn draw_world(world: &World, canvas: &mut impl Canvas) {
    canvas.clear(BACKGROUND);
    draw_grid(world, canvas);

    for orb in &world.orbs {
        draw_orb(orb, canvas);
    }
    for enemy in &world.enemies {
        draw_enemy(enemy, canvas);
    }
    for shot in world.bullets.iter().chain(&world.enemy_bullets) {
        draw_projectile(shot, canvas);
    }
    draw_player(&world.player, canvas);
}

fn draw_grid(world: &World, canvas: &mut impl Canvas) {
    let (w, h) = (world.arena.width, world.arena.height);
    let mut x = 0.0;
    while x <= w {
        canvas.draw(&Shape::Line {
            from: Vec2::new(x, 0.0),
            to: Vec2::new(x, h),
            color: GRID_LINE,
        });
        x += GRID_SIZE;
    }
    let mut y = 0.0;
    while y <= h {
        canvas.draw(&Shape::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(w, y),
            color: GRID_LINE,
        });
        y += GRID_SIZE;
    }
}

fn circle(center: Vec2, radius: f32, color: Rgba) -> Shape {
    Shape::Circle {
        center,
        radius,
        color,
    }
}

fn ellipse(center: Vec2, radii: Vec2, rotation: f32, color: Rgba) -> Shape {
    Shape::Ellipse {
        center,
        radii,
        rotation,
        color,
    }
}

/// Pair of eyes (white with a pupil) at `±dx` from center
fn draw_eyes(center: Vec2, dx: f32, dy: f32, size: f32, canvas: &mut impl Canvas) {
    for side in [-1.0, 1.0] {
        let eye = center + Vec2::new(side * dx, dy);
        canvas.draw(&circle(eye, size, WHITE));
        canvas.draw(&circle(eye, size / 2.0, BLACK));
    }
}

/// Lower half of a circle traced as a polyline
fn draw_smile(center: Vec2, radius: f32, color: Rgba, canvas: &mut impl Canvas) {
    let point = |i: u32| center + Vec2::from_angle(PI * i as f32 / SMILE_SEGMENTS as f32) * radius;
    for i in 0..SMILE_SEGMENTS {
        canvas.draw(&Shape::Line {
            from: point(i),
            to: point(i + 1),
            color,
        });
    }
}

fn draw_player(player: &Player, canvas: &mut impl Canvas) {
    let body = if player.invulnerable_time > 0.0 {
        PLAYER_FLASH
    } else {
        PLAYER_BODY
    };
    let r = player.radius;
    canvas.draw(&ellipse(player.pos, Vec2::new(r, r * 0.81), 0.0, body));
    draw_eyes(player.pos, 8.0, -4.0, 6.0, canvas);
    canvas.draw(&circle(player.pos + Vec2::new(0.0, 9.0), 6.0, PLAYER_MOUTH));
}

/// Round body with a darker belly, used by Saplings and Stonelings
fn draw_blob(enemy: &Enemy, base: Rgba, shade: Rgba, canvas: &mut impl Canvas) {
    let r = enemy.radius;
    canvas.draw(&ellipse(enemy.pos, Vec2::new(r, r * 0.87), 0.0, base));
    canvas.draw(&ellipse(
        enemy.pos + Vec2::new(0.0, r * 0.35),
        Vec2::new(r * 0.9, r * 0.37),
        0.0,
        shade,
    ));
    draw_eyes(enemy.pos, 7.0, -5.0, 5.0, canvas);
    // Half-disc mouth below the eyes
    canvas.draw(&ellipse(
        enemy.pos + Vec2::new(0.0, 9.5),
        Vec2::new(4.0, 2.5),
        0.0,
        BLACK,
    ));
}

fn draw_enemy(enemy: &Enemy, canvas: &mut impl Canvas) {
    let r = enemy.radius;
    match enemy.kind {
        EnemyKind::Sapling { .. } => draw_blob(enemy, SAPLING_BODY, SAPLING_SHADE, canvas),
        EnemyKind::Stoneling { pose, .. } => {
            // Lifted body while mid-jump, dust ring over the feet
            if pose == StonelingPose::Jumping {
                let lifted = Enemy {
                    pos: enemy.pos - Vec2::new(0.0, r * 0.3),
                    ..enemy.clone()
                };
                draw_blob(&lifted, STONELING_BODY, STONELING_SHADE, canvas);
            } else {
                draw_blob(enemy, STONELING_BODY, STONELING_SHADE, canvas);
            }
            canvas.draw(&ellipse(
                enemy.pos + Vec2::new(0.0, r * 0.8),
                Vec2::new(r, r * 0.4),
                0.0,
                STONELING_DUST,
            ));
        }
        EnemyKind::Flowerling { .. } => {
            for i in 0..6 {
                let angle = 2.0 * PI * i as f32 / 6.0;
                let color = if i % 2 == 0 { PETAL_LIGHT } else { PETAL_DARK };
                canvas.draw(&ellipse(
                    enemy.pos + Vec2::from_angle(angle) * (r - 4.0),
                    Vec2::new(r / 2.0, r),
                    angle,
                    color,
                ));
            }
            canvas.draw(&circle(enemy.pos, r * 0.65, FLOWER_FACE));
            for side in [-1.0, 1.0] {
                canvas.draw(&circle(enemy.pos + Vec2::new(side * 5.0, -2.0), 2.2, BLACK));
            }
            draw_smile(enemy.pos + Vec2::new(0.0, 6.0), 5.0, BLACK, canvas);
        }
    }
}

fn draw_projectile(shot: &Projectile, canvas: &mut impl Canvas) {
    let color = if shot.friendly { SHOT_COLOR } else { SEED_COLOR };
    canvas.draw(&circle(shot.pos, shot.radius, color));
}

fn draw_orb(orb: &ExperienceOrb, canvas: &mut impl Canvas) {
    canvas.draw(&circle(orb.pos, orb.radius, ORB_COLOR));
    canvas.draw(&circle(orb.pos - Vec2::splat(2.0), orb.radius / 2.5, WHITE));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Arena;

    /// Records every call for inspection
    #[derive(Default)]
    struct RecordingCanvas {
        cleared: Vec<Rgba>,
        shapes: Vec<Shape>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, color: Rgba) {
            self.cleared.push(color);
        }

        fn draw(&mut self, shape: &Shape) {
            self.shapes.push(shape.clone());
        }
    }

    fn circles(canvas: &RecordingCanvas) -> Vec<(Vec2, f32, Rgba)> {
        canvas
            .shapes
            .iter()
            .filter_map(|s| match *s {
                Shape::Circle {
                    center,
                    radius,
                    color,
                } => Some((center, radius, color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_world_draws_background_and_player() {
        let world = World::new(Arena::new(80.0, 40.0), 1);
        let mut canvas = RecordingCanvas::default();
        draw_world(&world, &mut canvas);

        assert_eq!(canvas.cleared, vec![BACKGROUND]);
        let lines = canvas
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Line { .. }))
            .count();
        // x = 0, 40, 80 and y = 0, 40
        assert_eq!(lines, 5);
        // Player body
        assert!(canvas.shapes.iter().any(|s| matches!(
            s,
            Shape::Ellipse { color, .. } if *color == PLAYER_BODY
        )));
    }

    #[test]
    fn test_projectile_colors_follow_owner() {
        let mut world = World::new(Arena::new(800.0, 600.0), 1);
        world
            .bullets
            .push(Projectile::friendly(Vec2::new(10.0, 10.0), Vec2::ZERO, 1.0));
        world
            .enemy_bullets
            .push(Projectile::hostile(Vec2::new(20.0, 20.0), Vec2::ZERO, 1.0));

        let mut canvas = RecordingCanvas::default();
        draw_world(&world, &mut canvas);
        let found = circles(&canvas);
        assert!(found.contains(&(Vec2::new(10.0, 10.0), 7.0, SHOT_COLOR)));
        assert!(found.contains(&(Vec2::new(20.0, 20.0), 8.0, SEED_COLOR)));
    }

    #[test]
    fn test_flowerling_has_six_petals() {
        let mut world = World::new(Arena::new(800.0, 600.0), 1);
        world.enemies.push(Enemy::flowerling(Vec2::new(100.0, 100.0), false));

        let mut canvas = RecordingCanvas::default();
        draw_world(&world, &mut canvas);
        let petals = canvas
            .shapes
            .iter()
            .filter(|s| matches!(
                s,
                Shape::Ellipse { color, .. } if *color == PETAL_LIGHT || *color == PETAL_DARK
            ))
            .count();
        assert_eq!(petals, 6);
    }

    #[test]
    fn test_faces_have_mouths() {
        let mut world = World::new(Arena::new(800.0, 600.0), 1);
        world.enemies.push(Enemy::flowerling(Vec2::new(100.0, 100.0), false));
        world.enemies.push(Enemy::stoneling(Vec2::new(300.0, 300.0)));

        let mut canvas = RecordingCanvas::default();
        draw_world(&world, &mut canvas);

        // Flowerling smile: black polyline under the face
        let smile: Vec<_> = canvas
            .shapes
            .iter()
            .filter_map(|s| match *s {
                Shape::Line { from, to, color } if color == BLACK => Some((from, to)),
                _ => None,
            })
            .collect();
        assert_eq!(smile.len(), SMILE_SEGMENTS as usize);
        assert!(smile.iter().all(|(a, b)| a.y >= 105.9 && b.y >= 105.9));

        // Stoneling mouth below its eyes
        assert!(canvas.shapes.iter().any(|s| matches!(
            *s,
            Shape::Ellipse { center, color, .. }
                if color == BLACK && center == Vec2::new(300.0, 309.5)
        )));
    }

    #[test]
    fn test_stoneling_dust_drawn_over_body() {
        let mut world = World::new(Arena::new(800.0, 600.0), 1);
        world.enemies.push(Enemy::stoneling(Vec2::new(100.0, 100.0)));

        let mut canvas = RecordingCanvas::default();
        draw_world(&world, &mut canvas);
        let position = |wanted: Rgba| {
            canvas.shapes.iter().position(|s| {
                matches!(*s, Shape::Ellipse { color, .. } if color == wanted)
            })
        };
        let body = position(STONELING_BODY).expect("body drawn");
        let dust = position(STONELING_DUST).expect("dust drawn");
        assert!(dust > body);
    }

    #[test]
    fn test_jumping_stoneling_is_lifted() {
        let mut world = World::new(Arena::new(800.0, 600.0), 1);
        let mut stone = Enemy::stoneling(Vec2::new(100.0, 100.0));
        stone.kind = EnemyKind::Stoneling {
            pose: StonelingPose::Jumping,
            jump_timer: 0.3,
        };
        world.enemies.push(stone);

        let mut canvas = RecordingCanvas::default();
        draw_world(&world, &mut canvas);
        let body = canvas.shapes.iter().find_map(|s| match *s {
            Shape::Ellipse { center, color, .. } if color == STONELING_BODY => Some(center),
            _ => None,
        });
        let lifted = body.expect("stoneling body drawn");
        assert!(lifted.y < 100.0);
    }
}
