//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Frame delta in, state out
//! - Seeded RNG only (owned by the `World`)
//! - Stable iteration order (insertion order of each pool)
//! - No rendering or platform dependencies

pub mod combat;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod spawner;
pub mod state;
pub mod tick;

pub use combat::{CombatReport, cleanup, harvest_orbs, resolve};
pub use enemy::{Enemy, EnemyAction, EnemyKind, StonelingPose};
pub use player::Player;
pub use projectile::{ExperienceOrb, Projectile};
pub use spawner::Spawner;
pub use state::{Arena, Entity, GamePhase, World};
pub use tick::{TickInput, nearest_enemy, tick};
