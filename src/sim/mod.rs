//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (insertion order, monotonic entity IDs)
//! - No rendering or platform dependencies

pub mod collision;
pub mod demo;
pub mod input;
pub mod level;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, aabb_overlap, resolve_collisions};
pub use demo::{DemoActions, DemoPilot};
pub use input::{ShotError, move_shooter, shoot};
pub use level::{Level, level_for};
pub use physics::{update_blocks, update_projectiles};
pub use spawner::{SpawnTimer, new_block, spawn_block};
pub use state::{Block, BlockSkin, GameEvent, GamePhase, GameState, Projectile, Shooter};
pub use tick::tick;
