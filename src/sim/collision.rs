//! Collision detection and response
//!
//! Every collision in the game is an axis-aligned box overlap. The passes
//! walk entities in insertion order and never remove while iterating: hits
//! are marked first and the collections are compacted afterwards.

use glam::Vec2;

use super::state::{GameEvent, GameState};
use crate::consts::FLOOR_Y;

/// Axis-aligned rectangle anchored at its lower-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, width: f32, height: f32) -> Self {
        Self {
            min,
            size: Vec2::new(width, height),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// Strict overlap test: rectangles that merely touch do not collide
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max().x && a.max().x > b.min.x && a.min.y < b.max().y && a.max().y > b.min.y
}

/// Projectiles against blocks
///
/// A projectile is consumed by the first live block it overlaps and damages
/// only that block. A block whose hit points run out is destroyed, scores a
/// point, and can no longer absorb projectiles later in the same pass.
pub fn projectile_block_pass(state: &mut GameState) {
    let tuning = state.tuning.clone();
    let mut consumed = vec![false; state.projectiles.len()];

    for (pi, projectile) in state.projectiles.iter().enumerate() {
        let p_rect = projectile.rect(&tuning);
        let Some(block) = state
            .blocks
            .iter_mut()
            .find(|b| b.hp > 0 && aabb_overlap(&p_rect, &b.rect(&tuning)))
        else {
            continue;
        };

        consumed[pi] = true;
        block.hp -= 1;
        if block.hp == 0 {
            state.score += 1;
            log::debug!("Block {} destroyed, score {}", block.id, state.score);
            state.events.push(GameEvent::BlockDestroyed {
                block_id: block.id,
                score: state.score,
            });
        }
    }

    let mut flags = consumed.into_iter();
    state.projectiles.retain(|_| !flags.next().unwrap_or(false));
    state.blocks.retain(|b| b.hp > 0);
}

/// Blocks against the shooter: each overlapping block costs one health
pub fn block_shooter_pass(state: &mut GameState) {
    let shooter_rect = state.shooter.rect();
    let tuning = &state.tuning;
    let mut hits = 0;

    state.blocks.retain(|b| {
        let hit = aabb_overlap(&b.rect(tuning), &shooter_rect);
        if hit {
            hits += 1;
        }
        !hit
    });

    apply_damage(state, hits);
}

/// Blocks that reached the floor: each costs one health
pub fn block_floor_pass(state: &mut GameState) {
    let before = state.blocks.len();
    state.blocks.retain(|b| b.pos.y > FLOOR_Y);
    let landed = before - state.blocks.len();

    apply_damage(state, landed);
}

/// One health and one event per damaging block
fn apply_damage(state: &mut GameState, hits: usize) {
    for _ in 0..hits {
        state.shooter.health -= 1;
        state.events.push(GameEvent::HealthChanged {
            health: state.shooter.health,
        });
    }
}

/// Run all collision passes for this tick, in order
pub fn resolve_collisions(state: &mut GameState) {
    projectile_block_pass(state);
    block_shooter_pass(state);
    block_floor_pass(state);
}
