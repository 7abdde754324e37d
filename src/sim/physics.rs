//! Per-tick motion for blocks and projectiles
//!
//! Both integrators cull first and move second, so an entity that leaves the
//! play area is still drawn for the frame it left on.

use super::state::GameState;
use crate::consts::FLOOR_Y;

/// Advance every block by its velocity
///
/// Blocks already at or below the floor are dropped first, without penalty.
/// A block that ends up outside `[-1, 1 - width]` horizontally has its drift
/// reversed; its position is left where it is.
pub fn update_blocks(state: &mut GameState) {
    let right_wall = 1.0 - state.tuning.block_width;

    state.blocks.retain(|b| b.pos.y > FLOOR_Y);
    for block in &mut state.blocks {
        block.pos += block.vel;

        if block.pos.x <= -1.0 || block.pos.x >= right_wall {
            block.vel.x = -block.vel.x;
        }
    }
}

/// Advance every projectile, dropping those outside the open viewport
pub fn update_projectiles(state: &mut GameState) {
    state
        .projectiles
        .retain(|p| p.pos.x > -1.0 && p.pos.x < 1.0 && p.pos.y > -1.0 && p.pos.y < 1.0);
    for projectile in &mut state.projectiles {
        projectile.pos += projectile.vel;
    }
}
