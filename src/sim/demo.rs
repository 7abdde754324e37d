//! Demo pilot - the game plays itself
//!
//! Used for headless runs and attract mode. The pilot only produces the same
//! inputs a player could (key steps and clicks), so it never bypasses the
//! rules.

use glam::Vec2;

use super::state::{Block, GameState};
use crate::platform::Key;

/// Inputs the pilot wants to send this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DemoActions {
    pub step: Option<Key>,
    pub fire_at: Option<Vec2>,
}

/// Deterministic AI player
#[derive(Debug, Clone)]
pub struct DemoPilot {
    /// Minimum ticks between shots
    fire_every: u64,
    last_shot_tick: Option<u64>,
}

impl Default for DemoPilot {
    fn default() -> Self {
        Self::new(12)
    }
}

impl DemoPilot {
    pub fn new(fire_every: u64) -> Self {
        Self {
            fire_every: fire_every.max(1),
            last_shot_tick: None,
        }
    }

    /// Decide this frame's inputs
    ///
    /// Targets the lowest block, steps toward it, and fires at where it will
    /// be when the shot arrives.
    pub fn plan(&mut self, state: &GameState) -> DemoActions {
        let Some(target) = most_dangerous(&state.blocks) else {
            return DemoActions::default();
        };

        let tuning = &state.tuning;
        let block_center = target.rect(tuning).center();
        let shooter_center = state.shooter.rect().center();

        let dx = block_center.x - shooter_center.x;
        let step = if dx.abs() <= state.shooter.speed {
            None
        } else if dx < 0.0 {
            Some(Key::Left)
        } else {
            Some(Key::Right)
        };

        let ready = self
            .last_shot_tick
            .is_none_or(|last| state.time_ticks >= last + self.fire_every);
        let fire_at = if ready {
            self.last_shot_tick = Some(state.time_ticks);
            // Lead the target by the flight time to its current position
            let origin = state.shooter.emission_point();
            let flight_ticks = (block_center - origin).length() / tuning.projectile_speed;
            Some(block_center + target.vel * flight_ticks)
        } else {
            None
        };

        DemoActions { step, fire_at }
    }
}

/// Lowest block, oldest first on ties
fn most_dangerous(blocks: &[Block]) -> Option<&Block> {
    blocks.iter().fold(None, |lowest: Option<&Block>, b| match lowest {
        Some(l) if l.pos.y <= b.pos.y => Some(l),
        _ => Some(b),
    })
}
