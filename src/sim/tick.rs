//! Per-frame simulation tick
//!
//! Runs one frame of the game: level, motion, collisions, then the game-over
//! check. Spawning and input happen outside the tick.

use super::collision::resolve_collisions;
use super::level::level_for;
use super::physics::{update_blocks, update_projectiles};
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one frame
///
/// Returns the phase after the tick; a driver should stop scheduling frames
/// once it sees [`GamePhase::GameOver`].
pub fn tick(state: &mut GameState) -> GamePhase {
    if state.phase == GamePhase::GameOver {
        return state.phase;
    }

    state.time_ticks += 1;

    let level = level_for(state.score);
    if level != state.level {
        log::info!("Level {} reached at score {}", level.number(), state.score);
        state.level = level;
        state.events.push(GameEvent::LevelChanged { level });
    }

    update_blocks(state);
    update_projectiles(state);
    resolve_collisions(state);

    if state.shooter.health <= 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks, final score {}",
            state.time_ticks,
            state.score
        );
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
    }

    state.phase
}
