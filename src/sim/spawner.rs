//! Block spawning
//!
//! Blocks arrive on a wall-clock timer that is independent of the frame rate.
//! The browser shell drives [`spawn_block`] from `setInterval`; headless
//! drivers use [`SpawnTimer`] to turn elapsed time into spawns.

use glam::Vec2;
use rand::Rng;

use super::level::{Level, level_for};
use super::state::{Block, BlockSkin, GameState};
use crate::consts::{BLOCK_MAX_HP, BLOCK_SPAWN_Y, SPAWN_INTERVAL_MS};

/// Most spawns a single `advance` may report; older backlog is dropped
pub const MAX_CATCH_UP: u32 = 8;

/// Build a block for `level` using any random source
pub fn new_block<R: Rng + ?Sized>(id: u32, level: Level, rng: &mut R) -> Block {
    let x: f32 = rng.random_range(-1.0..1.0);
    let skin = BlockSkin::ALL[rng.random_range(0..BlockSkin::ALL.len())];
    let hp = rng.random_range(1..=BLOCK_MAX_HP);
    let vel = level.block_velocity(rng);

    Block {
        id,
        pos: Vec2::new(x, BLOCK_SPAWN_Y),
        vel,
        hp,
        skin,
    }
}

/// Append one block using the session RNG
///
/// The level is taken from the current score rather than the cached level, so
/// a spawn landing between ticks already uses the new profile.
pub fn spawn_block(state: &mut GameState) -> u32 {
    let id = state.next_entity_id();
    let level = level_for(state.score);
    let block = new_block(id, level, &mut state.rng);
    log::trace!(
        "Spawned block {} at x={:.3} hp={} vel={:?}",
        id,
        block.pos.x,
        block.hp,
        block.vel
    );
    state.blocks.push(block);
    id
}

/// Fixed-period spawn clock
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval_ms: f64,
    elapsed_ms: f64,
    cancelled: bool,
}

impl SpawnTimer {
    /// A non-positive or non-finite interval falls back to [`SPAWN_INTERVAL_MS`]
    pub fn new(interval_ms: f64) -> Self {
        let interval_ms = if interval_ms.is_finite() && interval_ms > 0.0 {
            interval_ms
        } else {
            log::warn!(
                "Invalid spawn interval {}ms, using {}ms",
                interval_ms,
                SPAWN_INTERVAL_MS
            );
            SPAWN_INTERVAL_MS
        };
        Self {
            interval_ms,
            elapsed_ms: 0.0,
            cancelled: false,
        }
    }

    /// Feed elapsed time, returning how many spawns fell due
    ///
    /// Non-finite or non-positive steps are ignored. At most [`MAX_CATCH_UP`]
    /// spawns are reported per call.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if self.cancelled || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let periods = (self.elapsed_ms / self.interval_ms).floor();
        self.elapsed_ms -= periods * self.interval_ms;
        if periods > MAX_CATCH_UP as f64 {
            log::debug!("Spawn clock fell {} periods behind, dropping backlog", periods);
            return MAX_CATCH_UP;
        }
        periods as u32
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Stop the timer for good
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_block_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..500 {
            let block = new_block(id, Level::One, &mut rng);
            assert!((-1.0..1.0).contains(&block.pos.x));
            assert_eq!(block.pos.y, BLOCK_SPAWN_Y);
            assert!((1..=3).contains(&block.hp));
            assert_eq!(block.vel, Vec2::new(0.0, -0.005));
        }
    }

    #[test]
    fn test_new_block_uses_every_skin_and_hp() {
        let mut rng = Pcg32::seed_from_u64(9);
        let blocks: Vec<_> = (0..300).map(|id| new_block(id, Level::Two, &mut rng)).collect();
        for skin in BlockSkin::ALL {
            assert!(blocks.iter().any(|b| b.skin == skin));
        }
        for hp in 1..=3 {
            assert!(blocks.iter().any(|b| b.hp == hp));
        }
    }

    #[test]
    fn test_spawn_uses_level_from_score() {
        let mut state = GameState::new(5);
        state.score = 9;
        let id = spawn_block(&mut state);
        assert_eq!(state.block(id).map(|b| b.vel), Some(Vec2::new(0.0, -0.005)));

        // The cached level is stale until the next tick; the spawn is not
        state.score = 10;
        let id = spawn_block(&mut state);
        assert_eq!(state.block(id).map(|b| b.vel), Some(Vec2::new(0.0, -0.01)));
    }

    #[test]
    fn test_spawn_is_seeded() {
        let mut a = GameState::new(77);
        let mut b = GameState::new(77);
        for _ in 0..20 {
            spawn_block(&mut a);
            spawn_block(&mut b);
        }
        assert_eq!(a.blocks, b.blocks);
    }

    #[test]
    fn test_timer_fires_on_interval() {
        let mut timer = SpawnTimer::new(1000.0);
        assert_eq!(timer.advance(999.0), 0);
        assert_eq!(timer.advance(1.0), 1);
        assert_eq!(timer.advance(2500.0), 2);
        assert_eq!(timer.advance(500.0), 1);
    }

    #[test]
    fn test_timer_ignores_bad_steps() {
        let mut timer = SpawnTimer::new(1000.0);
        assert_eq!(timer.advance(f64::INFINITY), 0);
        assert_eq!(timer.advance(f64::NAN), 0);
        assert_eq!(timer.advance(-5.0), 0);
        assert_eq!(timer.advance(1000.0), 1);
    }

    #[test]
    fn test_bad_interval_uses_default() {
        for interval in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let mut timer = SpawnTimer::new(interval);
            assert_eq!(timer.interval_ms(), SPAWN_INTERVAL_MS);
            assert_eq!(timer.advance(16.0), 0);
            assert_eq!(timer.advance(SPAWN_INTERVAL_MS), 1);
        }
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut timer = SpawnTimer::new(1000.0);
        assert_eq!(timer.advance(1.0e12), MAX_CATCH_UP);
        // Backlog is gone; only the fractional remainder carries over
        assert_eq!(timer.advance(999.0), 0);
        assert_eq!(timer.advance(1.0), 1);
    }

    #[test]
    fn test_cancelled_timer_is_silent() {
        let mut timer = SpawnTimer::new(1000.0);
        timer.cancel();
        assert!(timer.is_cancelled());
        assert_eq!(timer.advance(10_000.0), 0);
    }
}
