//! Block Blaster - a falling-blocks arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, scoring)
//! - `game`: Frame/timer/input driver facade around the simulation
//! - `renderer`: Presenter interface and draw ordering
//! - `platform`: Browser/native input translation
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// All positions are in normalized device coordinates ([-1, 1] on both axes).
pub mod consts {
    /// Block dimensions
    pub const BLOCK_WIDTH: f32 = 0.1;
    pub const BLOCK_HEIGHT: f32 = 0.05;
    /// Blocks enter at the top edge
    pub const BLOCK_SPAWN_Y: f32 = 1.0;
    /// Hit points are drawn from 1..=BLOCK_MAX_HP
    pub const BLOCK_MAX_HP: u8 = 3;

    /// Projectile dimensions
    pub const PROJECTILE_WIDTH: f32 = 0.02;
    pub const PROJECTILE_HEIGHT: f32 = 0.05;
    /// Distance travelled per tick
    pub const PROJECTILE_SPEED: f32 = 0.02;

    /// Shooter defaults - the turret never leaves this row
    pub const SHOOTER_Y: f32 = -0.9;
    pub const SHOOTER_WIDTH: f32 = 0.1;
    pub const SHOOTER_HEIGHT: f32 = 0.1;
    /// Horizontal step per key press
    pub const SHOOTER_SPEED: f32 = 0.02;
    pub const SHOOTER_START_HEALTH: i32 = 3;

    /// Anything at or below this line has hit the floor
    pub const FLOOR_Y: f32 = -1.0;

    /// Wall-clock spawn cadence, independent of frame rate
    pub const SPAWN_INTERVAL_MS: f64 = 1000.0;

    /// Score needed to reach levels 2, 3 and 4
    pub const LEVEL_THRESHOLDS: [u64; 3] = [10, 20, 30];

    /// Nominal frame length used by headless drivers (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
