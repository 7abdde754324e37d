//! Game state and core simulation types
//!
//! Everything a session needs lives in [`GameState`]; there are no globals, so
//! any number of independent sessions can run side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::Level;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Shooter health ran out (terminal)
    GameOver,
}

/// Block appearance, picked uniformly at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockSkin {
    Crate,
    Brick,
    Stone,
}

impl BlockSkin {
    pub const ALL: [BlockSkin; 3] = [BlockSkin::Crate, BlockSkin::Brick, BlockSkin::Stone];

    /// Texture name the presenter loads for this skin
    pub fn texture_name(&self) -> &'static str {
        match self {
            BlockSkin::Crate => "block1",
            BlockSkin::Brick => "block2",
            BlockSkin::Stone => "block3",
        }
    }
}

/// A falling block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    /// Lower-left corner
    pub pos: Vec2,
    /// Displacement per tick, fixed at spawn except for wall bounces
    pub vel: Vec2,
    pub hp: u8,
    pub skin: BlockSkin,
}

impl Block {
    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.pos, tuning.block_width, tuning.block_height)
    }
}

/// A projectile fired from the shooter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Lower-left corner
    pub pos: Vec2,
    /// Unit direction scaled by the projectile speed
    pub vel: Vec2,
}

impl Projectile {
    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.pos, tuning.projectile_width, tuning.projectile_height)
    }
}

/// The player's turret. Only `x` moves; `y` is always [`SHOOTER_Y`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shooter {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub health: i32,
}

impl Shooter {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: 0.0,
            width: tuning.shooter_width,
            height: tuning.shooter_height,
            speed: tuning.shooter_speed,
            health: tuning.shooter_start_health,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(Vec2::new(self.x, SHOOTER_Y), self.width, self.height)
    }

    /// Horizontal centre of the turret on its base row; shots are aimed from here
    pub fn emission_point(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, SHOOTER_Y)
    }
}

/// Things that happened during a tick or input handler, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile was fired
    Shot { projectile_id: u32 },
    /// A block lost its last hit point to a projectile
    BlockDestroyed { block_id: u32, score: u64 },
    /// The shooter was hit by a block or a block reached the floor
    HealthChanged { health: i32 },
    /// The recomputed level differs from the previous tick's
    LevelChanged { level: Level },
    /// Health reached zero
    GameOver { final_score: u64 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG used by the spawner
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Blocks destroyed by projectiles; never decreases
    pub score: u64,
    /// Level as of the last tick
    pub level: Level,
    pub shooter: Shooter,
    /// Active blocks in spawn order
    pub blocks: Vec<Block>,
    /// Active projectiles in firing order
    pub projectiles: Vec<Projectile>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events not yet handed to the presenter
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            shooter: Shooter::new(&tuning),
            tuning,
            phase: GamePhase::Running,
            score: 0,
            level: Level::One,
            blocks: Vec::new(),
            projectiles: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    ///
    /// Wraps after `u32::MAX`; ids only need to be unique among live entities.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn block(&self, id: u32) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn projectile(&self, id: u32) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }
}
