//! Rendering and presentation interface
//!
//! The simulation never draws or plays sounds itself. Everything visible or
//! audible goes through a [`Presenter`]; [`render`] fixes the draw order.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPresenter;

use crate::consts::SHOOTER_Y;
use crate::sim::{BlockSkin, GameState};

/// What to fill a quad with
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Appearance {
    /// Textured block
    Skin(BlockSkin),
    /// Textured turret
    Shooter,
    /// Flat RGBA color
    Flat([f32; 4]),
}

/// Sound cues the game asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Shoot,
    BlockDestroyed,
}

impl SoundId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundId::Shoot => "shoot",
            SoundId::BlockDestroyed => "blockDestroyed",
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PROJECTILE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// Drawn in place of a texture that has not loaded yet
    pub const PLACEHOLDER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// CSS `rgba()` string for a linear RGBA color
pub fn css_rgba(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Map a quad in NDC (lower-left anchored) to canvas pixels (top-left anchored)
///
/// Returns `(left, top, width, height)`.
pub fn ndc_to_pixels(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    canvas_w: f64,
    canvas_h: f64,
) -> (f64, f64, f64, f64) {
    let left = (x as f64 + 1.0) / 2.0 * canvas_w;
    let top = (1.0 - (y + height) as f64) / 2.0 * canvas_h;
    (
        left,
        top,
        width as f64 / 2.0 * canvas_w,
        height as f64 / 2.0 * canvas_h,
    )
}

/// Sink for drawing, HUD text and sound cues
///
/// Coordinates are normalized device coordinates; `(x, y)` is the lower-left
/// corner of the quad.
pub trait Presenter {
    /// Called once before a frame's draw calls
    fn begin_frame(&mut self) {}

    fn draw_entity(&mut self, appearance: Appearance, x: f32, y: f32, width: f32, height: f32);

    fn update_score_display(&mut self, score: u64);

    fn update_health_display(&mut self, health: i32);

    fn update_level_display(&mut self, level: u8);

    /// Fire-and-forget
    fn play_sound(&mut self, sound: SoundId);

    /// The session ended with `final_score`
    fn show_game_over(&mut self, _final_score: u64) {}
}

/// Draw the current frame: shooter, then blocks, then projectiles
pub fn render<P: Presenter + ?Sized>(state: &GameState, presenter: &mut P) {
    let tuning = &state.tuning;
    let shooter = &state.shooter;

    presenter.begin_frame();
    presenter.draw_entity(
        Appearance::Shooter,
        shooter.x,
        SHOOTER_Y,
        shooter.width,
        shooter.height,
    );

    for block in &state.blocks {
        presenter.draw_entity(
            Appearance::Skin(block.skin),
            block.pos.x,
            block.pos.y,
            tuning.block_width,
            tuning.block_height,
        );
    }

    for p in &state.projectiles {
        presenter.draw_entity(
            Appearance::Flat(colors::PROJECTILE),
            p.pos.x,
            p.pos.y,
            tuning.projectile_width,
            tuning.projectile_height,
        );
    }
}

/// One recorded presenter call
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterCall {
    BeginFrame,
    Draw {
        appearance: Appearance,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Score(u64),
    Health(i32),
    Level(u8),
    Sound(SoundId),
    GameOver(u64),
}

/// Presenter that remembers everything it was asked to do
///
/// Used by tests and the headless binary. Draw calls are kept for the most
/// recent frame only.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    /// Draw calls of the last frame
    pub frame: Vec<PresenterCall>,
    /// HUD updates and sounds, oldest first
    pub log: Vec<PresenterCall>,
    pub frames: u64,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sounds(&self) -> impl Iterator<Item = SoundId> + '_ {
        self.log.iter().filter_map(|c| match c {
            PresenterCall::Sound(s) => Some(*s),
            _ => None,
        })
    }

    /// Most recent value shown on each HUD field
    pub fn last_score(&self) -> Option<u64> {
        self.log.iter().rev().find_map(|c| match c {
            PresenterCall::Score(s) => Some(*s),
            _ => None,
        })
    }

    pub fn last_health(&self) -> Option<i32> {
        self.log.iter().rev().find_map(|c| match c {
            PresenterCall::Health(h) => Some(*h),
            _ => None,
        })
    }

    pub fn last_level(&self) -> Option<u8> {
        self.log.iter().rev().find_map(|c| match c {
            PresenterCall::Level(l) => Some(*l),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn begin_frame(&mut self) {
        self.frames += 1;
        self.frame.clear();
        self.frame.push(PresenterCall::BeginFrame);
    }

    fn draw_entity(&mut self, appearance: Appearance, x: f32, y: f32, width: f32, height: f32) {
        self.frame.push(PresenterCall::Draw {
            appearance,
            x,
            y,
            width,
            height,
        });
    }

    fn update_score_display(&mut self, score: u64) {
        self.log.push(PresenterCall::Score(score));
    }

    fn update_health_display(&mut self, health: i32) {
        self.log.push(PresenterCall::Health(health));
    }

    fn update_level_display(&mut self, level: u8) {
        self.log.push(PresenterCall::Level(level));
    }

    fn play_sound(&mut self, sound: SoundId) {
        self.log.push(PresenterCall::Sound(sound));
    }

    fn show_game_over(&mut self, final_score: u64) {
        self.log.push(PresenterCall::GameOver(final_score));
    }
}
