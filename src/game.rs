//! Game loop orchestrator
//!
//! [`Game`] is what a platform driver talks to. It owns one session's state
//! and its presenter, runs the simulation on each frame, forwards input, and
//! turns simulation events into HUD updates and sound cues.

use glam::Vec2;

use crate::platform::Key;
use crate::renderer::{Presenter, SoundId, render};
use crate::sim::{
    DemoPilot, GameEvent, GamePhase, GameState, ShotError, SpawnTimer, move_shooter, shoot,
    spawn_block, tick,
};
use crate::tuning::Tuning;

/// A running session bound to a presenter
pub struct Game<P: Presenter> {
    state: GameState,
    presenter: P,
    spawn_timer: SpawnTimer,
    demo: Option<DemoPilot>,
}

impl<P: Presenter> Game<P> {
    /// Start a session and show the initial HUD
    ///
    /// A tuning that fails [`Tuning::validate`] is replaced by the defaults.
    pub fn new(seed: u64, tuning: Tuning, mut presenter: P) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("{}; falling back to default tuning", e);
                Tuning::default()
            }
        };
        let spawn_timer = SpawnTimer::new(tuning.spawn_interval_ms);
        let state = GameState::with_tuning(seed, tuning);

        presenter.update_score_display(state.score);
        presenter.update_health_display(state.shooter.health);
        presenter.update_level_display(state.level.number());
        log::info!("Game started with seed {}", seed);

        Self {
            state,
            presenter,
            spawn_timer,
            demo: None,
        }
    }

    /// One display frame: simulate, draw, report
    ///
    /// Returns the phase after the frame. Once it is [`GamePhase::GameOver`]
    /// the driver should stop scheduling frames and cancel its spawn timer.
    pub fn tick(&mut self) -> GamePhase {
        if self.state.is_game_over() {
            return GamePhase::GameOver;
        }

        if let Some(pilot) = self.demo.as_mut() {
            let actions = pilot.plan(&self.state);
            if let Some(key) = actions.step {
                move_shooter(&mut self.state, key);
            }
            if let Some(target) = actions.fire_at {
                let _ = self.fire(target);
            }
        }

        let phase = tick(&mut self.state);
        render(&self.state, &mut self.presenter);
        self.dispatch_events();

        if phase == GamePhase::GameOver {
            self.spawn_timer.cancel();
        }
        phase
    }

    /// Shoot toward a world-space point
    ///
    /// Degenerate targets are dropped; the error is only returned for callers
    /// that care.
    pub fn on_pointer_down(&mut self, world_x: f32, world_y: f32) -> Result<u32, ShotError> {
        self.fire(Vec2::new(world_x, world_y))
    }

    pub fn on_key_down(&mut self, key: Key) {
        move_shooter(&mut self.state, key);
    }

    /// Spawn timer callback
    pub fn on_spawn_timer(&mut self) {
        if self.state.is_game_over() {
            return;
        }
        spawn_block(&mut self.state);
    }

    /// Drive the built-in spawn timer from elapsed wall-clock time
    ///
    /// For drivers without a platform interval timer. Returns the number of
    /// blocks spawned.
    pub fn advance_clock(&mut self, dt_ms: f64) -> u32 {
        let due = self.spawn_timer.advance(dt_ms);
        for _ in 0..due {
            self.on_spawn_timer();
        }
        due
    }

    /// Toggle the demo pilot
    pub fn set_demo(&mut self, enabled: bool) {
        match (enabled, self.demo.is_some()) {
            (true, false) => self.demo = Some(DemoPilot::default()),
            (false, true) => self.demo = None,
            _ => {}
        }
        log::info!("Demo mode: {}", enabled);
    }

    pub fn is_demo(&self) -> bool {
        self.demo.is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn final_score(&self) -> u64 {
        self.state.score
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn spawn_timer(&self) -> &SpawnTimer {
        &self.spawn_timer
    }

    fn fire(&mut self, target: Vec2) -> Result<u32, ShotError> {
        let result = shoot(&mut self.state, target);
        match &result {
            Ok(_) => self.dispatch_events(),
            Err(e) => log::debug!("Shot dropped: {}", e),
        }
        result
    }

    /// Hand pending simulation events to the presenter
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Shot { .. } => self.presenter.play_sound(SoundId::Shoot),
                GameEvent::BlockDestroyed { score, .. } => {
                    self.presenter.update_score_display(score);
                    self.presenter.play_sound(SoundId::BlockDestroyed);
                }
                GameEvent::HealthChanged { health } => {
                    self.presenter.update_health_display(health);
                }
                GameEvent::LevelChanged { level } => {
                    self.presenter.update_level_display(level.number());
                }
                GameEvent::GameOver { final_score } => {
                    self.presenter.show_game_over(final_score);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{PresenterCall, RecordingPresenter};
    use crate::sim::{Block, BlockSkin};

    fn game() -> Game<RecordingPresenter> {
        Game::new(31337, Tuning::default(), RecordingPresenter::new())
    }

    fn place_block(game: &mut Game<RecordingPresenter>, pos: Vec2, vel: Vec2, hp: u8) -> u32 {
        let id = game.state.next_entity_id();
        game.state.blocks.push(Block {
            id,
            pos,
            vel,
            hp,
            skin: BlockSkin::Crate,
        });
        id
    }

    #[test]
    fn test_initial_hud() {
        let game = game();
        assert_eq!(
            game.presenter().log,
            vec![
                PresenterCall::Score(0),
                PresenterCall::Health(3),
                PresenterCall::Level(1),
            ]
        );
        assert!(!game.is_game_over());
        assert_eq!(game.final_score(), 0);
    }

    #[test]
    fn test_shot_plays_sound() {
        let mut game = game();
        game.on_pointer_down(0.3, 0.5).expect("valid shot");
        assert_eq!(game.presenter().sounds().collect::<Vec<_>>(), vec![SoundId::Shoot]);
    }

    #[test]
    fn test_degenerate_shot_is_dropped() {
        let mut game = game();
        let origin = game.state().shooter.emission_point();
        assert_eq!(
            game.on_pointer_down(origin.x, origin.y),
            Err(ShotError::ZeroDirection)
        );
        assert!(game.state().projectiles.is_empty());
        assert_eq!(game.presenter().sounds().count(), 0);
    }

    #[test]
    fn test_kill_updates_score_and_plays_sound() {
        let mut game = game();
        place_block(&mut game, Vec2::new(0.0, -0.5), Vec2::ZERO, 1);
        game.on_pointer_down(0.05, 0.0).expect("valid shot");

        for _ in 0..40 {
            game.tick();
        }

        assert_eq!(game.final_score(), 1);
        assert_eq!(game.presenter().last_score(), Some(1));
        assert_eq!(
            game.presenter().sounds().collect::<Vec<_>>(),
            vec![SoundId::Shoot, SoundId::BlockDestroyed]
        );
    }

    #[test]
    fn test_key_moves_shooter() {
        let mut game = game();
        game.on_key_down(Key::Right);
        assert!((game.state().shooter.x - SHOOTER_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_clock() {
        let mut game = game();
        assert_eq!(game.advance_clock(FRAME_MS * 59.0), 0);
        assert_eq!(game.advance_clock(FRAME_MS * 2.0), 1);
        assert_eq!(game.state().blocks.len(), 1);
        game.on_spawn_timer();
        assert_eq!(game.state().blocks.len(), 2);
    }

    #[test]
    fn test_game_over_stops_everything() {
        let mut game = game();
        for x in [-0.8, -0.5, 0.5] {
            place_block(&mut game, Vec2::new(x, -0.995), Vec2::new(0.0, -0.01), 1);
        }

        assert_eq!(game.tick(), GamePhase::GameOver);
        assert!(game.is_game_over());
        assert!(game.spawn_timer().is_cancelled());
        assert_eq!(game.presenter().last_health(), Some(0));
        assert_eq!(game.presenter().log.last(), Some(&PresenterCall::GameOver(0)));

        let frames = game.presenter().frames;
        assert_eq!(game.tick(), GamePhase::GameOver);
        assert_eq!(game.presenter().frames, frames, "no frame rendered after game over");

        assert_eq!(game.advance_clock(5000.0), 0);
        game.on_spawn_timer();
        assert!(game.state().blocks.is_empty());
        assert_eq!(game.on_pointer_down(0.0, 0.5), Err(ShotError::GameOver));
    }

    #[test]
    fn test_invalid_tuning_falls_back_to_defaults() {
        let tuning = Tuning {
            spawn_interval_ms: 0.0,
            ..Tuning::default()
        };
        let mut game = Game::new(1, tuning, RecordingPresenter::new());
        assert_eq!(game.state().tuning, Tuning::default());
        assert_eq!(game.spawn_timer().interval_ms(), SPAWN_INTERVAL_MS);
        assert_eq!(game.advance_clock(16.0), 0);
        assert_eq!(game.advance_clock(f64::INFINITY), 0);
        assert_eq!(game.advance_clock(SPAWN_INTERVAL_MS), 1);
    }

    #[test]
    fn test_level_display_follows_score() {
        let mut game = game();
        game.state.score = 10;
        game.tick();
        assert_eq!(game.presenter().last_level(), Some(2));
    }

    #[test]
    fn test_demo_mode_plays() {
        let mut game = game();
        game.set_demo(true);
        assert!(game.is_demo());

        for _ in 0..1800 {
            game.advance_clock(FRAME_MS);
            if game.tick() == GamePhase::GameOver {
                break;
            }
        }

        assert!(game.final_score() > 0);
        game.set_demo(false);
        assert!(!game.is_demo());
    }
}
