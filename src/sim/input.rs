//! Player input applied directly to the state
//!
//! Input arrives between ticks and takes effect immediately: a key press moves
//! the shooter, a click spawns a projectile. There is no fire cooldown.

use glam::Vec2;

use super::state::{GameEvent, GameState, Projectile};
use crate::consts::SHOOTER_Y;
use crate::platform::Key;

/// Why a shot was dropped
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ShotError {
    #[error("target coincides with the shooter, no direction to fire in")]
    ZeroDirection,

    #[error("target is not a finite point: ({0}, {1})")]
    NonFiniteTarget(f32, f32),

    #[error("the game is over")]
    GameOver,
}

/// Fire a projectile from the shooter toward `target`
///
/// The velocity is the unit direction from the emission point to the target,
/// scaled by the projectile speed. Returns the new projectile's ID.
pub fn shoot(state: &mut GameState, target: Vec2) -> Result<u32, ShotError> {
    if state.is_game_over() {
        return Err(ShotError::GameOver);
    }
    if !target.is_finite() {
        return Err(ShotError::NonFiniteTarget(target.x, target.y));
    }

    let origin = state.shooter.emission_point();
    let direction = target - origin;
    if direction.length_squared() < f32::EPSILON * f32::EPSILON {
        return Err(ShotError::ZeroDirection);
    }
    let vel = direction.normalize() * state.tuning.projectile_speed;

    let id = state.next_entity_id();
    let pos = Vec2::new(origin.x - state.tuning.projectile_width / 2.0, SHOOTER_Y);
    state.projectiles.push(Projectile { id, pos, vel });
    state.events.push(GameEvent::Shot { projectile_id: id });
    Ok(id)
}

/// Step the shooter one notch left or right
///
/// The shooter may leave the screen unless the tuning asks for clamping.
pub fn move_shooter(state: &mut GameState, key: Key) {
    if state.is_game_over() {
        return;
    }

    let shooter = &mut state.shooter;
    match key {
        Key::Left => shooter.x -= shooter.speed,
        Key::Right => shooter.x += shooter.speed,
        Key::Other => return,
    }

    if state.tuning.clamp_shooter {
        shooter.x = shooter.x.clamp(-1.0, 1.0 - shooter.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    #[test]
    fn test_shoot_straight_up() {
        let mut state = GameState::new(1);
        let id = shoot(&mut state, Vec2::new(0.05, 0.5)).expect("valid shot");

        let p = state.projectile(id).expect("projectile exists");
        assert!((p.pos.x - 0.04).abs() < 1e-6);
        assert_eq!(p.pos.y, SHOOTER_Y);
        assert!(p.vel.x.abs() < 1e-6);
        assert!((p.vel.y - PROJECTILE_SPEED).abs() < 1e-6);
        assert_eq!(state.events, vec![GameEvent::Shot { projectile_id: id }]);
    }

    #[test]
    fn test_shoot_at_emission_point_is_rejected() {
        let mut state = GameState::new(1);
        let origin = state.shooter.emission_point();

        assert_eq!(shoot(&mut state, origin), Err(ShotError::ZeroDirection));
        assert!(state.projectiles.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_shoot_non_finite_is_rejected() {
        let mut state = GameState::new(1);
        let result = shoot(&mut state, Vec2::new(f32::NAN, 0.0));
        assert!(matches!(result, Err(ShotError::NonFiniteTarget(..))));
        assert!(shoot(&mut state, Vec2::new(0.0, f32::INFINITY)).is_err());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_no_fire_cooldown() {
        let mut state = GameState::new(1);
        for _ in 0..10 {
            shoot(&mut state, Vec2::new(0.3, 0.3)).expect("valid shot");
        }
        assert_eq!(state.projectiles.len(), 10);
    }

    #[test]
    fn test_no_input_after_game_over() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;

        assert_eq!(shoot(&mut state, Vec2::new(0.0, 0.5)), Err(ShotError::GameOver));
        move_shooter(&mut state, Key::Right);
        assert_eq!(state.shooter.x, 0.0);
    }

    #[test]
    fn test_move_shooter_is_unbounded_by_default() {
        let mut state = GameState::new(1);
        move_shooter(&mut state, Key::Left);
        assert!((state.shooter.x + SHOOTER_SPEED).abs() < 1e-6);
        move_shooter(&mut state, Key::Right);
        move_shooter(&mut state, Key::Right);
        assert!((state.shooter.x - SHOOTER_SPEED).abs() < 1e-6);
        move_shooter(&mut state, Key::Other);
        assert!((state.shooter.x - SHOOTER_SPEED).abs() < 1e-6);

        for _ in 0..100 {
            move_shooter(&mut state, Key::Right);
        }
        assert!(state.shooter.x > 1.0);
    }

    #[test]
    fn test_move_shooter_clamped_when_tuned() {
        let tuning = Tuning {
            clamp_shooter: true,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning);
        for _ in 0..100 {
            move_shooter(&mut state, Key::Right);
        }
        assert!((state.shooter.x - (1.0 - SHOOTER_WIDTH)).abs() < 1e-6);
        for _ in 0..200 {
            move_shooter(&mut state, Key::Left);
        }
        assert_eq!(state.shooter.x, -1.0);
    }

    proptest! {
        #[test]
        fn prop_projectile_speed_is_constant(
            tx in -1.0f32..1.0,
            ty in -1.0f32..1.0,
            shooter_x in -1.5f32..1.5,
        ) {
            let mut state = GameState::new(3);
            state.shooter.x = shooter_x;
            let target = Vec2::new(tx, ty);
            let far_enough = (target - state.shooter.emission_point()).length() > 1e-3;
            prop_assume!(far_enough);

            let id = shoot(&mut state, target).expect("non-degenerate shot");
            let p = state.projectile(id).expect("projectile exists");
            prop_assert!((p.vel.length() - PROJECTILE_SPEED).abs() < 1e-5);
        }
    }
}
