//! Data-driven game balance
//!
//! `Tuning::default()` mirrors the compile-time constants in [`crate::consts`].
//! A tuning can also be loaded from JSON; missing fields fall back to the
//! defaults, and the result is validated before use.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading a tuning file
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("Failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay tuning shared by every simulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub block_width: f32,
    pub block_height: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,
    /// Projectile speed (NDC units per tick)
    pub projectile_speed: f32,
    pub shooter_width: f32,
    pub shooter_height: f32,
    /// Horizontal step per key press
    pub shooter_speed: f32,
    pub shooter_start_health: i32,
    /// Milliseconds between block spawns
    pub spawn_interval_ms: f64,
    /// Keep the shooter inside [-1, 1 - width] (off by default)
    pub clamp_shooter: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            projectile_speed: PROJECTILE_SPEED,
            shooter_width: SHOOTER_WIDTH,
            shooter_height: SHOOTER_HEIGHT,
            shooter_speed: SHOOTER_SPEED,
            shooter_start_health: SHOOTER_START_HEALTH,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            clamp_shooter: false,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("block_width", self.block_width),
            ("block_height", self.block_height),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("projectile_speed", self.projectile_speed),
            ("shooter_width", self.shooter_width),
            ("shooter_height", self.shooter_height),
            ("shooter_speed", self.shooter_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        if self.block_width >= 2.0 {
            return Err(TuningError::Invalid {
                field: "block_width",
                reason: "must fit inside the viewport".to_string(),
            });
        }

        if self.shooter_start_health < 1 {
            return Err(TuningError::Invalid {
                field: "shooter_start_health",
                reason: format!("must be at least 1, got {}", self.shooter_start_health),
            });
        }

        if !self.spawn_interval_ms.is_finite() || self.spawn_interval_ms <= 0.0 {
            return Err(TuningError::Invalid {
                field: "spawn_interval_ms",
                reason: format!("must be a positive duration, got {}", self.spawn_interval_ms),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_consts() {
        let tuning = Tuning::default();
        assert_eq!(tuning.block_width, BLOCK_WIDTH);
        assert_eq!(tuning.projectile_speed, PROJECTILE_SPEED);
        assert_eq!(tuning.shooter_start_health, 3);
        assert!(!tuning.clamp_shooter);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning = Tuning::from_json(r#"{ "shooter_speed": 0.05, "clamp_shooter": true }"#)
            .expect("valid tuning");
        assert_eq!(tuning.shooter_speed, 0.05);
        assert!(tuning.clamp_shooter);
        assert_eq!(tuning.block_height, BLOCK_HEIGHT);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "projectile_speed": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "projectile_speed",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "shooter_start_health": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "shooter_start_health",
                ..
            }
        ));

        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
