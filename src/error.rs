//! Top-level error type for the binaries.
//!
//! Simulation-level failures have their own narrower types (`ShotError`,
//! `TuningError`); this wraps whatever a driver can hit while starting up.

use std::io;

use crate::tuning::TuningError;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Tuning error: {0}")]
    Tuning(#[from] TuningError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),
}
