//! Difficulty levels derived from score
//!
//! The level is a pure function of the score and only decides the velocity
//! profile of blocks spawned from now on.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_THRESHOLDS;

/// Difficulty tier, 1 through 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    One,
    Two,
    Three,
    Four,
}

impl Level {
    /// Level number as shown on the HUD
    pub fn number(&self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
            Level::Four => 4,
        }
    }

    /// Fall speed (always downward)
    pub fn fall_speed(&self) -> f32 {
        match self {
            Level::One | Level::Three => 0.005,
            Level::Two | Level::Four => 0.01,
        }
    }

    /// Half-width of the range horizontal drift is drawn from (0 = straight down)
    pub fn max_drift(&self) -> f32 {
        match self {
            Level::One | Level::Two => 0.0,
            Level::Three => 0.005,
            Level::Four => 0.01,
        }
    }

    /// Velocity for a block spawned at this level
    ///
    /// Drift is uniform in `[-max_drift, max_drift)`; levels without drift do
    /// not touch the RNG.
    pub fn block_velocity<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let drift = self.max_drift();
        let vx = if drift > 0.0 {
            rng.random_range(-drift..drift)
        } else {
            0.0
        };
        Vec2::new(vx, -self.fall_speed())
    }
}

/// Level for a cumulative score
pub fn level_for(score: u64) -> Level {
    let [two, three, four] = LEVEL_THRESHOLDS;
    if score >= four {
        Level::Four
    } else if score >= three {
        Level::Three
    } else if score >= two {
        Level::Two
    } else {
        Level::One
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for(0), Level::One);
        assert_eq!(level_for(9), Level::One);
        assert_eq!(level_for(10), Level::Two);
        assert_eq!(level_for(19), Level::Two);
        assert_eq!(level_for(20), Level::Three);
        assert_eq!(level_for(29), Level::Three);
        assert_eq!(level_for(30), Level::Four);
        assert_eq!(level_for(u64::MAX), Level::Four);
    }

    #[test]
    fn test_level_numbers() {
        let numbers: Vec<u8> = [Level::One, Level::Two, Level::Three, Level::Four]
            .iter()
            .map(Level::number)
            .collect();
        assert_eq!(numbers, [1, 2, 3, 4]);
    }

    #[test]
    fn test_straight_profiles() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(Level::One.block_velocity(&mut rng), Vec2::new(0.0, -0.005));
        assert_eq!(Level::Two.block_velocity(&mut rng), Vec2::new(0.0, -0.01));
    }

    #[test]
    fn test_drifting_profiles_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..500 {
            let v = Level::Three.block_velocity(&mut rng);
            assert!((-0.005..0.005).contains(&v.x));
            assert_eq!(v.y, -0.005);

            let v = Level::Four.block_velocity(&mut rng);
            assert!((-0.01..0.01).contains(&v.x));
            assert_eq!(v.y, -0.01);
        }
    }

    proptest! {
        #[test]
        fn prop_level_never_decreases(a in 0u64..1000, b in 0u64..1000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(level_for(lo) <= level_for(hi));
        }
    }
}
