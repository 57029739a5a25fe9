//! Timer-driven entity spawning
//!
//! The spawner only decides *when* something appears and *where* along the
//! top edge; each game decides *what* appears.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::WORLD_WIDTH;
use crate::error::ConfigError;

/// Linear spawn-interval curve: `max(floor, base - score * step)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnCurve {
    pub base_ms: f64,
    pub step_ms: f64,
    pub floor_ms: f64,
}

impl SpawnCurve {
    pub const DODGE: SpawnCurve = SpawnCurve {
        base_ms: 1000.0,
        step_ms: 10.0,
        floor_ms: 200.0,
    };
    pub const SHOOTER: SpawnCurve = SpawnCurve {
        base_ms: 1500.0,
        step_ms: 15.0,
        floor_ms: 300.0,
    };

    pub fn interval_for(&self, score: u32) -> f64 {
        (self.base_ms - score as f64 * self.step_ms).max(self.floor_ms)
    }

    pub(crate) fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.floor_ms <= 0.0 || self.step_ms < 0.0 || self.floor_ms > self.base_ms {
            return Err(ConfigError::Invalid {
                field,
                reason: format!(
                    "need 0 < floor_ms <= base_ms and step_ms >= 0 (got base {}, step {}, floor {})",
                    self.base_ms, self.step_ms, self.floor_ms
                ),
            });
        }
        Ok(())
    }
}

/// A curve as written in a tuning document; absent fields keep the game's default
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnCurveOverride {
    pub base_ms: Option<f64>,
    pub step_ms: Option<f64>,
    pub floor_ms: Option<f64>,
}

impl SpawnCurveOverride {
    pub fn apply(self, base: SpawnCurve) -> SpawnCurve {
        SpawnCurve {
            base_ms: self.base_ms.unwrap_or(base.base_ms),
            step_ms: self.step_ms.unwrap_or(base.step_ms),
            floor_ms: self.floor_ms.unwrap_or(base.floor_ms),
        }
    }
}

/// Accumulates frame time and fires once the interval is exceeded
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub timer_ms: f64,
    pub interval_ms: f64,
}

impl Spawner {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            timer_ms: 0.0,
            interval_ms,
        }
    }

    /// Add elapsed time; returns true (and restarts the timer) when a spawn is due
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.timer_ms += dt_ms.max(0.0);
        if self.timer_ms > self.interval_ms {
            self.timer_ms = 0.0;
            true
        } else {
            false
        }
    }

    pub fn set_interval(&mut self, interval_ms: f64) {
        self.interval_ms = interval_ms;
    }

    pub fn reset(&mut self, interval_ms: f64) {
        self.timer_ms = 0.0;
        self.interval_ms = interval_ms;
    }
}

/// Random left edge for an entity of `width` entering along the top of the world
pub fn random_spawn_x<R: Rng>(rng: &mut R, width: f32) -> f32 {
    rng.random::<f32>() * (WORLD_WIDTH - width).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DODGE: SpawnCurve = SpawnCurve::DODGE;
    const SHOOTER: SpawnCurve = SpawnCurve::SHOOTER;

    #[test]
    fn test_interval_curves() {
        assert_eq!(DODGE.interval_for(0), 1000.0);
        assert_eq!(DODGE.interval_for(50), 500.0);
        assert_eq!(DODGE.interval_for(80), 200.0);
        assert_eq!(DODGE.interval_for(500), 200.0);

        assert_eq!(SHOOTER.interval_for(0), 1500.0);
        assert_eq!(SHOOTER.interval_for(40), 900.0);
        assert_eq!(SHOOTER.interval_for(80), 300.0);
        assert_eq!(SHOOTER.interval_for(1000), 300.0);
    }

    #[test]
    fn test_spawner_fires_after_interval_exceeded() {
        let mut spawner = Spawner::new(100.0);
        assert!(!spawner.advance(60.0));
        // Exactly at the interval is not enough
        assert!(!spawner.advance(40.0));
        assert!(spawner.advance(1.0));
        assert_eq!(spawner.timer_ms, 0.0);
        assert!(!spawner.advance(50.0));
    }

    #[test]
    fn test_one_spawn_per_advance() {
        let mut spawner = Spawner::new(100.0);
        // A long stall still only yields a single spawn
        assert!(spawner.advance(10_000.0));
        assert!(!spawner.advance(0.0));
    }

    #[test]
    fn test_override_keeps_unnamed_fields() {
        let partial = SpawnCurveOverride {
            floor_ms: Some(100.0),
            ..Default::default()
        };
        let curve = partial.apply(DODGE);
        assert_eq!(curve.base_ms, 1000.0);
        assert_eq!(curve.step_ms, 10.0);
        assert_eq!(curve.floor_ms, 100.0);
        assert_eq!(SpawnCurveOverride::default().apply(SHOOTER), SHOOTER);
    }

    #[test]
    fn test_random_spawn_x_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let x = random_spawn_x(&mut rng, 30.0);
            assert!((0.0..=WORLD_WIDTH - 30.0).contains(&x));
        }
    }

    proptest! {
        #[test]
        fn test_dodge_interval_clamped(score in 0u32..10_000) {
            let expected = (1000.0 - score as f64 * 10.0).max(200.0);
            prop_assert_eq!(DODGE.interval_for(score), expected);
            prop_assert!(DODGE.interval_for(score) >= 200.0);
        }

        #[test]
        fn test_shooter_interval_clamped(score in 0u32..10_000) {
            let expected = (1500.0 - score as f64 * 15.0).max(300.0);
            prop_assert_eq!(SHOOTER.interval_for(score), expected);
            prop_assert!(SHOOTER.interval_for(score) >= 300.0);
        }
    }
}
