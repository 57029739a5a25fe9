//! Game balance values
//!
//! Defaults reproduce the shipped games. A JSON document may override any
//! subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;
use crate::sim::{SpawnCurve, SpawnCurveOverride};

fn dodge_spawn<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpawnCurve, D::Error> {
    SpawnCurveOverride::deserialize(deserializer).map(|o| o.apply(SpawnCurve::DODGE))
}

fn shooter_spawn<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SpawnCurve, D::Error> {
    SpawnCurveOverride::deserialize(deserializer).map(|o| o.apply(SpawnCurve::SHOOTER))
}

/// Dodge (falling obstacles/targets) balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DodgeTuning {
    /// Player square side length
    pub player_size: f32,
    /// Gap between player bottom edge and world bottom at spawn
    pub player_bottom_margin: f32,
    /// Player movement per frame while a key is held
    pub player_speed: f32,
    /// Obstacle/target square side length
    pub object_size: f32,
    /// Fall speed at score 0
    pub base_speed: f32,
    /// Points needed for each +1 fall speed
    pub speed_step_score: u32,
    /// Chance a spawn is an obstacle rather than a target
    pub obstacle_chance: f64,
    #[serde(deserialize_with = "dodge_spawn")]
    pub spawn: SpawnCurve,
}

impl Default for DodgeTuning {
    fn default() -> Self {
        Self {
            player_size: 50.0,
            player_bottom_margin: 20.0,
            player_speed: 7.0,
            object_size: 30.0,
            base_speed: 3.0,
            speed_step_score: 5,
            obstacle_chance: 0.7,
            spawn: SpawnCurve::DODGE,
        }
    }
}

/// Shooter (homing enemies, auto-fire) balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterTuning {
    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_margin: f32,
    /// Horizontal movement per frame while a key is held
    pub player_speed: f32,
    /// Minimum time between automatic shots
    pub shoot_cooldown_ms: f64,
    pub enemy_size: f32,
    /// Hits needed to destroy an enemy
    pub enemy_health: u8,
    /// Enemy steering speed at score 0
    pub base_speed: f32,
    /// Points needed for each +1 enemy speed
    pub speed_step_score: u32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    /// Upward bullet movement per frame
    pub bullet_speed: f32,
    #[serde(deserialize_with = "shooter_spawn")]
    pub spawn: SpawnCurve,
}

impl Default for ShooterTuning {
    fn default() -> Self {
        Self {
            player_width: 50.0,
            player_height: 50.0,
            player_bottom_margin: 20.0,
            player_speed: 7.0,
            shoot_cooldown_ms: 300.0,
            enemy_size: 40.0,
            enemy_health: 2,
            base_speed: 2.0,
            speed_step_score: 10,
            bullet_width: 6.0,
            bullet_height: 15.0,
            bullet_speed: 10.0,
            spawn: SpawnCurve::SHOOTER,
        }
    }
}

/// Balance for both games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub dodge: DodgeTuning,
    pub shooter: ShooterTuning,
}

impl Tuning {
    /// Parse and validate a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse a document, falling back to defaults (with a warning) when it is invalid
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded custom tuning");
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.dodge;
        positive("dodge.player_size", d.player_size)?;
        positive("dodge.object_size", d.object_size)?;
        non_negative("dodge.player_bottom_margin", d.player_bottom_margin)?;
        non_negative("dodge.player_speed", d.player_speed)?;
        non_negative("dodge.base_speed", d.base_speed)?;
        nonzero("dodge.speed_step_score", d.speed_step_score)?;
        if !(0.0..=1.0).contains(&d.obstacle_chance) {
            return Err(invalid("dodge.obstacle_chance", "must be within 0..=1"));
        }
        d.spawn.validate("dodge.spawn")?;

        let s = &self.shooter;
        positive("shooter.player_width", s.player_width)?;
        positive("shooter.player_height", s.player_height)?;
        positive("shooter.enemy_size", s.enemy_size)?;
        positive("shooter.bullet_width", s.bullet_width)?;
        positive("shooter.bullet_height", s.bullet_height)?;
        non_negative("shooter.player_bottom_margin", s.player_bottom_margin)?;
        non_negative("shooter.player_speed", s.player_speed)?;
        non_negative("shooter.base_speed", s.base_speed)?;
        non_negative("shooter.bullet_speed", s.bullet_speed)?;
        nonzero("shooter.speed_step_score", s.speed_step_score)?;
        if s.enemy_health == 0 {
            return Err(invalid("shooter.enemy_health", "must be at least 1"));
        }
        if s.shoot_cooldown_ms < 0.0 {
            return Err(invalid("shooter.shoot_cooldown_ms", "must not be negative"));
        }
        s.spawn.validate("shooter.spawn")?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must not be negative"))
    }
}

fn nonzero(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(invalid(field, "must be at least 1"))
    }
}
