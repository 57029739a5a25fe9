//! Shared game state pieces
//!
//! Score/hearts bookkeeping and the player are identical between the two
//! games; the entity lists live in each game's own state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::START_HEARTS;
use crate::input::TickInput;

/// Score, hearts and the game-over latch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub score: u32,
    pub hearts: u8,
    pub game_over: bool,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            score: 0,
            hearts: START_HEARTS,
            game_over: false,
        }
    }
}

impl Stats {
    pub fn add_point(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    /// Take one heart. Returns true when this hit ended the game.
    pub fn lose_heart(&mut self) -> bool {
        self.hearts = self.hearts.saturating_sub(1);
        if self.hearts == 0 {
            self.game_over = true;
        }
        self.game_over
    }
}

/// The player's rectangle and keyboard speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// World units moved per frame while a key is held
    pub speed: f32,
}

impl Player {
    /// Player centered horizontally, `bottom_margin` above the bottom edge
    pub fn at_bottom(width: f32, height: f32, bottom_margin: f32, speed: f32) -> Self {
        use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
        Self {
            rect: Rect::new(
                WORLD_WIDTH / 2.0 - width / 2.0,
                WORLD_HEIGHT - height - bottom_margin,
                width,
                height,
            ),
            speed,
        }
    }

    /// Keyboard movement on both axes, clamped to the world
    pub fn steer_four_way(&mut self, input: &TickInput) {
        if input.left {
            self.rect.x -= self.speed;
        }
        if input.right {
            self.rect.x += self.speed;
        }
        if input.up {
            self.rect.y -= self.speed;
        }
        if input.down {
            self.rect.y += self.speed;
        }
        self.rect.clamp_to_world();
    }

    /// Keyboard movement on the horizontal axis only, clamped to the world
    pub fn steer_horizontal(&mut self, input: &TickInput) {
        if input.left {
            self.rect.x -= self.speed;
        }
        if input.right {
            self.rect.x += self.speed;
        }
        self.rect.clamp_x_to_world();
    }

    /// Re-center on a touch point (both axes)
    pub fn center_on(&mut self, point: Vec2) {
        self.rect.x = point.x - self.rect.width / 2.0;
        self.rect.y = point.y - self.rect.height / 2.0;
        self.rect.clamp_to_world();
    }

    /// Re-center horizontally on a touch point
    pub fn center_x_on(&mut self, point: Vec2) {
        self.rect.x = point.x - self.rect.width / 2.0;
        self.rect.clamp_x_to_world();
    }
}

/// Seeded RNG for spawn decisions
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
