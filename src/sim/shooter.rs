//! Shooter game: homing enemies and an auto-firing ship
//!
//! Enemies enter along the top edge and steer straight at the ship's
//! center. The ship fires a bullet upward whenever its cooldown allows.
//! Each enemy takes `enemy_health` hits; ramming the ship costs a heart.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::spawner::{Spawner, random_spawn_x};
use super::state::{Player, Stats, seeded_rng};
use crate::input::TickInput;
use crate::tuning::ShooterTuning;

/// An enemy ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub health: u8,
    pub max_health: u8,
}

impl Enemy {
    pub fn new(rect: Rect, health: u8) -> Self {
        Self {
            rect,
            health,
            max_health: health,
        }
    }

    /// Has taken at least one hit
    pub fn is_damaged(&self) -> bool {
        self.health < self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

/// A player bullet travelling straight up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    /// Upward distance per frame
    pub speed: f32,
}

/// The player's ship: movement plus auto-fire timing
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub player: Player,
    pub shoot_cooldown_ms: f64,
    /// Session clock time of the last shot
    pub last_shot_ms: Option<f64>,
}

impl Ship {
    fn ready_to_fire(&self, now_ms: f64) -> bool {
        self.last_shot_ms
            .is_none_or(|last| now_ms - last >= self.shoot_cooldown_ms)
    }
}

/// Complete shooter world
#[derive(Debug, Clone)]
pub struct ShooterState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: ShooterTuning,
    pub ship: Ship,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub stats: Stats,
    /// Enemy steering distance per frame
    pub game_speed: f32,
    pub spawner: Spawner,
    /// Milliseconds simulated this run
    pub clock_ms: f64,
    /// Frames simulated this run
    pub frame: u64,
}

impl ShooterState {
    pub fn new(seed: u64, tuning: ShooterTuning) -> Self {
        let player = Player::at_bottom(
            tuning.player_width,
            tuning.player_height,
            tuning.player_bottom_margin,
            tuning.player_speed,
        );
        Self {
            seed,
            rng: seeded_rng(seed),
            ship: Ship {
                player,
                shoot_cooldown_ms: tuning.shoot_cooldown_ms,
                last_shot_ms: None,
            },
            enemies: Vec::new(),
            bullets: Vec::new(),
            stats: Stats::default(),
            game_speed: tuning.base_speed,
            spawner: Spawner::new(tuning.spawn.interval_for(0)),
            clock_ms: 0.0,
            frame: 0,
            tuning,
        }
    }

    /// Fresh run with the same tuning
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(seed, self.tuning.clone());
    }

    /// Advance one frame. Does nothing once the game is over.
    pub fn tick(&mut self, input: &TickInput, dt_ms: f64) {
        if self.stats.game_over {
            return;
        }
        self.frame += 1;
        self.clock_ms += dt_ms.max(0.0);

        if let Some(point) = input.touch {
            self.ship.player.center_x_on(point);
        }
        self.ship.player.steer_horizontal(input);
        self.auto_fire();

        if self.spawner.advance(dt_ms) {
            self.spawn_enemy();
        }
        self.move_entities();

        let score = self.stats.score;
        self.game_speed = self.tuning.base_speed + (score / self.tuning.speed_step_score) as f32;
        self.spawner.set_interval(self.tuning.spawn.interval_for(score));

        self.bullets.retain(|b| !b.rect.is_above_world());
        self.enemies.retain(|e| !e.rect.is_below_world());

        self.resolve_bullet_hits();
        self.resolve_ship_hits();
    }

    fn auto_fire(&mut self) {
        if !self.ship.ready_to_fire(self.clock_ms) {
            return;
        }
        let ship = self.ship.player.rect;
        let (w, h) = (self.tuning.bullet_width, self.tuning.bullet_height);
        self.bullets.push(Bullet {
            rect: Rect::new(ship.center().x - w / 2.0, ship.y - h, w, h),
            speed: self.tuning.bullet_speed,
        });
        self.ship.last_shot_ms = Some(self.clock_ms);
    }

    fn spawn_enemy(&mut self) {
        let size = self.tuning.enemy_size;
        let x = random_spawn_x(&mut self.rng, size);
        self.enemies.push(Enemy::new(
            Rect::new(x, -size, size, size),
            self.tuning.enemy_health,
        ));
    }

    fn move_entities(&mut self) {
        let target = self.ship.player.rect.center();
        let speed = self.game_speed;
        for enemy in &mut self.enemies {
            let step = steer_toward(enemy.rect.center(), target, speed);
            enemy.rect.x += step.x;
            enemy.rect.y += step.y;
        }
        for bullet in &mut self.bullets {
            bullet.rect.y -= bullet.speed;
        }
    }

    /// Each bullet damages at most the first enemy it overlaps
    pub(crate) fn resolve_bullet_hits(&mut self) {
        let enemies = &mut self.enemies;
        self.bullets.retain(|bullet| {
            match enemies
                .iter_mut()
                .find(|e| !e.is_dead() && e.rect.overlaps(&bullet.rect))
            {
                Some(enemy) => {
                    enemy.health -= 1;
                    false
                }
                None => true,
            }
        });

        let before = self.enemies.len();
        self.enemies.retain(|e| !e.is_dead());
        for _ in self.enemies.len()..before {
            self.stats.add_point();
        }
    }

    fn resolve_ship_hits(&mut self) {
        let ship = self.ship.player.rect;
        let mut i = 0;
        while i < self.enemies.len() {
            if ship.overlaps(&self.enemies[i].rect) {
                self.enemies.remove(i);
                if self.stats.lose_heart() {
                    return;
                }
            } else {
                i += 1;
            }
        }
    }
}

/// Displacement of length `speed` from `from` toward `to` (zero when already there)
pub fn steer_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    (to - from).normalize_or_zero() * speed
}
