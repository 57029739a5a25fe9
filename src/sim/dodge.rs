//! Dodge game: falling obstacles and targets
//!
//! Red obstacles cost a heart, gold targets score a point. Everything falls
//! at a shared speed that rises every few points while the spawn interval
//! shrinks.

use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::spawner::{Spawner, random_spawn_x};
use super::state::{Player, Stats, seeded_rng};
use crate::input::TickInput;
use crate::tuning::DodgeTuning;

/// Complete dodge world
#[derive(Debug, Clone)]
pub struct DodgeState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: DodgeTuning,
    pub player: Player,
    pub obstacles: Vec<Rect>,
    pub targets: Vec<Rect>,
    pub stats: Stats,
    /// Fall distance per frame
    pub game_speed: f32,
    pub spawner: Spawner,
    /// Frames simulated this run
    pub frame: u64,
}

impl DodgeState {
    pub fn new(seed: u64, tuning: DodgeTuning) -> Self {
        let player = Player::at_bottom(
            tuning.player_size,
            tuning.player_size,
            tuning.player_bottom_margin,
            tuning.player_speed,
        );
        Self {
            seed,
            rng: seeded_rng(seed),
            game_speed: tuning.base_speed,
            spawner: Spawner::new(tuning.spawn.interval_for(0)),
            player,
            obstacles: Vec::new(),
            targets: Vec::new(),
            stats: Stats::default(),
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

        if let Some(point) = input.touch {
            self.player.center_on(point);
        }
        self.player.steer_four_way(input);

        self.update_objects(dt_ms);
        self.check_collisions();
    }

    fn update_objects(&mut self, dt_ms: f64) {
        if self.spawner.advance(dt_ms) {
            self.spawn_object();
        }

        let speed = self.game_speed;
        for obj in self.obstacles.iter_mut().chain(self.targets.iter_mut()) {
            obj.y += speed;
        }

        let score = self.stats.score;
        self.game_speed = self.tuning.base_speed + (score / self.tuning.speed_step_score) as f32;
        self.spawner.set_interval(self.tuning.spawn.interval_for(score));

        self.obstacles.retain(|o| !o.is_below_world());
        self.targets.retain(|t| !t.is_below_world());
    }

    fn spawn_object(&mut self) {
        let size = self.tuning.object_size;
        let x = random_spawn_x(&mut self.rng, size);
        let obj = Rect::new(x, -size, size, size);
        if self.rng.random::<f64>() < self.tuning.obstacle_chance {
            self.obstacles.push(obj);
        } else {
            self.targets.push(obj);
        }
    }

    fn check_collisions(&mut self) {
        let player = self.player.rect;

        // Newest first
        let mut i = self.obstacles.len();
        while i > 0 {
            i -= 1;
            if player.overlaps(&self.obstacles[i]) {
                self.obstacles.remove(i);
                if self.stats.lose_heart() {
                    return;
                }
            }
        }

        let stats = &mut self.stats;
        self.targets.retain(|t| {
            if player.overlaps(t) {
                stats.add_point();
                false
            } else {
                true
            }
        });
    }
}
