//! Loop driver state machine
//!
//! Owns the game world and everything the host feeds it between frames.
//! Host code only forwards events and calls `frame` once per animation
//! frame until it returns `FrameOutcome::Halt`.
//!
//! ```text
//! Loading --assets settled--> Running --hearts hit 0--> GameOver
//!    ^                                                      |
//!    +------------------------restart-----------------------+
//! ```

use glam::Vec2;

use crate::Variant;
use crate::consts::FALLBACK_FRAME_MS;
use crate::input::{FOUR_WAY, Key, KeyState, TWO_WAY, TickInput};
use crate::renderer::{self, Surface};
use crate::sim::{DodgeState, ShooterState, Stats};
use crate::tuning::Tuning;

/// Driver phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for every sprite to load or fail
    Loading,
    /// Simulating and drawing every frame
    Running,
    /// Final score shown, no more frames until restart
    GameOver,
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Halt,
}

/// A game the driver can run
pub trait Arcade {
    /// Advance one frame of `dt_ms` milliseconds
    fn tick(&mut self, input: &TickInput, dt_ms: f64);
    /// Start a fresh run
    fn reset(&mut self, seed: u64);
    fn stats(&self) -> Stats;
    fn draw(&self, surface: &mut dyn Surface);
    /// Keys this game listens to
    fn tracked_keys(&self) -> &'static [Key];
}

impl Arcade for DodgeState {
    fn tick(&mut self, input: &TickInput, dt_ms: f64) {
        DodgeState::tick(self, input, dt_ms);
    }

    fn reset(&mut self, seed: u64) {
        DodgeState::reset(self, seed);
    }

    fn stats(&self) -> Stats {
        self.stats
    }

    fn draw(&self, surface: &mut dyn Surface) {
        renderer::draw_dodge(self, surface);
    }

    fn tracked_keys(&self) -> &'static [Key] {
        FOUR_WAY
    }
}

impl Arcade for ShooterState {
    fn tick(&mut self, input: &TickInput, dt_ms: f64) {
        ShooterState::tick(self, input, dt_ms);
    }

    fn reset(&mut self, seed: u64) {
        ShooterState::reset(self, seed);
    }

    fn stats(&self) -> Stats {
        self.stats
    }

    fn draw(&self, surface: &mut dyn Surface) {
        renderer::draw_shooter(self, surface);
    }

    fn tracked_keys(&self) -> &'static [Key] {
        TWO_WAY
    }
}

/// Either game, chosen at startup
#[derive(Debug, Clone)]
pub enum ArcadeGame {
    Dodge(DodgeState),
    Shooter(ShooterState),
}

impl ArcadeGame {
    pub fn new(variant: Variant, seed: u64, tuning: &Tuning) -> Self {
        match variant {
            Variant::Dodge => ArcadeGame::Dodge(DodgeState::new(seed, tuning.dodge.clone())),
            Variant::Shooter => {
                ArcadeGame::Shooter(ShooterState::new(seed, tuning.shooter.clone()))
            }
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            ArcadeGame::Dodge(_) => Variant::Dodge,
            ArcadeGame::Shooter(_) => Variant::Shooter,
        }
    }

    fn inner(&self) -> &dyn Arcade {
        match self {
            ArcadeGame::Dodge(g) => g,
            ArcadeGame::Shooter(g) => g,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Arcade {
        match self {
            ArcadeGame::Dodge(g) => g,
            ArcadeGame::Shooter(g) => g,
        }
    }
}

impl Arcade for ArcadeGame {
    fn tick(&mut self, input: &TickInput, dt_ms: f64) {
        self.inner_mut().tick(input, dt_ms);
    }

    fn reset(&mut self, seed: u64) {
        self.inner_mut().reset(seed);
    }

    fn stats(&self) -> Stats {
        self.inner().stats()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.inner().draw(surface);
    }

    fn tracked_keys(&self) -> &'static [Key] {
        self.inner().tracked_keys()
    }
}

/// Owns one game and runs the Loading/Running/GameOver cycle
#[derive(Debug)]
pub struct LoopDriver<G: Arcade> {
    game: G,
    phase: Phase,
    needs_assets: bool,
    assets_settled: bool,
    keys: KeyState,
    pending_touch: Option<Vec2>,
    last_timestamp: Option<f64>,
    seed: u64,
    /// Bumped on every restart so a superseded host loop can notice and stop
    generation: u64,
}

impl<G: Arcade> LoopDriver<G> {
    pub fn new(game: G, seed: u64, needs_assets: bool) -> Self {
        let keys = KeyState::new(game.tracked_keys());
        Self {
            game,
            phase: if needs_assets {
                Phase::Loading
            } else {
                Phase::Running
            },
            needs_assets,
            assets_settled: false,
            keys,
            pending_touch: None,
            last_timestamp: None,
            seed,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn stats(&self) -> Stats {
        self.game.stats()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All sprites have loaded or failed: start the run
    pub fn assets_settled(&mut self) {
        self.assets_settled = true;
        if self.phase == Phase::Loading {
            self.game.reset(self.seed);
            self.last_timestamp = None;
            self.phase = Phase::Running;
            log::info!("Assets settled, game running (seed {})", self.seed);
        }
    }

    /// Forward a DOM keydown. Returns true if the game consumed the key.
    pub fn key_down(&mut self, dom_key: &str) -> bool {
        self.keys.press(dom_key)
    }

    /// Forward a DOM keyup. Returns true if the game consumed the key.
    pub fn key_up(&mut self, dom_key: &str) -> bool {
        self.keys.release(dom_key)
    }

    /// Touch point already mapped to world units; applied on the next frame
    pub fn touch(&mut self, world_point: Vec2) {
        if self.phase == Phase::Running {
            self.pending_touch = Some(world_point);
        }
    }

    /// Run one frame at host time `timestamp_ms`
    pub fn frame(&mut self, timestamp_ms: f64, surface: &mut dyn Surface) -> FrameOutcome {
        match self.phase {
            Phase::Loading => FrameOutcome::Continue,
            Phase::GameOver => FrameOutcome::Halt,
            Phase::Running => {
                let dt = self
                    .last_timestamp
                    .map_or(0.0, |last| (timestamp_ms - last).max(0.0));
                self.last_timestamp = Some(timestamp_ms);

                surface.clear();
                let input = self.keys.snapshot(self.pending_touch.take());
                self.game.tick(&input, dt);
                self.game.draw(surface);

                let stats = self.game.stats();
                if stats.game_over {
                    self.phase = Phase::GameOver;
                    log::info!("Game over - final score {}", stats.score);
                    FrameOutcome::Halt
                } else {
                    FrameOutcome::Continue
                }
            }
        }
    }

    /// Frame with no host clock, advancing a nominal 60 Hz step
    pub fn step(&mut self, surface: &mut dyn Surface) -> FrameOutcome {
        let next = self.last_timestamp.map_or(0.0, |t| t + FALLBACK_FRAME_MS);
        self.frame(next, surface)
    }

    /// Full reset. Waits in Loading again only if sprites never settled.
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.generation += 1;
        self.game.reset(seed);
        self.keys.clear();
        self.pending_touch = None;
        self.last_timestamp = None;
        self.phase = if self.needs_assets && !self.assets_settled {
            Phase::Loading
        } else {
            Phase::Running
        };
        log::info!("Game restarted with seed: {}", seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullSurface;
    use crate::renderer::tests::{DrawCall, Recorder};
    use crate::sim::Rect;

    fn dodge_driver() -> LoopDriver<ArcadeGame> {
        LoopDriver::new(
            ArcadeGame::new(Variant::Dodge, 1, &Tuning::default()),
            1,
            false,
        )
    }

    fn shooter_driver() -> LoopDriver<ArcadeGame> {
        LoopDriver::new(
            ArcadeGame::new(Variant::Shooter, 1, &Tuning::default()),
            1,
            true,
        )
    }

    fn end_dodge_game(driver: &mut LoopDriver<ArcadeGame>) {
        if let ArcadeGame::Dodge(state) = driver.game_mut() {
            state.stats.hearts = 1;
            let p = state.player.rect;
            state.obstacles.push(Rect::new(p.x, p.y, 30.0, 30.0));
        }
    }

    #[test]
    fn test_dodge_starts_running() {
        let driver = dodge_driver();
        assert_eq!(driver.phase(), Phase::Running);
    }

    #[test]
    fn test_loading_waits_for_assets() {
        let mut driver = shooter_driver();
        assert_eq!(driver.phase(), Phase::Loading);

        let mut rec = Recorder::default();
        assert_eq!(driver.frame(16.0, &mut rec), FrameOutcome::Continue);
        assert!(rec.calls.is_empty());
        if let ArcadeGame::Shooter(state) = driver.game() {
            assert_eq!(state.frame, 0);
        }

        driver.assets_settled();
        assert_eq!(driver.phase(), Phase::Running);
        assert_eq!(driver.frame(32.0, &mut rec), FrameOutcome::Continue);
        assert_eq!(rec.calls[0], DrawCall::Clear);
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut driver = shooter_driver();
        driver.assets_settled();
        let mut surface = NullSurface;
        driver.frame(5000.0, &mut surface);
        driver.frame(5100.0, &mut surface);
        if let ArcadeGame::Shooter(state) = driver.game() {
            assert_eq!(state.clock_ms, 100.0);
        } else {
            panic!("expected shooter");
        }
    }

    #[test]
    fn test_game_over_halts() {
        let mut driver = dodge_driver();
        end_dodge_game(&mut driver);

        let mut surface = NullSurface;
        assert_eq!(driver.frame(0.0, &mut surface), FrameOutcome::Halt);
        assert_eq!(driver.phase(), Phase::GameOver);
        assert_eq!(driver.stats().hearts, 0);
        assert_eq!(driver.frame(16.0, &mut surface), FrameOutcome::Halt);
    }

    #[test]
    fn test_game_over_reported_once() {
        let mut driver = dodge_driver();
        end_dodge_game(&mut driver);

        let mut rec = Recorder::default();
        assert_eq!(driver.frame(0.0, &mut rec), FrameOutcome::Halt);
        let calls = rec.calls.len();
        let frame = match driver.game() {
            ArcadeGame::Dodge(state) => state.frame,
            ArcadeGame::Shooter(_) => panic!("expected dodge"),
        };

        // Later frames neither tick, draw nor re-enter the game over transition
        for t in 1..5 {
            assert_eq!(driver.frame(t as f64 * 16.0, &mut rec), FrameOutcome::Halt);
        }
        assert_eq!(rec.calls.len(), calls);
        if let ArcadeGame::Dodge(state) = driver.game() {
            assert_eq!(state.frame, frame);
        }
    }

    #[test]
    fn test_restart_resets_world() {
        let mut driver = dodge_driver();
        if let ArcadeGame::Dodge(state) = driver.game_mut() {
            state.stats.score = 12;
            state.targets.push(Rect::new(0.0, 0.0, 30.0, 30.0));
        }
        end_dodge_game(&mut driver);
        driver.step(&mut NullSurface);
        assert_eq!(driver.phase(), Phase::GameOver);

        let generation = driver.generation();
        driver.restart(2);
        assert_eq!(driver.phase(), Phase::Running);
        assert_eq!(driver.generation(), generation + 1);
        assert_eq!(driver.stats(), Stats::default());
        if let ArcadeGame::Dodge(state) = driver.game() {
            assert!(state.obstacles.is_empty());
            assert!(state.targets.is_empty());
            assert_eq!(state.seed, 2);
        }
    }

    #[test]
    fn test_restart_before_assets_settle_stays_loading() {
        let mut driver = shooter_driver();
        driver.restart(3);
        assert_eq!(driver.phase(), Phase::Loading);
        driver.assets_settled();
        driver.restart(4);
        assert_eq!(driver.phase(), Phase::Running);
    }

    #[test]
    fn test_keys_reach_simulation() {
        let mut driver = dodge_driver();
        assert!(driver.key_down("ArrowLeft"));
        assert!(!driver.key_down("Space"));
        let x0 = match driver.game() {
            ArcadeGame::Dodge(s) => s.player.rect.x,
            _ => unreachable!(),
        };
        driver.step(&mut NullSurface);
        let x1 = match driver.game() {
            ArcadeGame::Dodge(s) => s.player.rect.x,
            _ => unreachable!(),
        };
        assert_eq!(x1, x0 - 7.0);

        driver.key_up("ArrowLeft");
        driver.step(&mut NullSurface);
        let x2 = match driver.game() {
            ArcadeGame::Dodge(s) => s.player.rect.x,
            _ => unreachable!(),
        };
        assert_eq!(x2, x1);
    }

    #[test]
    fn test_shooter_ignores_vertical_keys() {
        let mut driver = shooter_driver();
        assert!(!driver.key_down("ArrowUp"));
        assert!(driver.key_down("ArrowRight"));
    }

    #[test]
    fn test_touch_applied_once() {
        let mut driver = dodge_driver();
        driver.touch(Vec2::new(100.0, 100.0));
        driver.step(&mut NullSurface);
        if let ArcadeGame::Dodge(state) = driver.game() {
            assert_eq!(state.player.rect.x, 75.0);
        }
    }

    #[test]
    fn test_hud_drawn_every_frame() {
        let mut driver = dodge_driver();
        let mut rec = Recorder::default();
        driver.step(&mut rec);
        driver.step(&mut rec);
        let hud = rec
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Text(t) if t.starts_with("Score")))
            .count();
        assert_eq!(hud, 2);
    }
}
