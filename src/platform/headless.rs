//! Headless native runner
//!
//! Drives a game with fixed frame steps and a simple autopilot, drawing
//! nothing. Used by the native binary for smoke runs and balance checks.

use crate::consts::WORLD_WIDTH;
use crate::driver::{ArcadeGame, FrameOutcome, LoopDriver, Phase};
use crate::renderer::NullSurface;
use crate::sim::{DodgeState, Rect, ShooterState, Stats};

/// Horizontal intent for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
    Hold,
}

impl Steer {
    fn dom_key(self) -> Option<&'static str> {
        match self {
            Steer::Left => Some("ArrowLeft"),
            Steer::Right => Some("ArrowRight"),
            Steer::Hold => None,
        }
    }
}

/// How far above the player an obstacle counts as a threat
const THREAT_RANGE: f32 = 150.0;

pub fn autopilot(game: &ArcadeGame) -> Steer {
    match game {
        ArcadeGame::Dodge(state) => dodge_autopilot(state),
        ArcadeGame::Shooter(state) => shooter_autopilot(state),
    }
}

fn toward(player: &Rect, goal_x: f32) -> Steer {
    let dx = goal_x - player.center().x;
    if dx.abs() < 4.0 {
        Steer::Hold
    } else if dx < 0.0 {
        Steer::Left
    } else {
        Steer::Right
    }
}

fn dodge_autopilot(state: &DodgeState) -> Steer {
    let p = state.player.rect;
    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.x < p.right() && o.right() > p.x)
        .filter(|o| o.bottom() > p.y - THREAT_RANGE && o.y < p.bottom())
        .max_by(|a, b| a.y.total_cmp(&b.y));

    if let Some(threat) = threat {
        let away_left = threat.center().x >= p.center().x;
        return match (away_left, p.x <= 0.0, p.right() >= WORLD_WIDTH) {
            (true, false, _) => Steer::Left,
            (true, true, _) => Steer::Right,
            (false, _, false) => Steer::Right,
            (false, _, true) => Steer::Left,
        };
    }

    state
        .targets
        .iter()
        .max_by(|a, b| a.y.total_cmp(&b.y))
        .map_or(Steer::Hold, |t| toward(&p, t.center().x))
}

fn shooter_autopilot(state: &ShooterState) -> Steer {
    let p = state.ship.player.rect;
    state
        .enemies
        .iter()
        .max_by(|a, b| a.rect.y.total_cmp(&b.rect.y))
        .map_or(Steer::Hold, |e| toward(&p, e.rect.center().x))
}

/// Outcome of a headless run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessReport {
    pub frames: u64,
    pub stats: Stats,
    pub game_over: bool,
}

/// Run until game over or `max_frames`, each frame `frame_ms` long
pub fn run(driver: &mut LoopDriver<ArcadeGame>, max_frames: u64, frame_ms: f64) -> HeadlessReport {
    if driver.phase() == Phase::Loading {
        log::info!("No sprites in headless mode, using fallback rectangles");
        driver.assets_settled();
    }

    let mut surface = NullSurface;
    let mut held: Option<&'static str> = None;
    let mut time = 0.0;
    let mut frames = 0;

    while frames < max_frames {
        let want = autopilot(driver.game()).dom_key();
        if want != held {
            if let Some(key) = held {
                driver.key_up(key);
            }
            if let Some(key) = want {
                driver.key_down(key);
            }
            held = want;
        }

        let outcome = driver.frame(time, &mut surface);
        frames += 1;
        time += frame_ms;
        if outcome == FrameOutcome::Halt {
            break;
        }
    }

    let report = HeadlessReport {
        frames,
        stats: driver.stats(),
        game_over: driver.phase() == Phase::GameOver,
    };
    log::debug!("Headless run finished: {:?}", report);
    report
}
