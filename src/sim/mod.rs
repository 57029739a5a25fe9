//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - World units only (800x600), never display pixels
//! - Seeded RNG only
//! - Stable iteration order (collision tie-breaks depend on it)
//! - No rendering or platform dependencies

pub mod collision;
pub mod dodge;
pub mod shooter;
pub mod spawner;
pub mod state;

pub use collision::Rect;
pub use dodge::DodgeState;
pub use shooter::{Bullet, Enemy, ShooterState, Ship, steer_toward};
pub use spawner::{SpawnCurve, SpawnCurveOverride, Spawner, random_spawn_x};
pub use state::{Player, Stats};
