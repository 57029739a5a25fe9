//! Canvas Arcade - two single-screen arcade games on an 800x600 canvas
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, AABB collisions)
//! - `input`: Keyboard state and pointer-to-world coordinate mapping
//! - `assets`: Sprite manifest and load tracking
//! - `renderer`: Drawing onto an abstract surface (canvas 2D on the web)
//! - `driver`: Loading -> Running -> GameOver loop state machine
//! - `platform`: Browser plumbing and the headless native runner
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod driver;
pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use driver::{Arcade, FrameOutcome, LoopDriver, Phase};
pub use error::{AssetError, ConfigError};
pub use tuning::{DodgeTuning, ShooterTuning, Tuning};

/// Game configuration constants
pub mod consts {
    /// Virtual world dimensions. All simulation happens in this space
    /// regardless of how large the canvas is displayed.
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Hearts at the start of a run
    pub const START_HEARTS: u8 = 3;

    /// Frame length used when the host gives no timing (first frame, headless)
    pub const FALLBACK_FRAME_MS: f64 = 1000.0 / 60.0;

    /// HUD layout
    pub const HUD_FONT: &str = "30px \"Courier New\"";
    pub const HUD_SCORE_POS: (f32, f32) = (20.0, 40.0);
    pub const HUD_HEARTS_POS: (f32, f32) = (WORLD_WIDTH - 150.0, 40.0);

    /// Flat colors (also used as sprite fallbacks)
    pub mod colors {
        pub const HUD_TEXT: &str = "white";
        pub const DODGE_PLAYER: &str = "#00FF00";
        pub const OBSTACLE: &str = "#FF0000";
        pub const TARGET: &str = "#FFD700";
        pub const SHIP: &str = "#00BFFF";
        pub const ENEMY: &str = "#FF4040";
        pub const ENEMY_DAMAGED: &str = "#FF9900";
        pub const BULLET: &str = "#FFFF66";
    }
}

/// Which of the two games to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Dodge,
    Shooter,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Dodge => "dodge",
            Variant::Shooter => "shooter",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dodge" | "1" => Some(Variant::Dodge),
            "shooter" | "shoot" | "2" => Some(Variant::Shooter),
            _ => None,
        }
    }

    /// Whether the variant waits for sprites before the first frame
    pub fn needs_assets(&self) -> bool {
        matches!(self, Variant::Shooter)
    }
}
