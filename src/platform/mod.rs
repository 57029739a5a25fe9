//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (requestAnimationFrame on web, fixed steps natively)
//! - Image loading
//! - Page configuration (`data-*` attributes on the canvas)

#[cfg(not(target_arch = "wasm32"))]
pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::Variant;
use crate::assets::AssetManifest;
use crate::tuning::Tuning;

/// Startup configuration read from the page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageConfig {
    pub variant: Variant,
    pub tuning: Tuning,
    pub manifest: AssetManifest,
}

impl PageConfig {
    /// Build from the raw `data-game`, `data-tuning` and `data-assets`
    /// attribute values. Anything missing or invalid keeps its default.
    pub fn from_attributes(game: Option<&str>, tuning: Option<&str>, assets: Option<&str>) -> Self {
        let variant = match game {
            Some(name) => Variant::parse(name).unwrap_or_else(|| {
                log::warn!("Unknown game '{name}', defaulting to dodge");
                Variant::default()
            }),
            None => Variant::default(),
        };

        let tuning = tuning
            .map(Tuning::from_json_or_default)
            .unwrap_or_default();

        let manifest = match assets.map(AssetManifest::from_json) {
            Some(Ok(manifest)) => manifest,
            Some(Err(e)) => {
                log::warn!("{e}; using default asset paths");
                AssetManifest::default()
            }
            None => AssetManifest::default(),
        };

        Self {
            variant,
            tuning,
            manifest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetKind;

    #[test]
    fn test_defaults_without_attributes() {
        assert_eq!(PageConfig::from_attributes(None, None, None), PageConfig::default());
    }

    #[test]
    fn test_reads_all_attributes() {
        let config = PageConfig::from_attributes(
            Some("shooter"),
            Some(r#"{ "shooter": { "enemy_health": 3 } }"#),
            Some(r#"{ "player": "ship.png" }"#),
        );
        assert_eq!(config.variant, Variant::Shooter);
        assert_eq!(config.tuning.shooter.enemy_health, 3);
        assert_eq!(config.manifest.url(AssetKind::Player), "ship.png");
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = PageConfig::from_attributes(
            Some("tetris"),
            Some(r#"{ "dodge": { "player_size": -1 } }"#),
            Some(r#"{ "boss": "boss.png" }"#),
        );
        assert_eq!(config, PageConfig::default());
    }
}
