//! Sprite assets for the shooter
//!
//! Four logical sprites are declared up front. Each load settles on its own
//! as loaded or failed; the game starts once none is pending. A failed
//! sprite is never retried: the renderer draws a flat rectangle instead.

use std::collections::BTreeMap;

use crate::error::AssetError;

/// Logical sprite names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKind {
    Player,
    Enemy,
    EnemyDamaged,
    Bullet,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Player,
        AssetKind::Enemy,
        AssetKind::EnemyDamaged,
        AssetKind::Bullet,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AssetKind::Player => "player",
            AssetKind::Enemy => "enemy",
            AssetKind::EnemyDamaged => "enemyDamaged",
            AssetKind::Bullet => "bullet",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Logical name -> image URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    urls: [String; 4],
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            urls: AssetKind::ALL.map(|k| format!("assets/{}.png", k.name())),
        }
    }
}

impl AssetManifest {
    /// Parse a JSON object of `{ "name": "url" }`; unnamed sprites keep their default URL
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let entries: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| AssetError::Manifest(e.to_string()))?;
        let mut manifest = Self::default();
        for (name, url) in entries {
            let kind = AssetKind::from_name(&name).ok_or(AssetError::UnknownName(name))?;
            manifest.urls[kind.index()] = url;
        }
        Ok(manifest)
    }

    pub fn url(&self, kind: AssetKind) -> &str {
        &self.urls[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetKind, &str)> {
        AssetKind::ALL.into_iter().map(|k| (k, self.url(k)))
    }
}

/// Load progress of one sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetStatus {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// Tracks every declared sprite until all have settled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSet {
    status: [AssetStatus; 4],
}

impl AssetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, kind: AssetKind) -> AssetStatus {
        self.status[kind.index()]
    }

    pub fn mark_loaded(&mut self, kind: AssetKind) {
        self.status[kind.index()] = AssetStatus::Loaded;
    }

    /// Record a failure. Not fatal: the sprite falls back to a flat rectangle.
    pub fn mark_failed(&mut self, kind: AssetKind, url: &str) {
        let err = AssetError::LoadFailed {
            name: kind.name().to_string(),
            url: url.to_string(),
        };
        log::warn!("{err}; using fallback rectangle");
        self.status[kind.index()] = AssetStatus::Failed;
    }

    /// Every sprite has either loaded or failed
    pub fn is_settled(&self) -> bool {
        !self.status.contains(&AssetStatus::Pending)
    }

    pub fn is_ready(&self, kind: AssetKind) -> bool {
        self.status(kind) == AssetStatus::Loaded
    }

    pub fn loaded_count(&self) -> usize {
        self.count(AssetStatus::Loaded)
    }

    pub fn failed_count(&self) -> usize {
        self.count(AssetStatus::Failed)
    }

    fn count(&self, status: AssetStatus) -> usize {
        self.status.iter().filter(|s| **s == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in AssetKind::ALL {
            assert_eq!(AssetKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(AssetKind::from_name("boss"), None);
    }

    #[test]
    fn test_default_manifest_urls() {
        let manifest = AssetManifest::default();
        assert_eq!(manifest.url(AssetKind::EnemyDamaged), "assets/enemyDamaged.png");
        assert_eq!(manifest.iter().count(), 4);
    }

    #[test]
    fn test_manifest_partial_override() {
        let manifest = AssetManifest::from_json(r#"{ "bullet": "img/shot.png" }"#).unwrap();
        assert_eq!(manifest.url(AssetKind::Bullet), "img/shot.png");
        assert_eq!(manifest.url(AssetKind::Player), "assets/player.png");
    }

    #[test]
    fn test_manifest_rejects_unknown_name() {
        let err = AssetManifest::from_json(r#"{ "boss": "boss.png" }"#).unwrap_err();
        assert_eq!(err, AssetError::UnknownName("boss".into()));
    }

    #[test]
    fn test_manifest_rejects_bad_json() {
        assert!(matches!(
            AssetManifest::from_json("[1, 2]"),
            Err(AssetError::Manifest(_))
        ));
    }

    #[test]
    fn test_settles_on_mix_of_success_and_failure() {
        let mut set = AssetSet::new();
        assert!(!set.is_settled());

        set.mark_loaded(AssetKind::Player);
        set.mark_failed(AssetKind::Enemy, "assets/enemy.png");
        set.mark_loaded(AssetKind::EnemyDamaged);
        assert!(!set.is_settled());

        set.mark_failed(AssetKind::Bullet, "assets/bullet.png");
        assert!(set.is_settled());
        assert_eq!(set.loaded_count(), 2);
        assert_eq!(set.failed_count(), 2);
        assert!(set.is_ready(AssetKind::Player));
        assert!(!set.is_ready(AssetKind::Enemy));
    }
}
