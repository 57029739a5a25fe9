//! Error types
//!
//! Nothing here is fatal to a running game: asset failures fall back to flat
//! rectangles and bad configuration falls back to defaults.

use core::fmt;

/// Failure while loading or declaring sprite assets
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    /// The image request settled with an error event
    LoadFailed { name: String, url: String },
    /// Manifest named an asset the games do not use
    UnknownName(String),
    /// Manifest JSON could not be parsed
    Manifest(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailed { name, url } => {
                write!(f, "failed to load asset '{name}' from {url}")
            }
            Self::UnknownName(name) => write!(f, "unknown asset name '{name}'"),
            Self::Manifest(msg) => write!(f, "invalid asset manifest: {msg}"),
        }
    }
}

impl std::error::Error for AssetError {}

/// Invalid tuning document
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// JSON syntax or type error
    Parse(String),
    /// A value parsed but is out of its allowed range
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "tuning parse error: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning value '{field}': {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::LoadFailed {
            name: "bullet".into(),
            url: "assets/bullet.png".into(),
        };
        assert_eq!(err.to_string(), "failed to load asset 'bullet' from assets/bullet.png");
    }

    #[test]
    fn test_config_error_from_json() {
        let err: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
