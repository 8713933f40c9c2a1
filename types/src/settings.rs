//! User-adjustable game settings.
//!
//! [`GameConfig`] is the fully-resolved configuration the state machine reads.
//! [`ConfigPatch`] is a partial update: only the fields that are `Some` are
//! merged, so a preferences file or a single toggle can leave the rest alone.

use serde::{Deserialize, Serialize};

// bool::default() is false, so only true needs a fn
const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Move to the next step shortly after a correct answer.
    #[serde(default = "default_true")]
    pub auto_advance: bool,
    #[serde(default = "default_true")]
    pub show_hints: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            auto_advance: true,
            show_hints: true,
            sound_enabled: true,
        }
    }
}

impl GameConfig {
    /// Shallow merge: every `Some` field in `patch` overwrites ours.
    #[must_use]
    pub fn merged(self, patch: ConfigPatch) -> Self {
        Self {
            auto_advance: patch.auto_advance.unwrap_or(self.auto_advance),
            show_hints: patch.show_hints.unwrap_or(self.show_hints),
            sound_enabled: patch.sound_enabled.unwrap_or(self.sound_enabled),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_advance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_hints: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
}

impl ConfigPatch {
    #[must_use]
    pub fn auto_advance(value: bool) -> Self {
        Self {
            auto_advance: Some(value),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn show_hints(value: bool) -> Self {
        Self {
            show_hints: Some(value),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sound_enabled(value: bool) -> Self {
        Self {
            sound_enabled: Some(value),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.auto_advance.is_none() && self.show_hints.is_none() && self.sound_enabled.is_none()
    }
}

impl From<GameConfig> for ConfigPatch {
    fn from(config: GameConfig) -> Self {
        Self {
            auto_advance: Some(config.auto_advance),
            show_hints: Some(config.show_hints),
            sound_enabled: Some(config.sound_enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_all_enabled() {
        let config = GameConfig::default();
        assert!(config.auto_advance);
        assert!(config.show_hints);
        assert!(config.sound_enabled);
    }

    #[test]
    fn merge_only_touches_present_fields() {
        let config = GameConfig::default().merged(ConfigPatch::sound_enabled(false));
        assert!(config.auto_advance);
        assert!(config.show_hints);
        assert!(!config.sound_enabled);

        let unchanged = config.merged(ConfigPatch::default());
        assert_eq!(unchanged, config);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: GameConfig =
            serde_json::from_value(serde_json::json!({ "show_hints": false })).unwrap();
        assert!(config.auto_advance);
        assert!(!config.show_hints);
        assert!(config.sound_enabled);
    }

    #[test]
    fn patch_skips_absent_fields() {
        let json = serde_json::to_value(ConfigPatch::auto_advance(false)).unwrap();
        assert_eq!(json, serde_json::json!({ "auto_advance": false }));
        assert!(ConfigPatch::default().is_empty());
        assert!(!ConfigPatch::from(GameConfig::default()).is_empty());
    }
}
