/// Durable playback preferences
use serde::{Deserialize, Serialize};

/// Repeat mode for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop after the last track
    #[default]
    None,
    /// Loop the current track
    One,
    /// Loop the whole playlist
    All,
}

impl RepeatMode {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::One => "one",
            Self::All => "all",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Self::None),
            "one" => Some(Self::One),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// Next mode in the `None -> One -> All -> None` cycle
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::One,
            Self::One => Self::All,
            Self::All => Self::None,
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of the preferences that survive restarts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Output volume (0.0 - 1.0)
    pub volume: f32,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Shuffle enabled
    #[serde(rename = "isShuffled")]
    pub shuffled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            volume: 1.0,
            repeat_mode: RepeatMode::None,
            shuffled: false,
        }
    }
}

impl Preferences {
    /// Repeat mode after one more toggle
    pub fn next_repeat_mode(&self) -> RepeatMode {
        self.repeat_mode.cycle()
    }

    /// Overlay stored values onto `self`, keeping current values for missing fields
    #[must_use]
    pub fn merged(self, stored: StoredPreferences) -> Self {
        Self {
            volume: stored.volume.unwrap_or(self.volume),
            repeat_mode: stored.repeat_mode.unwrap_or(self.repeat_mode),
            shuffled: stored.shuffled.unwrap_or(self.shuffled),
        }
    }
}

/// Preferences as read back from a store
///
/// Every field is optional: absent or malformed values are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StoredPreferences {
    pub volume: Option<f32>,
    pub repeat_mode: Option<RepeatMode>,
    pub shuffled: Option<bool>,
}

impl From<Preferences> for StoredPreferences {
    fn from(prefs: Preferences) -> Self {
        Self {
            volume: Some(prefs.volume),
            repeat_mode: Some(prefs.repeat_mode),
            shuffled: Some(prefs.shuffled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_mode_cycles_through_all_three() {
        let start = RepeatMode::None;
        let one = start.cycle();
        let all = one.cycle();

        assert_eq!(one, RepeatMode::One);
        assert_eq!(all, RepeatMode::All);
        assert_eq!(all.cycle(), start);
    }

    #[test]
    fn repeat_mode_string_roundtrip() {
        for mode in [RepeatMode::None, RepeatMode::One, RepeatMode::All] {
            assert_eq!(RepeatMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(RepeatMode::parse("off"), None);
    }

    #[test]
    fn wire_names() {
        let prefs = Preferences {
            volume: 0.4,
            repeat_mode: RepeatMode::All,
            shuffled: true,
        };
        let json = serde_json::to_value(prefs).unwrap();

        assert_eq!(json["repeatMode"], "all");
        assert_eq!(json["isShuffled"], true);
        assert!((json["volume"].as_f64().unwrap() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn merge_keeps_defaults_for_missing_fields() {
        let stored = StoredPreferences {
            volume: Some(0.25),
            repeat_mode: None,
            shuffled: None,
        };
        let merged = Preferences::default().merged(stored);

        assert_eq!(merged.volume, 0.25);
        assert_eq!(merged.repeat_mode, RepeatMode::None);
        assert!(!merged.shuffled);
    }
}
