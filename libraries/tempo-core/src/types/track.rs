/// Track descriptor
use serde::{Deserialize, Serialize};

/// Stable per-asset track identifier
pub type TrackId = String;

/// Artist used when the scanner has nothing better
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// One playable audio item
///
/// Tracks are immutable once built by the scanner; the player shares them
/// behind `Arc` instead of copying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique, stable identifier for the device asset
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Duration in milliseconds (0 when unknown)
    #[serde(rename = "duration", default)]
    pub duration_ms: u64,

    /// Resource locator, local or remote
    pub uri: String,

    /// Artwork locator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
}

impl Track {
    /// Create a track with minimal metadata
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: UNKNOWN_ARTIST.to_string(),
            album: None,
            duration_ms: 0,
            uri: uri.into(),
            artwork: None,
        }
    }

    /// Set the artist
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the album
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the duration in milliseconds
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Case-insensitive substring match over title, artist, and album
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.artist.to_lowercase().contains(needle)
            || self
                .album
                .as_ref()
                .is_some_and(|album| album.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_shape() {
        let track = Track::new("42", "Song", "file:///music/song.mp3").with_duration_ms(180_000);
        let json = serde_json::to_value(&track).unwrap();

        assert_eq!(json["id"], "42");
        assert_eq!(json["duration"], 180_000);
        assert_eq!(json["artist"], UNKNOWN_ARTIST);
        assert!(json.get("album").is_none());
        assert!(json.get("artwork").is_none());
    }

    #[test]
    fn parse_descriptor_without_optionals() {
        let track: Track = serde_json::from_str(
            r#"{"id":"a","title":"T","artist":"X","duration":1500,"uri":"content://a"}"#,
        )
        .unwrap();

        assert_eq!(track.duration_ms, 1500);
        assert_eq!(track.album, None);
        assert_eq!(track.artwork, None);
    }

    #[test]
    fn matches_any_text_field() {
        let track = Track::new("1", "Blue Monday", "file:///a.mp3")
            .with_artist("New Order")
            .with_album("Power, Corruption & Lies");

        assert!(track.matches("monday"));
        assert!(track.matches("order"));
        assert!(track.matches("corruption"));
        assert!(!track.matches("joy division"));
    }
}
