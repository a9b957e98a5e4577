//! Queries over a scanned track list

use std::collections::HashSet;
use tempo_core::Track;

/// Tracks matching `query` in title, artist, or album, ignoring case
///
/// An empty query matches everything.
pub fn search<'a>(tracks: &'a [Track], query: &str) -> impl Iterator<Item = &'a Track> {
    let needle = query.to_lowercase();
    tracks.iter().filter(move |track| track.matches(&needle))
}

/// Unique artist names in first-seen order
pub fn artists(tracks: &[Track]) -> Vec<&str> {
    let mut seen = HashSet::new();
    tracks
        .iter()
        .map(|track| track.artist.as_str())
        .filter(|artist| seen.insert(*artist))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Vec<Track> {
        vec![
            Track::new("1", "Blue Morning", "file:///1.mp3").with_artist("Ana"),
            Track::new("2", "Red Evening", "file:///2.mp3")
                .with_artist("Ben")
                .with_album("Colours"),
            Track::new("3", "Green", "file:///3.mp3").with_artist("Ana"),
            Track::new("4", "Untitled", "file:///4.mp3"),
        ]
    }

    #[test]
    fn search_ignores_case_across_fields() {
        let tracks = library();

        let ids = |q: &str| search(&tracks, q).map(|t| t.id.as_str()).collect::<Vec<_>>();

        assert_eq!(ids("MORNING"), vec!["1"]);
        assert_eq!(ids("ana"), vec!["1", "3"]);
        assert_eq!(ids("colour"), vec!["2"]);
        assert_eq!(ids("unknown"), vec!["4"]);
        assert!(ids("jazz").is_empty());
        assert_eq!(ids("").len(), 4);
    }

    #[test]
    fn artists_are_unique_in_first_seen_order() {
        let tracks = library();
        assert_eq!(artists(&tracks), vec!["Ana", "Ben", "Unknown Artist"]);
    }
}
