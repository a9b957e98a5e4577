//! Directory scanning for audio files

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tempo_core::{MediaScanner, Track};
use tracing::{debug, info, warn};
use url::Url;
use walkdir::WalkDir;

use crate::catalog;
use crate::error::{LibraryError, Result};

/// Supported audio file extensions
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "aac", "m4a", "opus"];

/// Default cap on tracks returned by one scan
pub const DEFAULT_MAX_TRACKS: usize = 1000;

/// Media scanner over a music directory
///
/// Tracks are built from file names alone: the title is the file name without
/// its extension, the artist is unknown, and the duration is left at zero
/// for the audio engine to report once loaded.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    root: PathBuf,

    /// Whether to follow symbolic links
    follow_links: bool,

    /// Maximum depth to traverse (`None` for unlimited)
    max_depth: Option<usize>,

    /// Maximum number of tracks per scan
    max_tracks: usize,
}

impl DirectoryScanner {
    /// Create a scanner rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
            max_depth: None,
            max_tracks: DEFAULT_MAX_TRACKS,
        }
    }

    /// Set whether to follow symbolic links
    #[must_use]
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum directory depth to traverse
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set the cap on tracks per scan
    #[must_use]
    pub fn max_tracks(mut self, max_tracks: usize) -> Self {
        self.max_tracks = max_tracks;
        self
    }

    /// Music directory being scanned
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find audio files under the root, in file-name order
    ///
    /// Unreadable entries are skipped with a warning.
    pub fn scan_files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Err(LibraryError::NotFound(self.root.display().to_string()));
        }

        if !self.root.is_dir() {
            return Err(LibraryError::InvalidPath(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let mut walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut audio_files = Vec::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if is_audio_file(entry.path()) {
                audio_files.push(entry.into_path());
                if audio_files.len() >= self.max_tracks {
                    debug!("Reached track cap of {}", self.max_tracks);
                    break;
                }
            }
        }

        Ok(audio_files)
    }

    /// Scan the directory and build tracks
    pub fn scan_tracks(&self) -> Result<Vec<Track>> {
        let files = self.scan_files()?;
        let mut tracks = Vec::with_capacity(files.len());

        for path in &files {
            match track_from_path(path) {
                Ok(track) => tracks.push(track),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        info!("Found {} tracks in {}", tracks.len(), self.root.display());
        Ok(tracks)
    }

    /// Scan off the async runtime
    async fn scan_tracks_blocking(&self) -> Result<Vec<Track>> {
        let scanner = self.clone();
        tokio::task::spawn_blocking(move || scanner.scan_tracks())
            .await
            .map_err(|e| LibraryError::Task(e.to_string()))?
    }

    /// Tracks whose title, artist, or album contains `query`, ignoring case
    pub async fn search_tracks(&self, query: &str) -> Result<Vec<Track>> {
        let tracks = self.scan_tracks_blocking().await?;
        Ok(catalog::search(&tracks, query).cloned().collect())
    }

    /// Unique artist names, in the order they were first seen
    pub async fn list_artists(&self) -> Result<Vec<String>> {
        let tracks = self.scan_tracks_blocking().await?;
        Ok(catalog::artists(&tracks)
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl MediaScanner for DirectoryScanner {
    async fn request_permission(&self) -> bool {
        match tokio::fs::read_dir(&self.root).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Cannot read {}: {}", self.root.display(), e);
                false
            }
        }
    }

    async fn list_tracks(&self) -> tempo_core::Result<Vec<Track>> {
        Ok(self.scan_tracks_blocking().await?)
    }
}

/// Check if a file is a supported audio file
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Build a track descriptor for an audio file
///
/// The id is a hash of the canonical path, so it is stable across scans.
pub fn track_from_path(path: &Path) -> Result<Track> {
    let canonical = path.canonicalize()?;

    let title = canonical
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| LibraryError::InvalidPath(canonical.display().to_string()))?;

    let uri = Url::from_file_path(&canonical)
        .map_err(|()| LibraryError::InvalidPath(canonical.display().to_string()))?;

    Ok(Track::new(track_id(&canonical), title, uri.as_str()))
}

fn track_id(path: &Path) -> String {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    hex::encode(&digest[..16])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tempo_core::types::UNKNOWN_ARTIST;

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("test.mp3")));
        assert!(is_audio_file(Path::new("test.MP3")));
        assert!(is_audio_file(Path::new("test.opus")));
        assert!(is_audio_file(Path::new("test.m4a")));
        assert!(!is_audio_file(Path::new("test.txt")));
        assert!(!is_audio_file(Path::new("test")));
    }

    #[test]
    fn test_scan_directory() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("song1.mp3"), b"fake mp3").unwrap();
        fs::write(base.join("song2.flac"), b"fake flac").unwrap();
        fs::write(base.join("readme.txt"), b"not audio").unwrap();

        let subdir = base.join("subdir");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("song3.ogg"), b"fake ogg").unwrap();

        let files = DirectoryScanner::new(base).scan_files().unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.iter().any(|p| p.ends_with("song1.mp3")));
        assert!(files.iter().any(|p| p.ends_with("song3.ogg")));
        assert!(!files.iter().any(|p| p.ends_with("readme.txt")));
    }

    #[test]
    fn test_scan_with_max_depth() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();

        fs::write(base.join("song1.mp3"), b"fake mp3").unwrap();
        let subdir = base.join("subdir");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("song2.mp3"), b"fake mp3").unwrap();

        let files = DirectoryScanner::new(base).max_depth(1).scan_files().unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("song1.mp3"));
    }

    #[test]
    fn test_scan_respects_track_cap() {
        let temp = TempDir::new().unwrap();
        for i in 0..5 {
            fs::write(temp.path().join(format!("{}.wav", i)), b"x").unwrap();
        }

        let files = DirectoryScanner::new(temp.path())
            .max_tracks(3)
            .scan_files()
            .unwrap();

        assert_eq!(files.len(), 3);
        assert!(files[0].ends_with("0.wav"));
    }

    #[test]
    fn test_missing_directory() {
        let err = DirectoryScanner::new("/definitely/not/here")
            .scan_files()
            .unwrap_err();
        assert!(matches!(err, LibraryError::NotFound(_)));
    }

    #[test]
    fn test_track_from_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("My Song.final.mp3");
        fs::write(&path, b"fake").unwrap();

        let track = track_from_path(&path).unwrap();

        assert_eq!(track.title, "My Song.final");
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert_eq!(track.album, None);
        assert_eq!(track.duration_ms, 0);
        assert!(track.uri.starts_with("file://"));
        assert!(track.uri.ends_with("My%20Song.final.mp3"));
        assert_eq!(track.id.len(), 32);
        assert_eq!(track.id, track_from_path(&path).unwrap().id);
    }
}
