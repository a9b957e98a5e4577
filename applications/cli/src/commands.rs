//! Command implementations
//!
//! Each command writes its output to the given writer so it can be captured.

use std::io::Write;
use std::path::PathBuf;

use tempo_core::{MediaScanner, PreferenceStore, Preferences, RepeatMode, Track};
use tempo_library::DirectoryScanner;
use tempo_playback::Volume;
use tempo_storage::{JsonFileStore, PreferenceRepository};
use tracing::info;

use crate::config::TempoConfig;
use crate::error::{CliError, Result};

/// Changes requested by `prefs set`
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceChanges {
    pub volume: Option<f32>,
    pub repeat_mode: Option<RepeatMode>,
    pub shuffled: Option<bool>,
}

fn scanner(config: &TempoConfig, dir: Option<PathBuf>) -> DirectoryScanner {
    DirectoryScanner::new(dir.unwrap_or_else(|| config.library.music_dir.clone()))
        .max_tracks(config.library.max_tracks)
}

fn preferences(config: &TempoConfig) -> PreferenceRepository<JsonFileStore> {
    PreferenceRepository::new(JsonFileStore::new(&config.storage.preferences_path))
}

async fn scan_library(scanner: &DirectoryScanner) -> Result<Vec<Track>> {
    if !scanner.request_permission().await {
        return Err(CliError::PermissionDenied(
            scanner.root().display().to_string(),
        ));
    }
    Ok(scanner.list_tracks().await?)
}

fn write_tracks(out: &mut impl Write, tracks: &[Track]) -> Result<()> {
    for track in tracks {
        writeln!(out, "{}\t{}\t{}", track.title, track.artist, track.uri)?;
    }
    Ok(())
}

/// List every track in the music directory
pub async fn scan(config: &TempoConfig, dir: Option<PathBuf>, out: &mut impl Write) -> Result<()> {
    let scanner = scanner(config, dir);
    let tracks = scan_library(&scanner).await?;

    write_tracks(out, &tracks)?;
    info!("Scanned {} tracks", tracks.len());
    Ok(())
}

/// List tracks matching `query`
pub async fn search(
    config: &TempoConfig,
    dir: Option<PathBuf>,
    query: &str,
    out: &mut impl Write,
) -> Result<()> {
    let scanner = scanner(config, dir);
    let tracks = scan_library(&scanner).await?;
    let matches: Vec<Track> = tempo_library::search(&tracks, query).cloned().collect();

    write_tracks(out, &matches)?;
    info!("{} of {} tracks match {:?}", matches.len(), tracks.len(), query);
    Ok(())
}

/// List unique artists
pub async fn artists(config: &TempoConfig, dir: Option<PathBuf>, out: &mut impl Write) -> Result<()> {
    let scanner = scanner(config, dir);
    let tracks = scan_library(&scanner).await?;

    for artist in tempo_library::artists(&tracks) {
        writeln!(out, "{}", artist)?;
    }
    Ok(())
}

/// Saved preferences merged over the defaults
pub async fn load_preferences(config: &TempoConfig) -> Result<Preferences> {
    let stored = preferences(config).load().await?;
    Ok(Preferences::default().merged(stored))
}

/// Print saved preferences
pub async fn prefs_show(config: &TempoConfig, out: &mut impl Write) -> Result<()> {
    let prefs = load_preferences(config).await?;
    writeln!(out, "{}", serde_json::to_string_pretty(&prefs)?)?;
    Ok(())
}

/// Change saved preferences
///
/// Volume is clamped to `[0.0, 1.0]` the same way the player clamps it.
pub async fn prefs_set(
    config: &TempoConfig,
    changes: PreferenceChanges,
    out: &mut impl Write,
) -> Result<()> {
    let mut prefs = load_preferences(config).await?;

    if let Some(volume) = changes.volume {
        let mut level = Volume::new(prefs.volume);
        if level.set_level(volume).is_none() {
            return Err(CliError::Config(format!("invalid volume {}", volume)));
        }
        prefs.volume = level.level();
    }
    if let Some(mode) = changes.repeat_mode {
        prefs.repeat_mode = mode;
    }
    if let Some(shuffled) = changes.shuffled {
        prefs.shuffled = shuffled;
    }

    preferences(config).save(&prefs).await?;
    writeln!(out, "{}", serde_json::to_string_pretty(&prefs)?)?;
    Ok(())
}

/// Forget saved preferences
pub async fn prefs_reset(config: &TempoConfig, out: &mut impl Write) -> Result<()> {
    preferences(config).clear().await?;
    writeln!(out, "Preferences reset")?;
    Ok(())
}

/// Print the effective configuration
pub fn show_config(config: &TempoConfig, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
    Ok(())
}
