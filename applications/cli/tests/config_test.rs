//! Configuration loading tests

use std::fs;
use tempfile::TempDir;
use tempo_cli::{CliError, TempoConfig};

#[test]
fn defaults_are_valid() {
    let config = TempoConfig::default();

    assert_eq!(config.library.max_tracks, 1000);
    assert_eq!(config.player.load_timeout_ms, 10_000);
    assert!(config.storage.preferences_path.ends_with("state.json"));
    config.validate().unwrap();
}

#[test]
fn file_values_override_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tempo.toml");
    fs::write(
        &path,
        r#"
[player]
load_timeout_ms = 2500
shuffle_seed = 11

[library]
music_dir = "/srv/music"
"#,
    )
    .unwrap();

    let config = TempoConfig::load(Some(&path)).unwrap();

    assert_eq!(config.player.load_timeout_ms, 2500);
    assert_eq!(config.player.shuffle_seed, Some(11));
    assert_eq!(config.player.event_capacity, 64);
    assert_eq!(config.library.music_dir.to_str(), Some("/srv/music"));
    assert_eq!(config.library.max_tracks, 1000);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let err = TempoConfig::load(Some("/no/such/tempo.toml".as_ref())).unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}

#[test]
fn zero_track_cap_is_rejected() {
    let mut config = TempoConfig::default();
    config.library.max_tracks = 0;

    assert!(matches!(config.validate(), Err(CliError::Config(_))));
}
