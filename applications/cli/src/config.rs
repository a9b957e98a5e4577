/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempo_playback::PlayerConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TempoConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// JSON file holding saved player preferences
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    #[serde(default = "default_music_dir")]
    pub music_dir: PathBuf,

    #[serde(default = "default_max_tracks")]
    pub max_tracks: usize,
}

impl TempoConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `config.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables, e.g. TEMPO_LIBRARY__MUSIC_DIR
        settings = settings.add_source(
            config::Environment::with_prefix("TEMPO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.library.max_tracks == 0 {
            return Err(CliError::Config(
                "library.max_tracks must be at least 1".to_string(),
            ));
        }

        if self.player.load_timeout_ms == 0 {
            return Err(CliError::Config(
                "player.load_timeout_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            preferences_path: default_preferences_path(),
        }
    }
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            music_dir: default_music_dir(),
            max_tracks: default_max_tracks(),
        }
    }
}

// Default values
fn default_preferences_path() -> PathBuf {
    PathBuf::from("./data/state.json")
}

fn default_music_dir() -> PathBuf {
    PathBuf::from("./music")
}

fn default_max_tracks() -> usize {
    tempo_library::DEFAULT_MAX_TRACKS
}
