/// Collaborator traits for Tempo
///
/// The playback core never talks to a device directly. Platform code provides
/// an audio engine, a preference store, and a media scanner through these traits.
use crate::error::Result;
use crate::types::{LoadOptions, PlaybackStatus, Preferences, StoredPreferences, Track};
use async_trait::async_trait;

/// Callback invoked by an [`AudioHandle`] whenever it reports status
///
/// Engines call it at their own cadence: at least on start, on completion,
/// and at a throttled interval while playing.
pub type StatusCallback = Box<dyn Fn(PlaybackStatus) + Send + Sync>;

/// Audio engine trait
///
/// Implementers open a locator and hand back a handle to one decoded,
/// playable resource.
#[async_trait]
pub trait AudioEngine: Send + Sync {
    /// Load the resource at `uri`, starting playback when `options.autoplay` is set
    ///
    /// # Errors
    /// Returns `TempoError::Load` if the resource cannot be opened or decoded
    async fn load(&self, uri: &str, options: LoadOptions) -> Result<Box<dyn AudioHandle>>;
}

/// Handle to a single loaded audio resource
///
/// Every command fails with `TempoError::Command` once the resource is gone.
#[async_trait]
pub trait AudioHandle: Send + Sync {
    /// Pause playback
    async fn pause(&mut self) -> Result<()>;

    /// Resume (or start) playback
    async fn resume(&mut self) -> Result<()>;

    /// Halt playback and rewind
    async fn stop(&mut self) -> Result<()>;

    /// Seek to `position_ms`
    async fn seek(&mut self, position_ms: u64) -> Result<()>;

    /// Set output volume (0.0 - 1.0)
    async fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Restart from the beginning and play
    async fn replay(&mut self) -> Result<()> {
        self.seek(0).await?;
        self.resume().await
    }

    /// Register the status callback, replacing any previous one
    fn on_status(&mut self, callback: StatusCallback);

    /// Release the underlying resource
    ///
    /// Must be idempotent: releasing twice is not an error.
    async fn release(&mut self);
}

/// Preference store trait
///
/// Loads and saves the durable subset of playback state.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Load the stored preferences
    ///
    /// Returns `StoredPreferences::default()` when nothing has been saved yet.
    ///
    /// # Errors
    /// Returns `TempoError::Read` if the backing store cannot be read
    async fn load(&self) -> Result<StoredPreferences>;

    /// Save a full preferences snapshot
    ///
    /// # Errors
    /// Returns `TempoError::Write` if the backing store cannot be written
    async fn save(&self, preferences: &Preferences) -> Result<()>;
}

/// Media scanner trait
///
/// Screens call this directly and feed the result into the player.
#[async_trait]
pub trait MediaScanner: Send + Sync {
    /// Ask for access to the media library
    async fn request_permission(&self) -> bool;

    /// List every playable track
    ///
    /// # Errors
    /// Returns `TempoError::PermissionDenied` or `TempoError::Scan`
    async fn list_tracks(&self) -> Result<Vec<Track>>;
}
