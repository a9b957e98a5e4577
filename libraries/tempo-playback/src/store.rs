//! Player store - the playback state machine
//!
//! Owns the playlist, cursor, transport, and preferences, and drives the audio
//! engine and preference store.
//!
//! All mutation happens through `&mut self`, so whoever owns the store is the
//! single queue that serializes user operations and engine callbacks.
//! Engine loads run on spawned tasks and come back as [`EngineEvent`]s; every
//! `play` and every `stop` bump a generation counter, and anything tagged with
//! an older generation is discarded (a stale loaded resource is released on
//! arrival).

use std::sync::Arc;

use rand::rngs::StdRng;
use tempo_core::{
    AudioEngine, AudioHandle, LoadOptions, PlaybackStatus, PreferenceStore, Preferences,
    RepeatMode, StatusCallback, TempoError, Track,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    shuffle::{pick_index, shuffle_rng},
    types::{PlayerConfig, PlayerState, Transport},
    volume::Volume,
};

/// Result of engine work, delivered back onto the store's queue
pub(crate) enum EngineEvent {
    /// A `load` call finished
    Loaded {
        generation: u64,
        track: Arc<Track>,
        /// Volume the resource was opened at
        volume: f32,
        result: tempo_core::Result<Box<dyn AudioHandle>>,
    },

    /// A handle reported status
    Status {
        generation: u64,
        status: PlaybackStatus,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

/// Central playback state machine
///
/// Coordinates:
/// - Playlist and cursor
/// - Transport (idle/loading/playing/paused/stopped)
/// - Position and duration from engine status reports
/// - Volume, repeat, and shuffle, persisted on every change
/// - Auto-advance when a track finishes
pub struct PlayerStore {
    // Collaborators
    engine: Arc<dyn AudioEngine>,
    preference_store: Arc<dyn PreferenceStore>,
    config: PlayerConfig,

    // Playlist
    playlist: Vec<Arc<Track>>,
    current_index: Option<usize>,

    // Transport
    transport: Transport,
    position_ms: u64,
    duration_ms: u64,

    // Preferences
    volume: Volume,
    repeat: RepeatMode,
    shuffled: bool,

    // Engine resource
    sound: Option<Box<dyn AudioHandle>>,
    generation: u64,
    loads_in_flight: usize,
    pause_on_load: bool,
    engine_tx: mpsc::UnboundedSender<EngineEvent>,
    engine_rx: mpsc::UnboundedReceiver<EngineEvent>,

    rng: StdRng,

    // Event queue for screens
    pending_events: Vec<PlayerEvent>,
}

impl PlayerStore {
    /// Create a new player store
    ///
    /// Preferences start at their defaults; call
    /// [`restore_preferences`](Self::restore_preferences) to merge saved values.
    pub fn new(
        engine: Arc<dyn AudioEngine>,
        preference_store: Arc<dyn PreferenceStore>,
        config: PlayerConfig,
    ) -> Self {
        let (engine_tx, engine_rx) = mpsc::unbounded_channel();
        let defaults = Preferences::default();

        Self {
            engine,
            preference_store,
            rng: shuffle_rng(config.shuffle_seed),
            config,
            playlist: Vec::new(),
            current_index: None,
            transport: Transport::Idle,
            position_ms: 0,
            duration_ms: 0,
            volume: Volume::new(defaults.volume),
            repeat: defaults.repeat_mode,
            shuffled: defaults.shuffled,
            sound: None,
            generation: 0,
            loads_in_flight: 0,
            pause_on_load: false,
            engine_tx,
            engine_rx,
            pending_events: Vec::new(),
        }
    }

    // ===== Preferences =====

    /// Merge saved preferences into the current state
    ///
    /// Read failures are logged and the current values are kept.
    pub async fn restore_preferences(&mut self) {
        let stored = match self.preference_store.load().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to load saved preferences: {}", e);
                return;
            }
        };

        let prefs = self.get_preferences().merged(stored);
        if self.volume.set_level(prefs.volume).is_none() {
            warn!("Ignoring saved volume {}", prefs.volume);
        }
        self.repeat = prefs.repeat_mode;
        self.shuffled = prefs.shuffled;

        info!(
            "Restored preferences: volume {:.2}, repeat {}, shuffle {}",
            self.volume.level(),
            self.repeat,
            self.shuffled
        );

        self.pending_events.push(PlayerEvent::VolumeChanged {
            volume: self.volume.level(),
        });
        self.pending_events
            .push(PlayerEvent::RepeatModeChanged { mode: self.repeat });
        self.pending_events.push(PlayerEvent::ShuffleChanged {
            shuffled: self.shuffled,
        });
    }

    /// Current preferences snapshot
    pub fn get_preferences(&self) -> Preferences {
        Preferences {
            volume: self.volume.level(),
            repeat_mode: self.repeat,
            shuffled: self.shuffled,
        }
    }

    async fn persist_preferences(&mut self) {
        let snapshot = self.get_preferences();
        if let Err(e) = self.preference_store.save(&snapshot).await {
            warn!("Failed to save preferences: {}", e);
            self.emit_error(&e);
        }
    }

    // ===== Playlist =====

    /// Replace the playlist and start playing at `start_index`
    ///
    /// An empty `tracks` is a no-op. A `start_index` past the end of a
    /// non-empty playlist is rejected and nothing changes.
    pub async fn load_playlist<I, T>(&mut self, tracks: I, start_index: usize) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Track>>,
    {
        let tracks: Vec<Arc<Track>> = tracks.into_iter().map(Into::into).collect();

        if tracks.is_empty() {
            debug!("Ignoring empty playlist");
            return Ok(());
        }

        if start_index >= tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index: start_index,
                len: tracks.len(),
            });
        }

        self.playlist = tracks;
        self.emit_playlist_changed();
        self.play_index(start_index).await;
        Ok(())
    }

    /// Append a track to the playlist
    pub fn add_to_playlist(&mut self, track: impl Into<Arc<Track>>) {
        self.playlist.push(track.into());
        self.emit_playlist_changed();
    }

    /// Remove every playlist entry with `track_id`
    ///
    /// The cursor follows the current track to its new position. Removing the
    /// current track itself stops playback and clears the cursor.
    pub async fn remove_from_playlist(&mut self, track_id: &str) {
        let current_id = self.get_current_track().map(|t| t.id.clone());
        let before = self.playlist.len();

        self.playlist.retain(|t| t.id != track_id);
        if self.playlist.len() == before {
            return;
        }
        self.emit_playlist_changed();

        match current_id {
            Some(id) if id == track_id => {
                debug!("Removed the current track {}, stopping", id);
                self.cancel_pending_load();
                self.release_sound().await;
                self.current_index = None;
                self.position_ms = 0;
                self.duration_ms = 0;
                self.set_transport(Transport::Stopped);
            }
            Some(id) => {
                self.current_index = self.playlist.iter().position(|t| t.id == id);
            }
            None => {}
        }
    }

    // ===== Playback Control =====

    /// Play a track
    ///
    /// If the track is already in the playlist the cursor moves to it,
    /// otherwise it is appended first.
    pub async fn play(&mut self, track: impl Into<Arc<Track>>) {
        let track = track.into();

        let index = match self.playlist.iter().position(|t| t.id == track.id) {
            Some(index) => index,
            None => {
                self.playlist.push(track);
                self.emit_playlist_changed();
                self.playlist.len() - 1
            }
        };

        self.play_index(index).await;
    }

    /// Pause playback
    ///
    /// While loading, the pause is applied as soon as the load lands.
    pub async fn pause(&mut self) {
        if self.transport == Transport::Loading {
            self.pause_on_load = true;
            return;
        }
        if self.sound.is_none() || self.transport != Transport::Playing {
            return;
        }

        self.set_transport(Transport::Paused);
        let Some(sound) = self.sound.as_mut() else {
            return;
        };
        let result = sound.pause().await;

        if let Err(e) = result {
            warn!("Pause failed: {}", e);
            self.set_transport(Transport::Playing);
            self.emit_error(&e);
        }
    }

    /// Resume playback
    pub async fn resume(&mut self) {
        if self.transport == Transport::Loading {
            self.pause_on_load = false;
            return;
        }
        if self.sound.is_none() || self.transport == Transport::Playing {
            return;
        }

        let previous = self.transport;
        self.set_transport(Transport::Playing);
        let Some(sound) = self.sound.as_mut() else {
            return;
        };
        let result = sound.resume().await;

        if let Err(e) = result {
            warn!("Resume failed: {}", e);
            self.set_transport(previous);
            self.emit_error(&e);
        }
    }

    /// Stop playback and rewind
    ///
    /// While loading, the pending load is cancelled.
    pub async fn stop(&mut self) {
        if self.transport == Transport::Loading {
            self.cancel_pending_load();
            self.position_ms = 0;
            self.set_transport(Transport::Stopped);
            return;
        }

        let Some(sound) = self.sound.as_mut() else {
            return;
        };

        let result = sound.stop().await;

        match result {
            Ok(()) => {
                // Reports queued before the stop belong to the old generation
                self.generation += 1;
                let callback = self.status_callback(self.generation);
                if let Some(sound) = self.sound.as_mut() {
                    sound.on_status(callback);
                }

                self.position_ms = 0;
                self.emit_position();
                self.set_transport(Transport::Stopped);
            }
            Err(e) => {
                warn!("Stop failed: {}", e);
                self.emit_error(&e);
            }
        }
    }

    /// Seek to `position_ms`
    ///
    /// The position updates optimistically; the next status report corrects drift.
    pub async fn seek_to(&mut self, position_ms: u64) {
        if self.sound.is_none() {
            return;
        }

        let previous = self.position_ms;
        self.position_ms = position_ms;
        let Some(sound) = self.sound.as_mut() else {
            return;
        };
        let result = sound.seek(position_ms).await;

        match result {
            Ok(()) => self.emit_position(),
            Err(e) => {
                warn!("Seek to {}ms failed: {}", position_ms, e);
                self.position_ms = previous;
                self.emit_error(&e);
            }
        }
    }

    /// Set volume, clamped to `[0.0, 1.0]`, and persist it
    pub async fn set_volume(&mut self, volume: f32) {
        let previous = self.volume;
        let Some(level) = self.volume.set_level(volume) else {
            warn!("Ignoring invalid volume {}", volume);
            return;
        };

        let result = match self.sound.as_mut() {
            Some(sound) => sound.set_volume(level).await,
            None => Ok(()),
        };
        if let Err(e) = result {
            warn!("Volume change failed: {}", e);
            self.volume = previous;
            self.emit_error(&e);
            return;
        }

        debug!("Volume {:.2} ({:.1} dB)", level, self.volume.to_db());
        self.pending_events
            .push(PlayerEvent::VolumeChanged { volume: level });
        self.persist_preferences().await;
    }

    /// Skip to the next track
    pub async fn next_song(&mut self) {
        self.advance(Direction::Next).await;
    }

    /// Go back to the previous track
    pub async fn previous_song(&mut self) {
        self.advance(Direction::Previous).await;
    }

    /// Cycle repeat mode `None -> One -> All -> None` and persist it
    pub async fn toggle_repeat(&mut self) {
        self.repeat = self.repeat.cycle();
        self.pending_events
            .push(PlayerEvent::RepeatModeChanged { mode: self.repeat });
        self.persist_preferences().await;
    }

    /// Flip shuffle and persist it
    pub async fn toggle_shuffle(&mut self) {
        self.shuffled = !self.shuffled;
        self.pending_events.push(PlayerEvent::ShuffleChanged {
            shuffled: self.shuffled,
        });
        self.persist_preferences().await;
    }

    /// Release the loaded resource and drop any load in flight
    pub async fn shutdown(&mut self) {
        self.cancel_pending_load();
        self.release_sound().await;
        if matches!(self.transport, Transport::Playing | Transport::Paused) {
            self.set_transport(Transport::Stopped);
        }
    }

    // ===== Engine Events =====

    pub(crate) async fn next_engine_event(&mut self) -> Option<EngineEvent> {
        self.engine_rx.recv().await
    }

    /// Handle engine events until no load is in flight and nothing is queued
    pub async fn settle(&mut self) {
        loop {
            let event = if self.loads_in_flight > 0 {
                self.engine_rx.recv().await
            } else {
                self.engine_rx.try_recv().ok()
            };

            match event {
                Some(event) => self.handle_engine_event(event).await,
                None => break,
            }
        }
    }

    pub(crate) async fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Loaded {
                generation,
                track,
                volume,
                result,
            } => {
                self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
                self.handle_loaded(generation, &track, volume, result).await;
            }
            EngineEvent::Status { generation, status } => {
                self.handle_status(generation, status).await;
            }
        }
    }

    async fn handle_loaded(
        &mut self,
        generation: u64,
        track: &Track,
        load_volume: f32,
        result: tempo_core::Result<Box<dyn AudioHandle>>,
    ) {
        if generation != self.generation {
            match result {
                Ok(mut stale) => {
                    debug!(
                        "Releasing superseded load of {} (generation {}, current {})",
                        track.id, generation, self.generation
                    );
                    stale.release().await;
                }
                Err(e) => debug!("Superseded load of {} failed: {}", track.id, e),
            }
            return;
        }

        let mut sound = match result {
            Ok(sound) => sound,
            Err(e) => {
                warn!("Failed to play {}: {}", track.uri, e);
                self.pause_on_load = false;
                self.set_transport(Transport::Idle);
                self.emit_error(&e);
                return;
            }
        };

        // Exactly one resource at a time
        self.release_sound().await;

        sound.on_status(self.status_callback(generation));

        // Volume may have changed while the load was in flight
        let level = self.volume.level();
        if (level - load_volume).abs() > f32::EPSILON {
            if let Err(e) = sound.set_volume(level).await {
                warn!("Applying volume {:.2} after load failed: {}", level, e);
                self.emit_error(&e);
            }
        }

        let transport = if std::mem::take(&mut self.pause_on_load) {
            match sound.pause().await {
                Ok(()) => Transport::Paused,
                Err(e) => {
                    warn!("Deferred pause failed: {}", e);
                    self.emit_error(&e);
                    Transport::Playing
                }
            }
        } else {
            Transport::Playing
        };

        self.sound = Some(sound);
        debug!("Loaded {} (generation {})", track.id, generation);
        self.pending_events.push(PlayerEvent::TrackChanged {
            track_id: track.id.clone(),
            index: self.current_index,
        });
        self.set_transport(transport);
    }

    async fn handle_status(&mut self, generation: u64, status: PlaybackStatus) {
        if generation != self.generation || self.sound.is_none() {
            debug!("Dropping status from generation {}", generation);
            return;
        }
        if !status.is_loaded {
            return;
        }

        self.duration_ms = status.duration_ms;
        self.position_ms = if status.duration_ms > 0 {
            status.position_ms.min(status.duration_ms)
        } else {
            status.position_ms
        };
        self.emit_position();

        if status.ended() && self.transport == Transport::Playing {
            self.handle_track_end().await;
        }
    }

    /// Auto-advance after the current track played to the end
    async fn handle_track_end(&mut self) {
        if let Some(track) = self.get_current_track() {
            let track_id = track.id.clone();
            self.pending_events
                .push(PlayerEvent::TrackFinished { track_id });
        }

        let has_next = self
            .current_index
            .is_some_and(|index| index + 1 < self.playlist.len());

        if self.repeat == RepeatMode::One {
            let Some(sound) = self.sound.as_mut() else {
                return;
            };
            let result = sound.replay().await;

            match result {
                Ok(()) => {
                    self.position_ms = 0;
                    self.emit_position();
                    self.set_transport(Transport::Playing);
                }
                Err(e) => {
                    warn!("Replay failed: {}", e);
                    self.emit_error(&e);
                    self.stop().await;
                }
            }
        } else if self.repeat == RepeatMode::All || has_next {
            if !self.advance(Direction::Next).await {
                self.stop().await;
            }
        } else {
            self.stop().await;
        }
    }

    // ===== Internals =====

    /// Pick the next/previous index and play it
    ///
    /// Returns `false` when nothing was started: empty playlist, or the pick
    /// landed on the current index without repeat-all.
    async fn advance(&mut self, direction: Direction) -> bool {
        let len = self.playlist.len();
        if len == 0 {
            return false;
        }

        let target = if self.shuffled {
            match pick_index(&mut self.rng, len) {
                Some(index) => index,
                None => return false,
            }
        } else {
            match (direction, self.current_index) {
                (Direction::Next, Some(index)) => (index + 1) % len,
                (Direction::Next, None) => 0,
                (Direction::Previous, Some(index)) if index > 0 => index - 1,
                (Direction::Previous, _) => len - 1,
            }
        };

        if Some(target) == self.current_index && self.repeat != RepeatMode::All {
            debug!("{:?} landed on the current track, not restarting", direction);
            return false;
        }

        self.play_index(target).await;
        true
    }

    async fn play_index(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index).cloned() else {
            return;
        };
        self.current_index = Some(index);
        self.start_load(track).await;
    }

    /// Release the current resource and start loading `track`
    async fn start_load(&mut self, track: Arc<Track>) {
        self.generation += 1;
        let generation = self.generation;
        self.pause_on_load = false;

        self.position_ms = 0;
        self.duration_ms = track.duration_ms;
        self.set_transport(Transport::Loading);
        self.release_sound().await;

        let engine = Arc::clone(&self.engine);
        let tx = self.engine_tx.clone();
        let timeout = self.config.load_timeout();
        let volume = self.volume.level();
        let options = LoadOptions {
            volume,
            autoplay: true,
        };

        debug!("Loading {} (generation {})", track.uri, generation);
        self.loads_in_flight += 1;

        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, engine.load(&track.uri, options)).await
            {
                Ok(result) => result,
                Err(_) => Err(TempoError::load(format!(
                    "timed out after {}ms",
                    timeout.as_millis()
                ))),
            };
            let _ = tx.send(EngineEvent::Loaded {
                generation,
                track,
                volume,
                result,
            });
        });
    }

    /// Status callback that tags reports with `generation`
    fn status_callback(&self, generation: u64) -> StatusCallback {
        let tx = self.engine_tx.clone();
        Box::new(move |status| {
            let _ = tx.send(EngineEvent::Status { generation, status });
        })
    }

    /// Invalidate any load in flight
    fn cancel_pending_load(&mut self) {
        self.generation += 1;
        self.pause_on_load = false;
    }

    async fn release_sound(&mut self) {
        if let Some(mut sound) = self.sound.take() {
            sound.release().await;
        }
    }

    fn set_transport(&mut self, transport: Transport) {
        if self.transport != transport {
            self.transport = transport;
            self.pending_events
                .push(PlayerEvent::TransportChanged { transport });
        }
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PlayerEvent::PositionUpdate {
            position_ms: self.position_ms,
            duration_ms: self.duration_ms,
        });
    }

    fn emit_playlist_changed(&mut self) {
        self.pending_events.push(PlayerEvent::PlaylistChanged {
            length: self.playlist.len(),
        });
    }

    fn emit_error(&mut self, error: &TempoError) {
        self.pending_events.push(PlayerEvent::Error {
            message: error.to_string(),
        });
    }

    // ===== State Queries =====

    /// Get transport state
    pub fn get_transport(&self) -> Transport {
        self.transport
    }

    /// Get the track under the cursor
    pub fn get_current_track(&self) -> Option<&Arc<Track>> {
        self.current_index.and_then(|index| self.playlist.get(index))
    }

    /// Get the cursor
    pub fn get_current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Get the playlist
    pub fn get_playlist(&self) -> &[Arc<Track>] {
        &self.playlist
    }

    /// Get position in milliseconds
    pub fn get_position_ms(&self) -> u64 {
        self.position_ms
    }

    /// Get duration in milliseconds (0 until known)
    pub fn get_duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Get volume (0.0 - 1.0)
    pub fn get_volume(&self) -> f32 {
        self.volume.level()
    }

    /// Get repeat mode
    pub fn get_repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Check if shuffle is on
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Get the player configuration
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Check if an engine resource is held
    pub fn has_loaded_resource(&self) -> bool {
        self.sound.is_some()
    }

    /// Snapshot for rendering
    pub fn snapshot(&self) -> PlayerState {
        PlayerState {
            playlist: self.playlist.clone(),
            current_index: self.current_index,
            current_track: self.get_current_track().cloned(),
            transport: self.transport,
            position_ms: self.position_ms,
            duration_ms: self.duration_ms,
            volume: self.volume.level(),
            repeat_mode: self.repeat,
            shuffled: self.shuffled,
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}
