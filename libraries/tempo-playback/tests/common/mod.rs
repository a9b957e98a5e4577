//! Shared fixtures for player tests
//!
//! `MockEngine` hands out handles that record every command and can be made
//! to fail or to load slowly. Tests push status reports through the handle's
//! registered callback, the same path a real engine uses.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tempo_core::{
    AudioEngine, AudioHandle, LoadOptions, PlaybackStatus, PreferenceStore, Preferences,
    StatusCallback, StoredPreferences, TempoError, Track,
};
use tempo_playback::{PlayerConfig, PlayerStore};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

// ===== Audio Engine =====

#[derive(Default)]
pub struct EngineState {
    /// URIs in the order `load` was called
    pub loads: Vec<String>,
    /// Options passed to each `load`
    pub load_options: Vec<LoadOptions>,
    /// Handle ids that were created and not yet released
    pub live: Vec<u64>,
    pub released: Vec<u64>,
    /// `(handle id, command)` in call order
    pub commands: Vec<(u64, String)>,
    pub uris: HashMap<u64, String>,
    pub callbacks: HashMap<u64, StatusCallback>,
    pub fail_uris: HashSet<String>,
    pub fail_commands: HashSet<String>,
    pub delays: HashMap<String, Duration>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct MockEngine {
    state: Arc<Mutex<EngineState>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_load(&self, uri: &str) {
        self.state.lock().unwrap().fail_uris.insert(uri.to_string());
    }

    pub fn fail_command(&self, command: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_commands
            .insert(command.to_string());
    }

    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_uris.clear();
        state.fail_commands.clear();
    }

    pub fn delay_load(&self, uri: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .delays
            .insert(uri.to_string(), delay);
    }

    pub fn loads(&self) -> Vec<String> {
        self.state.lock().unwrap().loads.clone()
    }

    pub fn load_options(&self) -> Vec<LoadOptions> {
        self.state.lock().unwrap().load_options.clone()
    }

    pub fn live_count(&self) -> usize {
        self.state.lock().unwrap().live.len()
    }

    /// URIs of handles that are still held
    pub fn live_uris(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .live
            .iter()
            .filter_map(|id| state.uris.get(id).cloned())
            .collect()
    }

    pub fn released_count(&self) -> usize {
        self.state.lock().unwrap().released.len()
    }

    /// Commands sent to any handle, without the handle id
    pub fn commands(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .commands
            .iter()
            .map(|(_, command)| command.clone())
            .collect()
    }

    /// Deliver a status report through the newest live handle
    pub fn emit_status(&self, status: PlaybackStatus) {
        let state = self.state.lock().unwrap();
        let Some(id) = state.live.last() else {
            panic!("no live handle to report status for");
        };
        let callback = state
            .callbacks
            .get(id)
            .expect("live handle has no status callback");
        callback(status);
    }

    /// Report that the newest live handle played to the end
    pub fn finish_current(&self) {
        self.emit_status(PlaybackStatus::finished(180_000));
    }
}

#[async_trait]
impl AudioEngine for MockEngine {
    async fn load(
        &self,
        uri: &str,
        options: LoadOptions,
    ) -> tempo_core::Result<Box<dyn AudioHandle>> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.loads.push(uri.to_string());
            state.load_options.push(options);
            state.delays.get(uri).copied()
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        if state.fail_uris.contains(uri) {
            return Err(TempoError::load(format!("cannot open {}", uri)));
        }

        state.next_id += 1;
        let id = state.next_id;
        state.live.push(id);
        state.uris.insert(id, uri.to_string());

        Ok(Box::new(MockHandle {
            id,
            state: Arc::clone(&self.state),
        }))
    }
}

pub struct MockHandle {
    id: u64,
    state: Arc<Mutex<EngineState>>,
}

impl MockHandle {
    fn record(&self, command: &str) -> tempo_core::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.commands.push((self.id, command.to_string()));
        if state.fail_commands.contains(command) {
            return Err(TempoError::command(format!("{} rejected", command)));
        }
        Ok(())
    }
}

#[async_trait]
impl AudioHandle for MockHandle {
    async fn pause(&mut self) -> tempo_core::Result<()> {
        self.record("pause")
    }

    async fn resume(&mut self) -> tempo_core::Result<()> {
        self.record("resume")
    }

    async fn stop(&mut self) -> tempo_core::Result<()> {
        self.record("stop")
    }

    async fn seek(&mut self, _position_ms: u64) -> tempo_core::Result<()> {
        self.record("seek")
    }

    async fn set_volume(&mut self, _volume: f32) -> tempo_core::Result<()> {
        self.record("set_volume")
    }

    fn on_status(&mut self, callback: StatusCallback) {
        self.state.lock().unwrap().callbacks.insert(self.id, callback);
    }

    async fn release(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.live.retain(|id| *id != self.id);
        state.callbacks.remove(&self.id);
        state.released.push(self.id);
    }
}

// ===== Preferences =====

/// Preference store that keeps the last saved value in memory
#[derive(Clone, Default)]
pub struct MemoryPreferences {
    saved: Arc<Mutex<Option<Preferences>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saved(preferences: Preferences) -> Self {
        let store = Self::default();
        *store.saved.lock().unwrap() = Some(preferences);
        store
    }

    pub fn saved(&self) -> Option<Preferences> {
        self.saved.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferences {
    async fn load(&self) -> tempo_core::Result<StoredPreferences> {
        Ok(self
            .saved
            .lock()
            .unwrap()
            .clone()
            .map(StoredPreferences::from)
            .unwrap_or_default())
    }

    async fn save(&self, preferences: &Preferences) -> tempo_core::Result<()> {
        *self.saved.lock().unwrap() = Some(preferences.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

// ===== Fixtures =====

pub fn track(id: &str) -> Track {
    Track::new(id, id.to_uppercase(), uri(id)).with_duration_ms(180_000)
}

pub fn uri(id: &str) -> String {
    format!("file:///music/{}.mp3", id)
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn config() -> PlayerConfig {
    PlayerConfig {
        shuffle_seed: Some(7),
        ..PlayerConfig::default()
    }
}

pub fn player(engine: &MockEngine, preferences: &MemoryPreferences) -> PlayerStore {
    init_tracing();
    PlayerStore::new(
        Arc::new(engine.clone()),
        Arc::new(preferences.clone()),
        config(),
    )
}

/// Store with the playlist loaded and the start track audible
pub async fn playing(
    engine: &MockEngine,
    preferences: &MemoryPreferences,
    ids: &[&str],
    start_index: usize,
) -> PlayerStore {
    let mut store = player(engine, preferences);
    store
        .load_playlist(tracks(ids), start_index)
        .await
        .expect("load playlist");
    store.settle().await;
    store
}
