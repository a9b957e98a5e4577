//! Player service
//!
//! Runs a [`PlayerStore`] on its own task. Screens talk to it through a
//! cloneable [`PlayerHandle`]: commands go in over a channel, state snapshots
//! come out on a watch channel and events on a broadcast channel.
//!
//! The task is the single queue: commands and engine callbacks are handled
//! one at a time, in arrival order.

use std::sync::Arc;

use tempo_core::Track;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    store::PlayerStore,
    types::PlayerState,
};

/// Commands sent to the player task
#[derive(Debug)]
pub enum PlayerCommand {
    /// Replace the playlist and start at an index
    LoadPlaylist {
        tracks: Vec<Arc<Track>>,
        start_index: usize,
        reply: oneshot::Sender<Result<()>>,
    },

    /// Play a specific track
    Play(Arc<Track>),

    /// Pause playback
    Pause,

    /// Resume playback
    Resume,

    /// Stop playback
    Stop,

    /// Seek to position (in milliseconds)
    SeekTo(u64),

    /// Set volume (0.0 - 1.0)
    SetVolume(f32),

    /// Skip to next track
    NextSong,

    /// Go to previous track
    PreviousSong,

    /// Cycle repeat mode
    ToggleRepeat,

    /// Flip shuffle
    ToggleShuffle,

    /// Append a track
    AddToPlaylist(Arc<Track>),

    /// Remove a track by id
    RemoveFromPlaylist(String),

    /// Release the engine resource and end the task
    Shutdown,
}

/// Spawns the player task
pub struct PlayerService;

impl PlayerService {
    /// Start `store` on a new task
    ///
    /// Saved preferences are restored before the first command is handled.
    pub fn spawn(store: PlayerStore) -> (PlayerHandle, JoinHandle<()>) {
        let config = store.config().clone();
        let (command_tx, command_rx) = mpsc::channel(config.command_capacity.max(1));
        let (state_tx, state_rx) = watch::channel(store.snapshot());
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));

        let task = tokio::spawn(run(store, command_rx, state_tx, event_tx.clone()));

        let handle = PlayerHandle {
            commands: command_tx,
            state: state_rx,
            events: event_tx,
        };

        (handle, task)
    }
}

async fn run(
    mut store: PlayerStore,
    mut commands: mpsc::Receiver<PlayerCommand>,
    state_tx: watch::Sender<PlayerState>,
    event_tx: broadcast::Sender<PlayerEvent>,
) {
    store.restore_preferences().await;
    publish(&mut store, &state_tx, &event_tx);
    info!("Player service started");

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(PlayerCommand::Shutdown) | None => break,
                Some(command) => apply(&mut store, command).await,
            },
            Some(event) = store.next_engine_event() => {
                store.handle_engine_event(event).await;
            }
        }

        publish(&mut store, &state_tx, &event_tx);
    }

    store.shutdown().await;
    publish(&mut store, &state_tx, &event_tx);
    info!("Player service stopped");
}

async fn apply(store: &mut PlayerStore, command: PlayerCommand) {
    match command {
        PlayerCommand::LoadPlaylist {
            tracks,
            start_index,
            reply,
        } => {
            let result = store.load_playlist(tracks, start_index).await;
            if reply.send(result).is_err() {
                debug!("Load playlist caller went away");
            }
        }
        PlayerCommand::Play(track) => store.play(track).await,
        PlayerCommand::Pause => store.pause().await,
        PlayerCommand::Resume => store.resume().await,
        PlayerCommand::Stop => store.stop().await,
        PlayerCommand::SeekTo(position_ms) => store.seek_to(position_ms).await,
        PlayerCommand::SetVolume(volume) => store.set_volume(volume).await,
        PlayerCommand::NextSong => store.next_song().await,
        PlayerCommand::PreviousSong => store.previous_song().await,
        PlayerCommand::ToggleRepeat => store.toggle_repeat().await,
        PlayerCommand::ToggleShuffle => store.toggle_shuffle().await,
        PlayerCommand::AddToPlaylist(track) => store.add_to_playlist(track),
        PlayerCommand::RemoveFromPlaylist(track_id) => {
            store.remove_from_playlist(&track_id).await;
        }
        PlayerCommand::Shutdown => {}
    }
}

fn publish(
    store: &mut PlayerStore,
    state_tx: &watch::Sender<PlayerState>,
    event_tx: &broadcast::Sender<PlayerEvent>,
) {
    for event in store.drain_events() {
        // No subscribers is fine
        let _ = event_tx.send(event);
    }
    state_tx.send_replace(store.snapshot());
}

/// Cloneable handle to a running player
///
/// Operations are fire-and-forget: they return once the command is queued,
/// and failures show up as [`PlayerEvent::Error`]. Only
/// [`load_playlist`](Self::load_playlist) waits for its result.
#[derive(Clone)]
pub struct PlayerHandle {
    commands: mpsc::Sender<PlayerCommand>,
    state: watch::Receiver<PlayerState>,
    events: broadcast::Sender<PlayerEvent>,
}

impl PlayerHandle {
    async fn send(&self, command: PlayerCommand) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PlaybackError::ServiceStopped)
    }

    /// Replace the playlist and start at `start_index`
    pub async fn load_playlist<I, T>(&self, tracks: I, start_index: usize) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Arc<Track>>,
    {
        let (reply, response) = oneshot::channel();
        self.send(PlayerCommand::LoadPlaylist {
            tracks: tracks.into_iter().map(Into::into).collect(),
            start_index,
            reply,
        })
        .await?;

        response.await.map_err(|_| PlaybackError::ServiceStopped)?
    }

    pub async fn play(&self, track: impl Into<Arc<Track>>) -> Result<()> {
        self.send(PlayerCommand::Play(track.into())).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.send(PlayerCommand::Pause).await
    }

    pub async fn resume(&self) -> Result<()> {
        self.send(PlayerCommand::Resume).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.send(PlayerCommand::Stop).await
    }

    pub async fn seek_to(&self, position_ms: u64) -> Result<()> {
        self.send(PlayerCommand::SeekTo(position_ms)).await
    }

    pub async fn set_volume(&self, volume: f32) -> Result<()> {
        self.send(PlayerCommand::SetVolume(volume)).await
    }

    pub async fn next_song(&self) -> Result<()> {
        self.send(PlayerCommand::NextSong).await
    }

    pub async fn previous_song(&self) -> Result<()> {
        self.send(PlayerCommand::PreviousSong).await
    }

    pub async fn toggle_repeat(&self) -> Result<()> {
        self.send(PlayerCommand::ToggleRepeat).await
    }

    pub async fn toggle_shuffle(&self) -> Result<()> {
        self.send(PlayerCommand::ToggleShuffle).await
    }

    pub async fn add_to_playlist(&self, track: impl Into<Arc<Track>>) -> Result<()> {
        self.send(PlayerCommand::AddToPlaylist(track.into())).await
    }

    pub async fn remove_from_playlist(&self, track_id: impl Into<String>) -> Result<()> {
        self.send(PlayerCommand::RemoveFromPlaylist(track_id.into()))
            .await
    }

    /// Ask the player task to release its resource and exit
    pub async fn shutdown(&self) -> Result<()> {
        self.send(PlayerCommand::Shutdown).await
    }

    /// Latest published state
    pub fn state(&self) -> PlayerState {
        self.state.borrow().clone()
    }

    /// Watch state snapshots
    pub fn watch_state(&self) -> watch::Receiver<PlayerState> {
        self.state.clone()
    }

    /// Subscribe to player events
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }
}
