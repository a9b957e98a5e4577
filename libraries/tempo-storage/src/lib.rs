//! Tempo Storage
//!
//! Persistence for player preferences.
//!
//! - [`KeyValueStore`]: async string key-value store
//! - [`JsonFileStore`]: one JSON file on disk, written atomically
//! - [`MemoryStore`]: in-memory, for tests and ephemeral sessions
//! - [`PreferenceRepository`]: the [`PreferenceStore`](tempo_core::PreferenceStore)
//!   the player uses, keeping its blob under [`PREFERENCES_KEY`]
//!
//! # Example
//!
//! ```rust,no_run
//! use tempo_core::{PreferenceStore, Preferences};
//! use tempo_storage::{JsonFileStore, PreferenceRepository};
//!
//! # async fn example() -> tempo_core::Result<()> {
//! let prefs = PreferenceRepository::new(JsonFileStore::new("/tmp/tempo/state.json"));
//! prefs.save(&Preferences::default()).await?;
//! let stored = prefs.load().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod file;
mod kv;
mod preferences;

pub use error::{Result, StorageError};
pub use file::JsonFileStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use preferences::{parse_stored, PreferenceRepository, PREFERENCES_KEY};
