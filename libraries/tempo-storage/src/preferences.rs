//! Player preference persistence
//!
//! Preferences are saved as one JSON object under [`PREFERENCES_KEY`]:
//!
//! ```json
//! {"volume": 0.8, "repeatMode": "all", "isShuffled": true}
//! ```
//!
//! Reading is lenient per field: a missing or malformed field reads back as
//! `None` and the player keeps its current value for it. Unknown fields are
//! ignored.

use async_trait::async_trait;
use serde_json::Value;
use tempo_core::{PreferenceStore, Preferences, RepeatMode, StoredPreferences, TempoError};
use tracing::{debug, warn};

use crate::kv::KeyValueStore;

/// Key the preference blob is stored under
pub const PREFERENCES_KEY: &str = "musicPlayerState";

/// [`PreferenceStore`] on top of any [`KeyValueStore`]
pub struct PreferenceRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PreferenceRepository<S> {
    /// Repository using the default key
    pub fn new(store: S) -> Self {
        Self::with_key(store, PREFERENCES_KEY)
    }

    /// Repository using a custom key
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Underlying key-value store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Forget saved preferences
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written
    pub async fn clear(&self) -> tempo_core::Result<()> {
        self.store.remove_item(&self.key).await?;
        debug!("Cleared saved preferences");
        Ok(())
    }
}

#[async_trait]
impl<S: KeyValueStore> PreferenceStore for PreferenceRepository<S> {
    async fn load(&self) -> tempo_core::Result<StoredPreferences> {
        match self.store.get_item(&self.key).await? {
            Some(text) => parse_stored(&text),
            None => {
                debug!("No saved preferences under {}", self.key);
                Ok(StoredPreferences::default())
            }
        }
    }

    async fn save(&self, preferences: &Preferences) -> tempo_core::Result<()> {
        let text = serde_json::to_string(preferences)?;
        self.store.set_item(&self.key, &text).await?;
        debug!("Saved preferences: {}", text);
        Ok(())
    }
}

/// Parse a saved blob, field by field
///
/// # Errors
///
/// Returns a read error if `text` is not JSON at all
pub fn parse_stored(text: &str) -> tempo_core::Result<StoredPreferences> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| TempoError::read(format!("saved preferences are not JSON: {}", e)))?;

    let Value::Object(fields) = value else {
        warn!("Saved preferences are not an object, ignoring");
        return Ok(StoredPreferences::default());
    };

    #[allow(clippy::cast_possible_truncation)]
    let volume = fields
        .get("volume")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .map(|v| v as f32);

    let repeat_mode = fields
        .get("repeatMode")
        .and_then(Value::as_str)
        .and_then(RepeatMode::parse);

    let shuffled = fields.get("isShuffled").and_then(Value::as_bool);

    Ok(StoredPreferences {
        volume,
        repeat_mode,
        shuffled,
    })
}
