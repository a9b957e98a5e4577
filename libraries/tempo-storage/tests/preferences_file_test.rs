//! Preference persistence against a real file

use std::sync::Arc;
use tempfile::TempDir;
use tempo_core::{PreferenceStore, Preferences, RepeatMode, StoredPreferences};
use tempo_storage::{JsonFileStore, KeyValueStore, PreferenceRepository, PREFERENCES_KEY};

fn repository(dir: &TempDir) -> PreferenceRepository<JsonFileStore> {
    PreferenceRepository::new(JsonFileStore::new(dir.path().join("tempo").join("state.json")))
}

#[tokio::test]
async fn preferences_survive_restart() {
    let dir = TempDir::new().unwrap();
    let saved = Preferences {
        volume: 0.3,
        repeat_mode: RepeatMode::One,
        shuffled: true,
    };

    repository(&dir).save(&saved).await.unwrap();

    let restored = repository(&dir).load().await.unwrap();
    assert_eq!(restored, StoredPreferences::from(saved));
    assert_eq!(Preferences::default().merged(restored), saved);
}

#[tokio::test]
async fn other_keys_in_file_are_preserved() {
    let dir = TempDir::new().unwrap();
    let repo = repository(&dir);

    repo.store().set_item("theme", "dark").await.unwrap();
    repo.save(&Preferences::default()).await.unwrap();
    repo.clear().await.unwrap();

    assert_eq!(
        repo.store().get_item("theme").await.unwrap().as_deref(),
        Some("dark")
    );
    assert_eq!(repo.store().get_item(PREFERENCES_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn blob_written_by_other_clients_is_read_leniently() {
    let dir = TempDir::new().unwrap();
    let repo = repository(&dir);

    repo.store()
        .set_item(PREFERENCES_KEY, r#"{"volume":0,"repeatMode":"bogus"}"#)
        .await
        .unwrap();

    let stored = repo.load().await.unwrap();
    assert_eq!(stored.volume, Some(0.0));
    assert_eq!(stored.repeat_mode, None);
    assert_eq!(stored.shuffled, None);
}

#[tokio::test]
async fn concurrent_saves_leave_valid_file() {
    let dir = TempDir::new().unwrap();
    let repo = Arc::new(repository(&dir));

    let mut tasks = Vec::new();
    for i in 0..10u8 {
        let repo = Arc::clone(&repo);
        tasks.push(tokio::spawn(async move {
            let prefs = Preferences {
                volume: f32::from(i) / 10.0,
                ..Preferences::default()
            };
            repo.save(&prefs).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let stored = repo.load().await.unwrap();
    let volume = stored.volume.unwrap();
    assert!((0.0..=0.9).contains(&volume));
}
