mod preferences;
mod status;
mod track;

pub use preferences::{Preferences, RepeatMode, StoredPreferences};
pub use status::{LoadOptions, PlaybackStatus};
pub use track::{Track, TrackId, UNKNOWN_ARTIST};
