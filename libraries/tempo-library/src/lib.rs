//! Tempo Library
//!
//! Builds the device music library from a directory of audio files.
//!
//! - [`DirectoryScanner`] walks a music directory and implements
//!   [`MediaScanner`](tempo_core::MediaScanner)
//! - [`search`] and [`artists`] query a scanned track list
//!
//! # Example
//!
//! ```rust,no_run
//! use tempo_core::MediaScanner;
//! use tempo_library::DirectoryScanner;
//!
//! # async fn example() -> tempo_core::Result<()> {
//! let scanner = DirectoryScanner::new("/home/me/Music").max_tracks(500);
//!
//! if scanner.request_permission().await {
//!     let tracks = scanner.list_tracks().await?;
//!     println!("{} tracks", tracks.len());
//! }
//! # Ok(())
//! # }
//! ```

mod catalog;
mod error;
mod scanner;

pub use catalog::{artists, search};
pub use error::{LibraryError, Result};
pub use scanner::{
    is_audio_file, track_from_path, DirectoryScanner, DEFAULT_MAX_TRACKS, SUPPORTED_EXTENSIONS,
};
