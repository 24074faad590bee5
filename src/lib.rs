//! Core library for the choir songbook tool.
//!
//! The songbook core (`theory`, `phonetic`, `models`, `songbook`) is pure and
//! never touches the disk. `sync` wraps it with the filesystem work the
//! `bin` target needs, and `config`, `logger` and `cli` make up the thin
//! command-line shell around it.
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod phonetic;
pub mod songbook;
pub mod sync;
pub mod theory;

pub use error::SongbookError;

/// The domain types other layers manipulate.
pub use models::{Field, HymnReference, Song};
pub use songbook::{MergeOptions, SortBy, Songbook};

/// Driver entry points used by `main.rs`.
pub use sync::{missing_songs, sync_songbook, SyncReport};
