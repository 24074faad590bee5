//! The songbook: an ordered, deduplicated collection of songs.
//!
//! Split across submodules the same way the operations are used: `io` builds
//! songbooks from CSV text or a directory listing and writes them back,
//! `sort` orders them, `merge` reconciles two of them.

mod io;
mod merge;
mod sort;

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SongbookError};
use crate::models::{Field, Song};

pub use io::ACCEPTED_SHEET_TYPES;
pub use merge::MergeOptions;

/// Dimension a songbook can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortBy {
    /// Phonetic title first, key second.
    Name,
    /// Key first, phonetic title second.
    Key,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Name => f.write_str("name"),
            SortBy::Key => f.write_str("key"),
        }
    }
}

impl FromStr for SortBy {
    type Err = SongbookError;

    fn from_str(dimension: &str) -> Result<Self> {
        match dimension.trim() {
            "name" => Ok(SortBy::Name),
            "key" => Ok(SortBy::Key),
            other => Err(SongbookError::InvalidSortDimension(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An ordered collection of songs plus the dimension it was last sorted by.
/// Songbooks are built from CSV text, from a sheet-music folder listing, or
/// from songs already in memory. Merging two songbooks yields a third one and
/// leaves both inputs as they were.
pub struct Songbook {
    /// Songs in their current order. Kept private so the order only changes
    /// through [`Songbook::sort`].
    songs: Vec<Song>,
    /// `None` until a sort is applied; loaded catalogs keep their file order.
    sort_by: Option<SortBy>,
    /// Column layout the songbook was built with. Always the full layout
    /// today; merge still refuses songbooks whose layouts differ.
    columns: Vec<Field>,
}

impl Songbook {
    /// Build a songbook from `songs` and immediately order it by `sort_by`.
    pub fn new(songs: Vec<Song>, sort_by: Option<SortBy>) -> Self {
        let mut songbook = Self {
            songs,
            sort_by: None,
            columns: Field::ALL.to_vec(),
        };
        songbook.sort(sort_by);
        songbook
    }

    /// A songbook with no songs and no sort dimension.
    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    /// Songs in their current order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// The dimension most recently applied by [`Songbook::sort`].
    pub fn sort_by(&self) -> Option<SortBy> {
        self.sort_by
    }

    /// Column layout of the songbook, in CSV order.
    pub fn columns(&self) -> &[Field] {
        &self.columns
    }

    /// Number of songs.
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Song titles in current order.
    pub fn names(&self) -> Vec<&str> {
        self.songs.iter().map(|song| song.name.as_str()).collect()
    }

    /// First song titled `name`.
    pub fn get(&self, name: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.name == name)
    }

    /// Whether any song is titled exactly `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of every song whose `field` is empty, in current order. Used to
    /// audit the catalog, e.g. songs nobody has written down a key for.
    pub fn missing(&self, field: Field) -> Vec<String> {
        self.songs
            .iter()
            .filter(|song| song.is_missing(field))
            .map(|song| song.name.clone())
            .collect()
    }

    /// Give up the songbook and keep its songs, in current order.
    pub fn into_songs(self) -> Vec<Song> {
        self.songs
    }
}

impl Default for Songbook {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a Songbook {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}
