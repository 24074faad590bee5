use std::collections::HashMap;

use crate::error::{Result, SongbookError};
use crate::models::{Field, Song};

use super::Songbook;

/// How rows present in both songbooks are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// When false, the receiving songbook's rows win unconditionally.
    pub update: bool,
    /// When true, empty incoming fields never erase existing values. When
    /// false, a matching incoming row replaces the existing one wholesale.
    pub ignore_empty: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            update: true,
            ignore_empty: true,
        }
    }
}

impl MergeOptions {
    /// Keep existing rows untouched, only add new names.
    pub fn append_only() -> Self {
        Self {
            update: false,
            ignore_empty: true,
        }
    }

    /// Incoming rows replace existing rows with the same name.
    pub fn overwrite() -> Self {
        Self {
            update: true,
            ignore_empty: false,
        }
    }

    fn reconcile(self, existing: &mut Song, incoming: &Song) {
        match (self.update, self.ignore_empty) {
            (false, _) => {}
            (true, true) => existing.fill_from(incoming),
            (true, false) => existing.clone_from(incoming),
        }
    }
}

impl Songbook {
    /// Reconcile `self`, the authoritative catalog, with `other`, usually
    /// freshly observed data such as the sheet-music folder.
    ///
    /// Rows are matched by name. Matching rows are reconciled according to
    /// `options`, new names are appended in `other`'s order, and the result
    /// is ordered by `self`'s sort dimension. Neither operand is modified.
    ///
    /// The result never holds two rows with the same name: repeated names
    /// inside `self` fold into their first occurrence (exact duplicates simply
    /// disappear), and repeated names inside `other` reconcile against the row
    /// already taken for that name.
    ///
    /// # Errors
    ///
    /// [`SongbookError::SchemaMismatch`] when the two songbooks were built
    /// with different column layouts.
    pub fn merge(&self, other: &Songbook, options: MergeOptions) -> Result<Songbook> {
        if self.columns != other.columns {
            return Err(SongbookError::SchemaMismatch {
                expected: join_columns(&self.columns),
                found: join_columns(&other.columns),
            });
        }

        let mut songs: Vec<Song> = Vec::with_capacity(self.songs.len() + other.songs.len());
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for song in &self.songs {
            match positions.get(song.name.as_str()) {
                Some(&index) => songs[index].fill_from(song),
                None => {
                    positions.insert(&song.name, songs.len());
                    songs.push(song.clone());
                }
            }
        }

        for song in &other.songs {
            match positions.get(song.name.as_str()) {
                Some(&index) => options.reconcile(&mut songs[index], song),
                None => {
                    positions.insert(&song.name, songs.len());
                    songs.push(song.clone());
                }
            }
        }

        let mut merged = Songbook {
            songs,
            sort_by: None,
            columns: self.columns.clone(),
        };
        merged.sort(self.sort_by);
        Ok(merged)
    }

    /// [`Songbook::merge`] with the default options: update matching rows,
    /// never erase known values.
    ///
    /// # Errors
    ///
    /// Same as [`Songbook::merge`].
    pub fn merge_default(&self, other: &Songbook) -> Result<Songbook> {
        self.merge(other, MergeOptions::default())
    }
}

fn join_columns(columns: &[Field]) -> String {
    columns
        .iter()
        .map(|field| field.header())
        .collect::<Vec<_>>()
        .join(",")
}
