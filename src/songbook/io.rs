//! CSV import/export and the directory-listing constructor. No function here
//! touches the filesystem; callers hand in text, readers, writers, or an
//! already materialized listing.

use std::collections::HashSet;
use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, Writer};

use crate::error::{Result, SongbookError};
use crate::models::{Field, Song, HEADERS};

use super::{SortBy, Songbook};

/// Sheet-music extensions picked up from a directory listing, compared
/// case-insensitively.
pub const ACCEPTED_SHEET_TYPES: [&str; 4] = ["pdf", "jpg", "png", "gif"];

impl Songbook {
    /// Parse CSV text with the `name,key,hymn_reference,sheet_type` header.
    /// Rows keep their file order and the songbook starts unsorted.
    ///
    /// # Errors
    ///
    /// See [`Songbook::from_reader`].
    pub fn load(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    /// Parse CSV from any reader. Empty input yields an empty songbook.
    ///
    /// # Errors
    ///
    /// - [`SongbookError::SchemaMismatch`] when the header is not the fixed
    ///   column layout.
    /// - [`SongbookError::MissingName`] for a row without a name.
    /// - [`SongbookError::ExtraCells`] for a row longer than the header. Short
    ///   rows are accepted and their trailing fields left empty.
    /// - [`SongbookError::Csv`] for malformed CSV.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Self::empty());
        }
        let columns = parse_columns(&headers)?;

        let mut songs = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |position| position.line());
            if record.len() > HEADERS.len() {
                return Err(SongbookError::ExtraCells {
                    line,
                    found: record.len(),
                    expected: HEADERS.len(),
                });
            }
            let song = Song::from_record(&record);
            if song.name.is_empty() {
                return Err(SongbookError::MissingName { line });
            }
            songs.push(song);
        }

        Ok(Self {
            songs,
            sort_by: None,
            columns,
        })
    }

    /// Build a songbook from `(file name, extension)` pairs observed in a
    /// sheet-music folder. Only accepted extensions and non-empty names are
    /// kept; each record carries just its name and the extension as given.
    /// A name seen twice (`song.pdf` next to `song.png`) keeps the first.
    pub fn from_directory_listing<I, N, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, E)>,
        N: AsRef<str>,
        E: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let songs = entries
            .into_iter()
            .filter_map(|(name, extension)| {
                let name = name.as_ref().trim();
                let extension = extension.as_ref().trim();
                if name.is_empty() || !is_accepted_sheet_type(extension) {
                    return None;
                }
                seen.insert(name.to_string())
                    .then(|| Song::from_row(name, "", None, extension))
            })
            .collect();

        Self::new(songs, None)
    }

    /// Sort by `by`, then serialize with the fixed header.
    ///
    /// # Errors
    ///
    /// See [`Songbook::write_to`].
    pub fn export(&mut self, by: Option<SortBy>) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, by)?;
        String::from_utf8(buffer)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err).into())
    }

    /// Sort by `by`, then write the CSV to `writer`.
    ///
    /// # Errors
    ///
    /// [`SongbookError::Csv`] or [`SongbookError::Io`] when writing fails.
    pub fn write_to<W: Write>(&mut self, writer: W, by: Option<SortBy>) -> Result<()> {
        self.sort(by);

        let mut writer = Writer::from_writer(writer);
        writer.write_record(HEADERS)?;
        for song in &self.songs {
            writer.write_record(&song.to_record())?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn is_accepted_sheet_type(extension: &str) -> bool {
    ACCEPTED_SHEET_TYPES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(extension))
}

fn parse_columns(headers: &StringRecord) -> Result<Vec<Field>> {
    let mismatch = || SongbookError::SchemaMismatch {
        expected: HEADERS.join(","),
        found: headers.iter().collect::<Vec<_>>().join(","),
    };

    let columns = headers
        .iter()
        .map(str::parse::<Field>)
        .collect::<Result<Vec<_>>>()
        .map_err(|_| mismatch())?;

    if columns != Field::ALL {
        return Err(mismatch());
    }
    Ok(columns)
}
