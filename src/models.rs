//! Domain models for one catalog row. The types stay light-weight data
//! holders; sorting and reconciliation live in the songbook module. Rows only
//! become untyped at the CSV boundary (`from_record` / `to_record`).

use std::fmt;
use std::str::FromStr;

use csv::StringRecord;

use crate::error::{Result, SongbookError};
use crate::phonetic::phonetic_tokens;
use crate::theory;

/// Column order used for every CSV import and export.
pub const HEADERS: [&str; 4] = ["name", "key", "hymn_reference", "sheet_type"];

/// Reference into an external hymnal. Mostly a number, but the catalog also
/// holds placeholders such as `--`, so non-numeric text is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HymnReference {
    /// Hymn number, written without padding or leading zeros.
    Number(i64),
    /// Anything else found in the cell, e.g. `--` or `007`.
    Text(String),
}

impl HymnReference {
    /// Parse a CSV cell. Blank cells have no reference. Only cells that print
    /// back identically (ignoring padding) become numbers, so `007` stays
    /// text. Text is kept verbatim.
    pub fn parse(cell: &str) -> Option<Self> {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<i64>() {
            Ok(number) if number.to_string() == trimmed => Some(Self::Number(number)),
            _ => Some(Self::Text(cell.to_string())),
        }
    }
}

impl fmt::Display for HymnReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for HymnReference {
    fn from(number: i64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for HymnReference {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// One column of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Key,
    HymnReference,
    SheetType,
}

impl Field {
    /// Every column, in CSV order.
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Key,
        Field::HymnReference,
        Field::SheetType,
    ];

    /// Header name as written in the CSV.
    pub fn header(self) -> &'static str {
        match self {
            Field::Name => HEADERS[0],
            Field::Key => HEADERS[1],
            Field::HymnReference => HEADERS[2],
            Field::SheetType => HEADERS[3],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Field {
    type Err = SongbookError;

    /// `hymn_ref` is accepted as an alias because older catalogs used it.
    fn from_str(column: &str) -> Result<Self> {
        match column.trim() {
            "name" => Ok(Field::Name),
            "key" => Ok(Field::Key),
            "hymn_reference" | "hymn_ref" => Ok(Field::HymnReference),
            "sheet_type" => Ok(Field::SheetType),
            other => Err(SongbookError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A catalog entry. `key` keeps the spelling found in the source so exports
/// round-trip; use [`Song::normalized_key`] for the canonical form.
pub struct Song {
    /// Title, possibly mixing Chinese and Latin script.
    pub name: String,
    /// Raw key spelling, e.g. `A#` or `F#m`.
    pub key: Option<String>,
    /// Where the song sits in the printed hymnal, if it is in there at all.
    pub hymn_reference: Option<HymnReference>,
    /// Extension of the sheet-music file (`PDF`, `PNG`, ...).
    pub sheet_type: Option<String>,
}

impl Song {
    /// Build a song from loose values. Surrounding whitespace is stripped from
    /// the text fields, so a song holds exactly what its CSV row reads back as.
    /// Empty strings count as absent. The key is not validated here; invalid
    /// spellings surface when read.
    pub fn from_row(
        name: impl Into<String>,
        key: impl Into<String>,
        hymn_reference: Option<HymnReference>,
        sheet_type: impl Into<String>,
    ) -> Self {
        Self {
            name: trimmed(name.into()),
            key: non_empty(trimmed(key.into())),
            hymn_reference,
            sheet_type: non_empty(trimmed(sheet_type.into())),
        }
    }

    /// A song known only by its name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::from_row(name, "", None, "")
    }

    /// Read a CSV row laid out as [`HEADERS`]. Missing trailing cells are
    /// treated as empty; callers reject rows with extra cells.
    pub fn from_record(record: &StringRecord) -> Self {
        let cell = |index: usize| record.get(index).unwrap_or("");
        Self::from_row(
            cell(0),
            cell(1),
            HymnReference::parse(cell(2)),
            cell(3),
        )
    }

    /// Write the song as a CSV row laid out as [`HEADERS`].
    pub fn to_record(&self) -> StringRecord {
        Field::ALL
            .iter()
            .map(|field| self.get(*field).unwrap_or_default())
            .collect()
    }

    /// Canonical key spelling, or `None` when the song has no key.
    ///
    /// # Errors
    ///
    /// Returns [`SongbookError::InvalidKey`] when the stored spelling cannot
    /// be normalized.
    pub fn normalized_key(&self) -> Result<Option<String>> {
        self.key.as_deref().map(theory::normalize).transpose()
    }

    /// Title-cased phonetic tokens of the name.
    pub fn phonetic_title(&self) -> Vec<String> {
        phonetic_tokens(&self.name)
    }

    /// Position of the song's key in the 12-key cycle, `-1` when unknown.
    pub fn key_order(&self) -> i32 {
        theory::sort_order(self.key.as_deref())
    }

    /// Text value of a column, `None` when empty.
    pub fn get(&self, field: Field) -> Option<String> {
        match field {
            Field::Name => non_empty(self.name.clone()),
            Field::Key => self.key.clone(),
            Field::HymnReference => self.hymn_reference.as_ref().map(ToString::to_string),
            Field::SheetType => self.sheet_type.clone(),
        }
    }

    pub fn is_missing(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name.is_empty(),
            Field::Key => self.key.is_none(),
            Field::HymnReference => self.hymn_reference.is_none(),
            Field::SheetType => self.sheet_type.is_none(),
        }
    }

    /// Copy every non-empty field of `other` onto `self`, leaving fields that
    /// `other` lacks untouched.
    pub fn fill_from(&mut self, other: &Song) {
        if !other.name.is_empty() {
            self.name.clone_from(&other.name);
        }
        if other.key.is_some() {
            self.key.clone_from(&other.key);
        }
        if other.hymn_reference.is_some() {
            self.hymn_reference.clone_from(&other.hymn_reference);
        }
        if other.sheet_type.is_some() {
            self.sheet_type.clone_from(&other.sheet_type);
        }
    }
}

impl fmt::Display for Song {
    /// `Name (Key)`, or just the name when the key is unknown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{} ({key})", self.name),
            None => f.write_str(&self.name),
        }
    }
}

fn trimmed(value: String) -> String {
    if value.trim().len() == value.len() {
        value
    } else {
        value.trim().to_string()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn normalizes_key_on_read() {
        let song = Song::from_row("歌曲", "A#", None, "");
        assert_eq!(song.key.as_deref(), Some("A#"));
        assert_eq!(song.normalized_key().unwrap().as_deref(), Some("Bb"));
    }

    #[test]
    fn construction_never_validates_the_key() {
        let song = Song::from_row("歌曲", "Q", None, "");
        assert!(matches!(
            song.normalized_key(),
            Err(SongbookError::InvalidKey(key)) if key == "Q"
        ));
        assert_eq!(song.key_order(), -1);
    }

    #[test]
    fn songs_without_key_have_no_normalized_key() {
        assert_eq!(Song::named("歌曲").normalized_key().unwrap(), None);
    }

    #[test]
    fn phonetic_title_mixes_scripts() {
        let song = Song::named("歌曲 some songs");
        assert_eq!(song.phonetic_title(), vec!["Ge", "Qu", "Some", "Songs"]);
    }

    #[test]
    fn from_row_strips_padding_from_text_fields() {
        let song = Song::from_row(" Lead ", " Bb", None, "PDF  ");
        assert_eq!(song.name, "Lead");
        assert_eq!(song.key.as_deref(), Some("Bb"));
        assert_eq!(song.sheet_type.as_deref(), Some("PDF"));
        assert_eq!(Song::from_row("歌曲", "   ", None, "").key, None);
    }

    #[rstest]
    #[case("3", Some(HymnReference::from(3_i64)))]
    #[case(" 3 ", Some(HymnReference::from(3_i64)))]
    #[case("--", Some(HymnReference::from("--")))]
    #[case("007", Some(HymnReference::from("007")))]
    #[case("", None)]
    #[case("  ", None)]
    fn parses_hymn_references(#[case] cell: &str, #[case] expected: Option<HymnReference>) {
        assert_eq!(HymnReference::parse(cell), expected);
    }

    #[test]
    fn records_round_trip() {
        let song = Song::from_row("歌曲 A", "Bb", Some(HymnReference::Number(3)), "PDF");
        let record = song.to_record();
        assert_eq!(record, StringRecord::from(vec!["歌曲 A", "Bb", "3", "PDF"]));
        assert_eq!(Song::from_record(&record), song);
    }

    #[test]
    fn short_records_leave_trailing_fields_empty() {
        let record = StringRecord::from(vec!["歌曲", "C"]);
        assert_eq!(Song::from_record(&record), Song::from_row("歌曲", "C", None, ""));
    }

    #[test]
    fn fill_from_keeps_fields_the_other_song_lacks() {
        let mut song = Song::from_row("歌曲", "C", Some(HymnReference::Number(10)), "");
        song.fill_from(&Song::from_row("歌曲", "", None, "PDF"));
        assert_eq!(song, Song::from_row("歌曲", "C", Some(HymnReference::Number(10)), "PDF"));
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("sheet_type".parse::<Field>().unwrap(), Field::SheetType);
        assert_eq!("hymn_ref".parse::<Field>().unwrap(), Field::HymnReference);
        assert!(matches!(
            "composer".parse::<Field>(),
            Err(SongbookError::UnknownField(_))
        ));
    }

    #[test]
    fn display_includes_known_key() {
        assert_eq!(Song::from_row("歌曲", "G", None, "").to_string(), "歌曲 (G)");
        assert_eq!(Song::named("歌曲").to_string(), "歌曲");
    }
}
