//! Music-key helpers: canonical spellings and the ordering used when a
//! songbook is sorted by key.
//!
//! Every pitch has exactly one canonical spelling. Sharps are only used for
//! F#, every other black key is spelled with a flat, so a catalog that mixes
//! `A#` and `Bb` still groups those songs together.

use crate::error::{Result, SongbookError};

/// The 12-key cycle in canonical spelling. A key's position here is its sort
/// order.
pub const KEYS: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// Suffix marking a minor key (`Am`, `F#m`).
const MINOR_MARKER: char = 'm';

/// Semitones between a minor key and its relative major.
const RELATIVE_MAJOR_OFFSET: i32 = 3;

/// A spelling broken down into pitch class and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Spelling {
    pitch_class: usize,
    minor: bool,
}

impl Spelling {
    fn parse(key: &str) -> Result<Self> {
        let invalid = || SongbookError::InvalidKey(key.to_string());
        let trimmed = key.trim();
        let mut chars = trimmed.chars();

        let letter = chars.next().ok_or_else(invalid)?;
        let natural: i32 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(invalid()),
        };

        let rest = chars.as_str();
        let (accidental, rest) =
            if let Some(rest) = rest.strip_prefix(|c: char| matches!(c, '#' | '♯')) {
                (1, rest)
            } else if let Some(rest) = rest.strip_prefix(|c: char| matches!(c, 'b' | '♭')) {
                (-1, rest)
            } else {
                (0, rest)
            };

        let minor = match rest {
            "" => false,
            "m" => true,
            _ => return Err(invalid()),
        };

        Ok(Self {
            pitch_class: (natural + accidental).rem_euclid(12) as usize,
            minor,
        })
    }

    fn tonic(self) -> &'static str {
        KEYS[self.pitch_class]
    }
}

/// Re-spell `key` canonically. `A#` becomes `Bb`, `Gb` becomes `F#`, and
/// spellings that are already canonical come back unchanged. A minor marker
/// is kept on the normalized tonic (`A#m` becomes `Bbm`).
///
/// # Errors
///
/// Returns [`SongbookError::InvalidKey`] for anything that is not a letter
/// `A`-`G`, an optional single accidental, and an optional `m`.
pub fn normalize(key: &str) -> Result<String> {
    let spelling = Spelling::parse(key)?;
    let mut normalized = spelling.tonic().to_string();
    if spelling.minor {
        normalized.push(MINOR_MARKER);
    }
    Ok(normalized)
}

/// Convert a minor key to its relative major (`Am` becomes `C`). Major keys
/// are only normalized.
///
/// # Errors
///
/// Same as [`normalize`].
pub fn relative_major(key: &str) -> Result<String> {
    let spelling = Spelling::parse(key)?;
    if spelling.minor {
        shift(spelling.tonic(), RELATIVE_MAJOR_OFFSET)
    } else {
        Ok(spelling.tonic().to_string())
    }
}

/// Move a key `offset` semitones around the cycle, wrapping at the octave.
///
/// # Errors
///
/// Same as [`normalize`]; the key may be spelled any valid way.
pub fn shift(key: &str, offset: i32) -> Result<String> {
    let spelling = Spelling::parse(key)?;
    let index = (spelling.pitch_class as i32 + offset).rem_euclid(12) as usize;
    Ok(KEYS[index].to_string())
}

/// Position of the key's relative major in [`KEYS`].
///
/// Unknown keys sort first: absent, empty and unparseable spellings all
/// return `-1` instead of an error, so one bad row never blocks a sort.
pub fn sort_order(key: Option<&str>) -> i32 {
    key.filter(|key| !key.trim().is_empty())
        .and_then(|key| relative_major(key).ok())
        .and_then(|major| KEYS.iter().position(|candidate| *candidate == major))
        .map_or(-1, |index| index as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("A#", "Bb")]
    #[case("Gb", "F#")]
    #[case("C", "C")]
    #[case("C#", "Db")]
    #[case("D#", "Eb")]
    #[case("G#", "Ab")]
    #[case("F#", "F#")]
    #[case("Db", "Db")]
    #[case("Cb", "B")]
    #[case("E#", "F")]
    #[case("A#m", "Bbm")]
    #[case("F#m", "F#m")]
    #[case(" Bb ", "Bb")]
    fn normalizes_spellings(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input).unwrap(), expected);
    }

    #[test]
    fn normalize_is_idempotent() {
        let spellings = [
            "C", "C#", "Db", "D", "D#", "Eb", "E", "E#", "Fb", "F", "F#", "Gb", "G", "G#", "Ab",
            "A", "A#", "Bb", "B", "B#", "Cb", "Am", "C#m", "Ebm",
        ];
        for spelling in spellings {
            let once = normalize(spelling).unwrap();
            assert_eq!(normalize(&once).unwrap(), once, "{spelling}");
        }
    }

    #[rstest]
    #[case("")]
    #[case("H")]
    #[case("C##")]
    #[case("Cmaj")]
    #[case("#")]
    fn rejects_invalid_spellings(#[case] input: &str) {
        assert!(matches!(normalize(input), Err(SongbookError::InvalidKey(_))));
    }

    #[rstest]
    #[case("Am", "C")]
    #[case("F#m", "A")]
    #[case("Bbm", "Db")]
    #[case("G#m", "B")]
    #[case("A#", "Bb")]
    fn finds_relative_major(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(relative_major(input).unwrap(), expected);
    }

    #[test]
    fn shift_wraps_around_the_octave() {
        assert_eq!(shift("B", 1).unwrap(), "C");
        assert_eq!(shift("C", -1).unwrap(), "B");
        assert_eq!(shift("A", 3).unwrap(), "C");
    }

    #[test]
    fn sort_order_follows_the_cycle() {
        let orders: Vec<i32> = KEYS.iter().map(|key| sort_order(Some(key))).collect();
        assert_eq!(orders, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_keys_sort_first() {
        assert_eq!(sort_order(None), -1);
        assert_eq!(sort_order(Some("")), -1);
        assert_eq!(sort_order(Some("X#")), -1);
    }

    #[test]
    fn minor_keys_sort_with_their_relative_major() {
        assert_eq!(sort_order(Some("Am")), sort_order(Some("C")));
        assert_eq!(sort_order(Some("A#")), sort_order(Some("Bb")));
    }
}
