//! Phonetic sort keys for song titles.
//!
//! The catalog mixes Chinese and English titles. Sorting them by raw code
//! point would put every Chinese title after every English one, so each title
//! is turned into a list of title-cased Latin syllables first: `歌曲 some
//! songs` becomes `["Ge", "Qu", "Some", "Songs"]`, which sorts next to titles
//! starting with "G".

use std::collections::HashMap;
use std::sync::OnceLock;

use pinyin::ToPinyin;

/// Turns one word into phonetic Latin syllables.
pub trait Transliterator {
    fn transliterate(&self, word: &str) -> Vec<String>;
}

/// Toneless pinyin, one syllable per Han character. Non-Han runs inside a word
/// pass through as a single syllable.
#[derive(Debug, Clone)]
pub struct PinyinTransliterator {
    overrides: HashMap<char, String>,
}

impl PinyinTransliterator {
    /// A transliterator without any override.
    pub fn plain() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Force `character` to be read as `pronunciation`. Takes precedence over
    /// the dictionary reading.
    pub fn with_override(mut self, character: char, pronunciation: &str) -> Self {
        self.overrides.insert(character, pronunciation.to_string());
        self
    }

    fn syllable(&self, character: char) -> Option<String> {
        if let Some(pronunciation) = self.overrides.get(&character) {
            return Some(pronunciation.clone());
        }
        character
            .to_pinyin()
            .map(|pinyin| pinyin.plain().to_string())
    }
}

impl Default for PinyinTransliterator {
    /// 祢 is read "mí" by the dictionary, but in hymn titles it is the
    /// reverent "you" and pronounced "nǐ".
    fn default() -> Self {
        Self::plain().with_override('祢', "ni")
    }
}

impl Transliterator for PinyinTransliterator {
    fn transliterate(&self, word: &str) -> Vec<String> {
        let mut syllables = Vec::new();
        let mut passthrough = String::new();

        for character in word.chars() {
            match self.syllable(character) {
                Some(syllable) => {
                    if !passthrough.is_empty() {
                        syllables.push(std::mem::take(&mut passthrough));
                    }
                    syllables.push(syllable);
                }
                None => passthrough.push(character),
            }
        }
        if !passthrough.is_empty() {
            syllables.push(passthrough);
        }

        syllables
    }
}

/// Shared instance of [`PinyinTransliterator::default`].
pub fn default_transliterator() -> &'static PinyinTransliterator {
    static DEFAULT: OnceLock<PinyinTransliterator> = OnceLock::new();
    DEFAULT.get_or_init(PinyinTransliterator::default)
}

/// Phonetic tokens for `title` using the default pinyin transliterator.
pub fn phonetic_tokens(title: &str) -> Vec<String> {
    phonetic_tokens_with(default_transliterator(), title)
}

/// Split `title` on whitespace and title-case every syllable. Words that are
/// already Latin stay one token; other words contribute one token per
/// syllable.
pub fn phonetic_tokens_with<T: Transliterator + ?Sized>(
    transliterator: &T,
    title: &str,
) -> Vec<String> {
    title
        .split_whitespace()
        .flat_map(|word| {
            if is_latin(word) {
                vec![title_case(word)]
            } else {
                transliterator
                    .transliterate(word)
                    .iter()
                    .map(|syllable| title_case(syllable))
                    .collect()
            }
        })
        .collect()
}

fn is_latin(word: &str) -> bool {
    word.chars()
        .all(|character| character.is_ascii() || is_latin_supplement(character))
}

/// Accented Latin letters (é, ü, ...) from Latin-1 Supplement and Latin
/// Extended-A/B.
fn is_latin_supplement(character: char) -> bool {
    matches!(character, '\u{00C0}'..='\u{024F}')
}

/// Upper-case the first letter of every run of letters and lower-case the
/// rest: `SONGS` becomes `Songs`, `o'neil` becomes `O'Neil`.
pub fn title_case(word: &str) -> String {
    let mut cased = String::with_capacity(word.len());
    let mut in_word = false;
    for character in word.chars() {
        if character.is_alphabetic() {
            if in_word {
                cased.extend(character.to_lowercase());
            } else {
                cased.extend(character.to_uppercase());
            }
            in_word = true;
        } else {
            cased.push(character);
            in_word = false;
        }
    }
    cased
}
