use crate::error::Result;
use crate::phonetic::{default_transliterator, phonetic_tokens_with, Transliterator};

use super::{SortBy, Songbook};

impl Songbook {
    /// Order the songs by `by` using the default pinyin transliterator.
    /// `None` leaves the order untouched.
    pub fn sort(&mut self, by: Option<SortBy>) {
        self.sort_with(by, default_transliterator());
    }

    /// Same as [`Songbook::sort`] but with a textual dimension, as it comes
    /// from a CLI flag or a config file.
    ///
    /// # Errors
    ///
    /// [`crate::SongbookError::InvalidSortDimension`] for anything other than
    /// `name` or `key`.
    pub fn sort_by_dimension(&mut self, dimension: &str) -> Result<()> {
        let by = dimension.parse()?;
        self.sort(Some(by));
        Ok(())
    }

    /// Order the songs by `by`, reading titles through `transliterator`.
    ///
    /// Both dimensions use the same two components, phonetic title and key
    /// order; `Key` only swaps their priority so songs group by key and stay
    /// alphabetical within a key. The sort is stable, so sorting twice is a
    /// no-op.
    pub fn sort_with<T: Transliterator + ?Sized>(
        &mut self,
        by: Option<SortBy>,
        transliterator: &T,
    ) {
        let Some(by) = by else {
            return;
        };

        match by {
            SortBy::Name => self.songs.sort_by_cached_key(|song| {
                (phonetic_tokens_with(transliterator, &song.name), song.key_order())
            }),
            SortBy::Key => self.songs.sort_by_cached_key(|song| {
                (song.key_order(), phonetic_tokens_with(transliterator, &song.name))
            }),
        }
        self.sort_by = Some(by);
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{number, song, songbook};
    use super::*;
    use crate::error::SongbookError;
    use crate::phonetic::PinyinTransliterator;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn sort_by_name_keeps_ascending_titles(mut songbook: Songbook) {
        songbook.sort(Some(SortBy::Name));
        assert_eq!(
            songbook.songs(),
            &[
                song("歌曲 A", "Bb", number(3), "PDF"),
                song("歌曲 B", "C", number(10), "PNG"),
            ]
        );
    }

    #[rstest]
    fn sort_by_key_groups_by_key_first(mut songbook: Songbook) {
        songbook.sort(Some(SortBy::Key));
        assert_eq!(
            songbook.songs(),
            &[
                song("歌曲 B", "C", number(10), "PNG"),
                song("歌曲 A", "Bb", number(3), "PDF"),
            ]
        );
        assert_eq!(songbook.sort_by(), Some(SortBy::Key));
    }

    #[rstest]
    fn sorting_is_idempotent(mut songbook: Songbook) {
        songbook.sort(Some(SortBy::Key));
        let once = songbook.clone();
        songbook.sort(Some(SortBy::Key));
        assert_eq!(songbook, once);
    }

    #[rstest]
    fn sorting_by_nothing_is_a_no_op(mut songbook: Songbook) {
        songbook.sort(Some(SortBy::Key));
        let before = songbook.clone();
        songbook.sort(None);
        assert_eq!(songbook, before);
    }

    #[test]
    fn interleaves_chinese_and_english_titles() {
        let mut songbook = Songbook::new(
            vec![
                song("Holy Night", "", None, ""),
                song("歌曲", "", None, ""),
                song("Amazing Grace", "", None, ""),
                song("奇异恩典", "", None, ""),
            ],
            None,
        );
        songbook.sort(Some(SortBy::Name));
        assert_eq!(
            songbook.names(),
            vec!["Amazing Grace", "歌曲", "Holy Night", "奇异恩典"]
        );
    }

    #[test]
    fn key_sort_puts_unknown_keys_first_and_ties_by_title() {
        let mut songbook = Songbook::new(
            vec![
                song("Zion", "G", None, ""),
                song("Amen", "G", None, ""),
                song("Mystery", "", None, ""),
                song("Minor", "Em", None, ""),
            ],
            None,
        );
        songbook.sort(Some(SortBy::Key));
        assert_eq!(songbook.names(), vec!["Mystery", "Amen", "Minor", "Zion"]);
    }

    #[test]
    fn same_title_ties_break_on_key() {
        let mut songbook = Songbook::new(
            vec![song("Hymn", "D", None, ""), song("Hymn", "C", None, "")],
            None,
        );
        songbook.sort(Some(SortBy::Name));
        assert_eq!(songbook.songs()[0].key.as_deref(), Some("C"));
    }

    #[rstest]
    fn textual_dimensions_are_checked(mut songbook: Songbook) {
        songbook.sort_by_dimension("key").unwrap();
        assert_eq!(songbook.sort_by(), Some(SortBy::Key));
        assert!(matches!(
            songbook.sort_by_dimension("composer"),
            Err(SongbookError::InvalidSortDimension(_))
        ));
        assert_eq!(songbook.sort_by(), Some(SortBy::Key));
    }

    #[test]
    fn custom_transliterator_changes_order() {
        let mut songbook = Songbook::new(
            vec![song("歌", "", None, ""), song("Hymn", "", None, "")],
            None,
        );
        let transliterator = PinyinTransliterator::plain().with_override('歌', "zz");
        songbook.sort_with(Some(SortBy::Name), &transliterator);
        assert_eq!(songbook.names(), vec!["Hymn", "歌"]);
    }
}
