//! Monospace word wrap and pagination.
//!
//! Text is wrapped line by line against the column width of a
//! [`TextLayout`] and then cut into fixed-size pages. Words are the pieces
//! of a line split on single spaces, so runs of spaces (table padding,
//! indentation) survive wrapping unchanged.

use crate::config::TextLayout;

/// One page of wrapped text, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPage {
    /// Bold banner drawn above the body, first page only.
    pub title: Option<String>,
    /// Body lines, top to bottom.
    pub lines: Vec<String>,
}

/// Splits text into pages for a fixed layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPaginator {
    layout: TextLayout,
}

impl TextPaginator {
    /// Create a paginator for the given layout.
    pub fn new(layout: TextLayout) -> Self {
        Self { layout }
    }

    /// Wrap and paginate `text`.
    ///
    /// Always returns at least one page. When `title` is given it is
    /// attached to the first page only, and that page holds fewer lines to
    /// leave room for it.
    pub fn paginate(&self, text: &str, title: Option<&str>) -> Vec<TextPage> {
        let lines = self.wrap_text(text);
        let first_capacity = self.layout.lines_per_page(title.is_some());
        let capacity = self.layout.lines_per_page(false);

        let mut pages = Vec::new();
        let mut rest = lines.as_slice();

        let take = rest.len().min(first_capacity);
        pages.push(TextPage {
            title: title.map(str::to_string),
            lines: rest[..take].to_vec(),
        });
        rest = &rest[take..];

        for chunk in rest.chunks(capacity) {
            pages.push(TextPage {
                title: None,
                lines: chunk.to_vec(),
            });
        }

        pages
    }

    /// Wrap every source line of `text` independently.
    ///
    /// Line endings are normalized and tabs expanded first. Blank source
    /// lines come out as empty lines.
    pub fn wrap_text(&self, text: &str) -> Vec<String> {
        let tab = " ".repeat(self.layout.tab_width);
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n").replace('\t', &tab);

        normalized
            .split('\n')
            .flat_map(|line| self.wrap_line(line))
            .collect()
    }

    /// Greedy word wrap of a single line.
    ///
    /// A word wider than the column is put on a line of its own and left to
    /// overflow the margin; it is never split.
    pub fn wrap_line(&self, line: &str) -> Vec<String> {
        let max_width = self.layout.column_width();
        let mut out = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_chars = 0usize;

        for word in line.split(' ') {
            let word_chars = word.chars().count();
            if current.is_empty() {
                current.push(word);
                current_chars = word_chars;
                continue;
            }

            let candidate = current_chars + 1 + word_chars;
            if self.layout.text_width(candidate) <= max_width {
                current.push(word);
                current_chars = candidate;
            } else {
                out.push(current.join(" "));
                current = vec![word];
                current_chars = word_chars;
            }
        }

        out.push(current.join(" "));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paginator() -> TextPaginator {
        TextPaginator::default()
    }

    // 512pt column / (0.6 * 10pt) per glyph
    const COLUMN_CHARS: usize = 85;

    #[test]
    fn test_short_line_untouched() {
        assert_eq!(paginator().wrap_line("hello world"), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_at_column() {
        let word = "x".repeat(40);
        let line = format!("{word} {word} {word}");
        let wrapped = paginator().wrap_line(&line);
        assert_eq!(wrapped, vec![format!("{word} {word}"), word.clone()]);
        assert!(wrapped.iter().all(|l| l.chars().count() <= COLUMN_CHARS));
    }

    #[test]
    fn test_long_word_overflows_on_own_line() {
        let long = "y".repeat(200);
        let wrapped = paginator().wrap_line(&format!("a {long} b"));
        assert_eq!(wrapped, vec!["a".to_string(), long, "b".to_string()]);
    }

    #[test]
    fn test_blank_lines_preserved() {
        let lines = paginator().wrap_text("one\n\n\ntwo\r\nthree");
        assert_eq!(lines, vec!["one", "", "", "two", "three"]);
    }

    #[test]
    fn test_spaces_and_tabs_preserved() {
        let lines = paginator().wrap_text("a   b\tc");
        assert_eq!(lines, vec!["a   b    c"]);
    }

    #[test]
    fn test_paginate_empty_text_has_one_page() {
        let pages = paginator().paginate("", Some("empty.txt"));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title.as_deref(), Some("empty.txt"));
        assert_eq!(pages[0].lines, vec![""]);
    }

    #[test]
    fn test_title_only_on_first_page() {
        let text = (0..120).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let pages = paginator().paginate(&text, Some("numbers.txt"));

        // 47 lines under the title, then 49 per page
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].lines.len(), 47);
        assert_eq!(pages[1].lines.len(), 49);
        assert_eq!(pages[2].lines.len(), 24);
        assert!(pages[0].title.is_some());
        assert!(pages[1..].iter().all(|p| p.title.is_none()));

        // reading order survives pagination
        assert_eq!(pages[0].lines[0], "0");
        assert_eq!(pages[1].lines[0], "47");
        assert_eq!(pages[2].lines[23], "119");
    }

    #[test]
    fn test_untitled_pages_use_full_capacity() {
        let text = vec!["line"; 98].join("\n");
        let pages = paginator().paginate(&text, None);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines.len(), 49);
        assert_eq!(pages[1].lines.len(), 49);
    }

    proptest! {
        #[test]
        fn prop_wrap_reconstructs_words(line in "[a-z ]{0,300}") {
            let wrapped = paginator().wrap_line(&line);
            let original: Vec<&str> = line.split(' ').collect();
            let rebuilt: Vec<&str> = wrapped.iter().flat_map(|l| l.split(' ')).collect();
            prop_assert_eq!(rebuilt, original);
        }

        #[test]
        fn prop_long_words_one_line_each(
            words in proptest::collection::vec("[a-z]{86,120}", 1..6)
        ) {
            let line = words.join(" ");
            let wrapped = paginator().wrap_line(&line);
            prop_assert_eq!(wrapped, words);
        }
    }
}
