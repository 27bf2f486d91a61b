//! Document-to-text extractors.
//!
//! An extractor never fails: when a document cannot be read structurally it
//! falls back to a cruder recovery, and when even that yields nothing it
//! returns a placeholder or an error message. Whatever comes out is laid
//! out by the [`TextPaginator`](crate::convert::text::TextPaginator) like
//! any other text.

mod markup;
mod ooxml;
mod sheet;
mod slides;
mod word;

pub use markup::{HtmlExtractor, MarkdownExtractor, html_to_text, markdown_to_text};
pub use sheet::{MAX_COLUMN_WIDTH, Sheet, SheetExtractor, render_sheets, render_table};
pub use slides::SlideExtractor;
pub use word::WordExtractor;

use crate::classify::FileCategory;

/// Turns the bytes of one document into plain text.
pub trait Extractor: Send + Sync {
    /// Extract the text of the file called `name`.
    fn extract(&self, name: &str, bytes: &[u8]) -> String;
}

/// Plain text, decoded as UTF-8 with invalid sequences replaced.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl Extractor for PlainTextExtractor {
    fn extract(&self, _name: &str, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// The extractor for a text-like category, `None` for the others.
pub fn extractor_for(category: FileCategory) -> Option<&'static dyn Extractor> {
    match category {
        FileCategory::Text => Some(&PlainTextExtractor),
        FileCategory::Word => Some(&WordExtractor),
        FileCategory::Excel => Some(&SheetExtractor),
        FileCategory::Markdown => Some(&MarkdownExtractor),
        FileCategory::Html => Some(&HtmlExtractor),
        FileCategory::Powerpoint => Some(&SlideExtractor),
        FileCategory::Pdf | FileCategory::Image | FileCategory::Unrecognized => None,
    }
}
