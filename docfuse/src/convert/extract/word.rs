//! Word-processor documents.

use super::Extractor;
use super::ooxml::{self, Package, WORD_TAGS};
use crate::error::Result;

const DOCUMENT_PART: &str = "word/document.xml";
const EMPTY_PLACEHOLDER: &str = "[No text content could be extracted from this document]";

/// Extracts body text from DOCX, with a printable-bytes fallback for
/// anything that is not an OOXML package (legacy `.doc` and friends).
#[derive(Debug, Clone, Copy, Default)]
pub struct WordExtractor;

impl WordExtractor {
    fn structured(&self, name: &str, bytes: &[u8]) -> Result<String> {
        let mut package = Package::open(name, bytes)?;
        let xml = package.read_part(name, DOCUMENT_PART)?;
        ooxml::collect_runs(name, &xml, WORD_TAGS)
    }
}

impl Extractor for WordExtractor {
    fn extract(&self, name: &str, bytes: &[u8]) -> String {
        let text = match self.structured(name, bytes) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(name, error = %err, "structured extraction failed, scraping raw bytes");
                printable_text(bytes)
            }
        };

        if text.trim().is_empty() {
            EMPTY_PLACEHOLDER.to_string()
        } else {
            text
        }
    }
}

/// Keep the printable content of a binary buffer.
///
/// Control and replacement characters become spaces, runs of spaces are
/// collapsed and lines that end up empty are dropped.
pub(crate) fn printable_text(bytes: &[u8]) -> String {
    let lossy = String::from_utf8_lossy(bytes);
    let cleaned: String = lossy
        .chars()
        .map(|c| {
            if c == '\n' || c == '\t' || !(c.is_control() || c == char::REPLACEMENT_CHARACTER) {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
