//! Presentation decks.

use once_cell::sync::Lazy;
use quick_xml::escape::unescape;
use regex::Regex;

use super::Extractor;
use super::ooxml::{self, DRAWING_TAGS, Package};
use crate::error::{DocFuseError, Result};
use crate::sequence::natural_cmp;

const EMPTY_PLACEHOLDER: &str = "[No text content could be extracted from this presentation]";

static RE_SLIDE_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ppt/slides/slide\d+\.xml$").unwrap());
static RE_TEXT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<a:t(?:\s[^>]*)?>([^<]*)</a:t>").unwrap());

/// Extracts slide text from PPTX, scraping text runs out of whatever XML
/// can be found when the deck cannot be walked slide by slide.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlideExtractor;

impl SlideExtractor {
    fn structured(&self, name: &str, bytes: &[u8]) -> Result<String> {
        let mut package = Package::open(name, bytes)?;

        let mut slides: Vec<String> = package
            .part_names()
            .into_iter()
            .filter(|part| RE_SLIDE_PART.is_match(part))
            .collect();
        slides.sort_by(|a, b| natural_cmp(a, b));

        let mut out = String::new();
        let mut has_text = false;
        for (index, part) in slides.iter().enumerate() {
            let xml = package.read_part(name, part)?;
            let text = ooxml::collect_runs(name, &xml, DRAWING_TAGS)?;
            has_text |= !text.trim().is_empty();

            if index > 0 {
                out.push('\n');
            }
            out.push_str(&format!("--- Slide {} ---\n", index + 1));
            out.push_str(text.trim_end());
            out.push('\n');
        }

        if has_text {
            Ok(out)
        } else {
            Err(DocFuseError::conversion(name, "no slide text found"))
        }
    }

    fn scraped(&self, name: &str, bytes: &[u8]) -> String {
        let sources = match Package::open(name, bytes) {
            Ok(mut package) => {
                let mut parts: Vec<String> = package
                    .part_names()
                    .into_iter()
                    .filter(|part| part.ends_with(".xml"))
                    .collect();
                parts.sort_by(|a, b| natural_cmp(a, b));
                parts
                    .iter()
                    .filter_map(|part| package.read_part(name, part).ok())
                    .collect()
            }
            Err(_) => vec![String::from_utf8_lossy(bytes).into_owned()],
        };

        sources
            .iter()
            .flat_map(|xml| RE_TEXT_RUN.captures_iter(xml))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|run| !run.is_empty())
            .map(|run| unescape(run).map_or_else(|_| run.to_string(), |text| text.into_owned()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Extractor for SlideExtractor {
    fn extract(&self, name: &str, bytes: &[u8]) -> String {
        match self.structured(name, bytes) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(name, error = %err, "structured extraction failed, scraping text runs");
                let text = self.scraped(name, bytes);
                if text.is_empty() {
                    EMPTY_PLACEHOLDER.to_string()
                } else {
                    text
                }
            }
        }
    }
}
