//! HTML and Markdown to plain text.
//!
//! Markdown is rendered to HTML first, so both formats share the same tag
//! stripping rules. The output keeps the block structure (paragraphs,
//! list items, table cells) as whitespace and drops all styling.

use once_cell::sync::Lazy;
use pulldown_cmark::{Options, Parser, html};
use regex::Regex;

use super::Extractor;

static RE_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());
static RE_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());
static RE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static RE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\b[^>]*>").unwrap());
static RE_PARAGRAPH_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</p\s*>").unwrap());
static RE_BLOCK_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</(?:div|li|tr|h[1-6])\s*>").unwrap());
static RE_LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<li\b[^>]*>").unwrap());
static RE_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<t[dh]\b[^>]*>").unwrap());
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

// &amp; goes last so "&amp;lt;" decodes to "&lt;", not "<"
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

/// Convert an HTML document to plain text.
pub fn html_to_text(html: &str) -> String {
    let s = RE_SCRIPT.replace_all(html, "");
    let s = RE_STYLE.replace_all(&s, "");
    let s = RE_COMMENT.replace_all(&s, "");
    let s = RE_BREAK.replace_all(&s, "\n");
    let s = RE_PARAGRAPH_END.replace_all(&s, "\n\n");
    let s = RE_BLOCK_END.replace_all(&s, "\n");
    let s = RE_LIST_ITEM.replace_all(&s, "• ");
    let s = RE_CELL.replace_all(&s, "\t");
    let s = RE_TAG.replace_all(&s, "");

    let mut text = s.into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }

    RE_BLANK_LINES.replace_all(&text, "\n\n").trim().to_string()
}

/// Render Markdown to HTML, then to plain text.
pub fn markdown_to_text(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, parser);
    html_to_text(&rendered)
}

/// HTML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl Extractor for HtmlExtractor {
    fn extract(&self, _name: &str, bytes: &[u8]) -> String {
        html_to_text(&String::from_utf8_lossy(bytes))
    }
}

/// Markdown sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownExtractor;

impl Extractor for MarkdownExtractor {
    fn extract(&self, _name: &str, bytes: &[u8]) -> String {
        markdown_to_text(&String::from_utf8_lossy(bytes))
    }
}
