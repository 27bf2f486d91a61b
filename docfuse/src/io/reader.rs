//! Loading native PDF inputs from memory.
//!
//! A parsed document is encrypted when its trailer carries an `Encrypt`
//! entry. When the parser refuses the file, the error message is checked
//! for encryption, and so are the trailer and cross-reference stream
//! dictionaries found in the raw bytes. Stream bodies are never scanned, so
//! page text that merely mentions `/Encrypt` does not count.

use lopdf::Document;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::time::{Duration, Instant};

use crate::error::{DocFuseError, Result, mentions_encryption};

static RE_STREAM_BODY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s-u)\bstream\r?\n.*?endstream").unwrap());
static RE_TRAILER_ENCRYPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s-u)\btrailer\s*<<(?:[^>]|>[^>])*?/Encrypt\b").unwrap());
static RE_XREF_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u)/Type\s*/XRef\b").unwrap());

const ENCRYPT_KEY: &[u8] = b"/Encrypt";

/// A parsed source PDF.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Display name of the source file.
    pub name: String,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Size of the source buffer in bytes.
    pub byte_len: usize,

    /// Time taken to parse the document.
    pub load_time: Duration,
}

/// PDF reader that rejects encrypted and page-less documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a reader.
    pub fn new() -> Self {
        Self
    }

    /// Parse the PDF `bytes` of the file called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The document is encrypted ([`DocFuseError::EncryptedPdf`])
    /// - The bytes are not a parseable PDF ([`DocFuseError::SourceDocument`])
    /// - The page tree is empty ([`DocFuseError::SourceDocument`])
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use docfuse::io::PdfReader;
    /// # fn example(bytes: &[u8]) -> docfuse::Result<()> {
    /// let reader = PdfReader::new();
    /// let loaded = reader.load("report.pdf", bytes)?;
    /// println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(&self, name: &str, bytes: &[u8]) -> Result<LoadedPdf> {
        let start = Instant::now();

        let document = Document::load_mem(bytes).map_err(|e| {
            let message = e.to_string();
            if mentions_encryption(&message) || declares_encryption(bytes) {
                DocFuseError::encrypted_pdf(name)
            } else {
                DocFuseError::source_document(name, message)
            }
        })?;

        if document.trailer.has(b"Encrypt") {
            return Err(DocFuseError::encrypted_pdf(name));
        }

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(DocFuseError::source_document(name, "PDF has no pages"));
        }

        let load_time = start.elapsed();
        tracing::debug!(name, page_count, ?load_time, "loaded source PDF");

        Ok(LoadedPdf {
            document,
            name: name.to_string(),
            page_count,
            byte_len: bytes.len(),
            load_time,
        })
    }
}

/// Whether a trailer or cross-reference stream dictionary in raw PDF bytes
/// names a security handler.
fn declares_encryption(bytes: &[u8]) -> bool {
    let skeleton = RE_STREAM_BODY.replace_all(bytes, &b"stream\nendstream"[..]);

    if RE_TRAILER_ENCRYPT.is_match(&skeleton) {
        return true;
    }

    RE_XREF_TYPE.find_iter(&skeleton).any(|m| {
        let start = find_last(&skeleton[..m.start()], b"obj").unwrap_or(0);
        let end = find_first(&skeleton[m.end()..], b"stream").map_or(skeleton.len(), |i| m.end() + i);
        find_first(&skeleton[start..end], ENCRYPT_KEY).is_some()
    })
}

fn find_first(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn find_last(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}
