//! ZIP container reading and run-text collection for Office Open XML files.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::error::{DocFuseError, Result};

/// Element names that carry text in one OOXML dialect.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RunTags {
    /// Element whose character data is text (`w:t`, `a:t`).
    pub text: &'static [u8],
    /// Element that ends a paragraph (`w:p`, `a:p`).
    pub paragraph: &'static [u8],
    /// Empty elements that stand for a tab.
    pub tabs: &'static [&'static [u8]],
    /// Empty elements that stand for a line break.
    pub breaks: &'static [&'static [u8]],
}

/// WordprocessingML body text.
pub(crate) const WORD_TAGS: RunTags = RunTags {
    text: b"w:t",
    paragraph: b"w:p",
    tabs: &[b"w:tab"],
    breaks: &[b"w:br", b"w:cr"],
};

/// DrawingML text used by slides.
pub(crate) const DRAWING_TAGS: RunTags = RunTags {
    text: b"a:t",
    paragraph: b"a:p",
    tabs: &[b"a:tab"],
    breaks: &[b"a:br"],
};

/// A read-only view of an OOXML package held in memory.
pub(crate) struct Package<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> Package<'a> {
    /// Open a package from its bytes.
    pub fn open(name: &str, bytes: &'a [u8]) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| DocFuseError::conversion(name, format!("not an OOXML package: {e}")))?;
        Ok(Self { archive })
    }

    /// Read a part as UTF-8 text.
    pub fn read_part(&mut self, name: &str, part: &str) -> Result<String> {
        let mut file = self.archive.by_name(part).map_err(|e| {
            if matches!(e, zip::result::ZipError::FileNotFound) {
                DocFuseError::conversion(name, format!("missing part {part}"))
            } else {
                DocFuseError::conversion(name, e.to_string())
            }
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| DocFuseError::conversion(name, format!("cannot read {part}: {e}")))?;
        Ok(contents)
    }

    /// Names of all parts in the package.
    pub fn part_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }
}

/// Collect the text runs of an XML part.
///
/// Character data is kept only inside `tags.text` elements; paragraph ends
/// and break elements become newlines and tab elements become tabs.
pub(crate) fn collect_runs(name: &str, xml: &str, tags: RunTags) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == tags.text => in_text = true,
            Ok(Event::End(e)) => {
                let tag = e.name();
                if tag.as_ref() == tags.text {
                    in_text = false;
                } else if tag.as_ref() == tags.paragraph {
                    out.push('\n');
                }
            }
            Ok(Event::Empty(e)) => {
                let tag = e.name();
                let tag = tag.as_ref();
                if tags.tabs.iter().any(|t| *t == tag) {
                    out.push('\t');
                } else if tags.breaks.iter().any(|t| *t == tag) || tag == tags.paragraph {
                    out.push('\n');
                }
            }
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| DocFuseError::conversion(name, format!("bad XML text: {e}")))?;
                out.push_str(&text);
            }
            Ok(Event::CData(t)) if in_text => {
                out.push_str(&String::from_utf8_lossy(&t));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(DocFuseError::conversion(
                    name,
                    format!("malformed XML at byte {}: {e}", reader.buffer_position()),
                ));
            }
        }
    }

    Ok(out)
}
