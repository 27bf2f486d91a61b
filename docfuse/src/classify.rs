//! File type classification by extension.
//!
//! Classification only looks at the final dot-suffix of the file name, so
//! `report.final.PDF` is a PDF and `archive.tar.gz` is seen as `gz`. The
//! extension table is an immutable value handed to the [`Classifier`] at
//! construction time.
//!
//! # Examples
//!
//! ```
//! use docfuse::classify::{Classifier, FileCategory};
//!
//! let classifier = Classifier::default();
//! assert_eq!(classifier.classify("scans/Page 1.JPG"), FileCategory::Image);
//! assert_eq!(classifier.classify("notes"), FileCategory::Unrecognized);
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Content category assigned to an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Native PDF, pages are copied verbatim.
    Pdf,
    /// Raster image.
    Image,
    /// Plain text.
    Text,
    /// Word-processor document.
    Word,
    /// Spreadsheet or CSV.
    Excel,
    /// Markdown source.
    Markdown,
    /// HTML page.
    Html,
    /// Presentation deck.
    Powerpoint,
    /// Extension not mapped to anything.
    Unrecognized,
}

impl FileCategory {
    /// Every category that has a converter.
    pub const SUPPORTED: [FileCategory; 8] = [
        Self::Pdf,
        Self::Image,
        Self::Text,
        Self::Word,
        Self::Excel,
        Self::Markdown,
        Self::Html,
        Self::Powerpoint,
    ];

    /// Lowercase name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Text => "text",
            Self::Word => "word",
            Self::Excel => "excel",
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Powerpoint => "powerpoint",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DEFAULT_EXTENSIONS: &[(&str, FileCategory)] = &[
    ("pdf", FileCategory::Pdf),
    ("jpg", FileCategory::Image),
    ("jpeg", FileCategory::Image),
    ("png", FileCategory::Image),
    ("gif", FileCategory::Image),
    ("bmp", FileCategory::Image),
    ("webp", FileCategory::Image),
    ("tif", FileCategory::Image),
    ("tiff", FileCategory::Image),
    ("txt", FileCategory::Text),
    ("text", FileCategory::Text),
    ("log", FileCategory::Text),
    ("docx", FileCategory::Word),
    ("doc", FileCategory::Word),
    ("xlsx", FileCategory::Excel),
    ("xls", FileCategory::Excel),
    ("xlsm", FileCategory::Excel),
    ("xlsb", FileCategory::Excel),
    ("ods", FileCategory::Excel),
    ("csv", FileCategory::Excel),
    ("md", FileCategory::Markdown),
    ("markdown", FileCategory::Markdown),
    ("html", FileCategory::Html),
    ("htm", FileCategory::Html),
    ("pptx", FileCategory::Powerpoint),
    ("ppt", FileCategory::Powerpoint),
];

/// Immutable mapping from lowercase extension to category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: BTreeMap<String, FileCategory>,
}

impl CategoryTable {
    /// Build a table from `(extension, category)` pairs.
    ///
    /// Extensions are matched case-insensitively and may be given with or
    /// without a leading dot. Later pairs win over earlier ones.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, FileCategory)>,
        S: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(ext, category)| {
                let ext = ext.as_ref().trim_start_matches('.').to_ascii_lowercase();
                (ext, category)
            })
            .collect();
        Self { entries }
    }

    /// Look up a lowercase extension.
    pub fn get(&self, extension: &str) -> Option<FileCategory> {
        self.entries.get(extension).copied()
    }

    /// Extensions mapped to the given category, sorted.
    pub fn extensions_for(&self, category: FileCategory) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, c)| **c == category)
            .map(|(ext, _)| ext.as_str())
            .collect()
    }

    /// Number of mapped extensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table maps nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_EXTENSIONS.iter().copied())
    }
}

/// Maps file names to categories using an injected [`CategoryTable`].
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    table: Arc<CategoryTable>,
}

impl Classifier {
    /// Create a classifier over the given table.
    pub fn new(table: CategoryTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Classify a file name. Total: every input maps to exactly one category.
    pub fn classify(&self, name: &str) -> FileCategory {
        extension(name)
            .and_then(|ext| self.table.get(&ext))
            .unwrap_or(FileCategory::Unrecognized)
    }

    /// Whether the name maps to a category with a converter.
    pub fn is_supported(&self, name: &str) -> bool {
        self.classify(name) != FileCategory::Unrecognized
    }

    /// Extensions mapped to `category` in the active table.
    pub fn extensions_for(&self, category: FileCategory) -> Vec<&str> {
        self.table.extensions_for(category)
    }

    /// The active table.
    pub fn table(&self) -> &CategoryTable {
        &self.table
    }
}

/// Final dot-suffix of the last path component, lowercased.
///
/// Returns `None` when there is no dot, when the only dot is leading
/// (`.bashrc`), or when the name ends with a dot.
pub fn extension(name: &str) -> Option<String> {
    let file_name = name.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(name);
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a.pdf", FileCategory::Pdf)]
    #[case("X.PDF", FileCategory::Pdf)]
    #[case("a.b.c.PDF", FileCategory::Pdf)]
    #[case("photo.JPEG", FileCategory::Image)]
    #[case("scan.tiff", FileCategory::Image)]
    #[case("notes.txt", FileCategory::Text)]
    #[case("letter.docx", FileCategory::Word)]
    #[case("legacy.doc", FileCategory::Word)]
    #[case("budget.xlsx", FileCategory::Excel)]
    #[case("rows.csv", FileCategory::Excel)]
    #[case("README.md", FileCategory::Markdown)]
    #[case("page.htm", FileCategory::Html)]
    #[case("deck.pptx", FileCategory::Powerpoint)]
    #[case("archive.tar.gz", FileCategory::Unrecognized)]
    #[case("", FileCategory::Unrecognized)]
    #[case("noext", FileCategory::Unrecognized)]
    #[case(".bashrc", FileCategory::Unrecognized)]
    #[case("trailing.", FileCategory::Unrecognized)]
    #[case("dir.v2/readme", FileCategory::Unrecognized)]
    #[case("folder/sub/Chapter 1.md", FileCategory::Markdown)]
    fn test_classify_default_table(#[case] name: &str, #[case] expected: FileCategory) {
        assert_eq!(Classifier::default().classify(name), expected);
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("X.PDF"), classifier.classify("x.pdf"));
        assert_eq!(classifier.classify("a.DocX"), classifier.classify("a.docx"));
    }

    #[test]
    fn test_custom_table_is_isolated() {
        let classifier = Classifier::new(CategoryTable::from_pairs([
            (".TXT", FileCategory::Text),
            ("pdf", FileCategory::Pdf),
        ]));

        assert_eq!(classifier.classify("a.txt"), FileCategory::Text);
        assert_eq!(classifier.classify("a.png"), FileCategory::Unrecognized);
        assert_eq!(classifier.table().len(), 2);
        assert!(Classifier::default().is_supported("a.png"));
    }

    #[test]
    fn test_extensions_for() {
        let classifier = Classifier::default();
        assert_eq!(classifier.extensions_for(FileCategory::Markdown), vec!["markdown", "md"]);
        assert!(classifier.extensions_for(FileCategory::Unrecognized).is_empty());
    }

    #[test]
    fn test_extension_helper() {
        assert_eq!(extension("a/b.c/Report.PDF").as_deref(), Some("pdf"));
        assert_eq!(extension("C:\\docs\\x.Md").as_deref(), Some("md"));
        assert_eq!(extension("plain"), None);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&FileCategory::Powerpoint).unwrap();
        assert_eq!(json, "\"powerpoint\"");
    }
}
