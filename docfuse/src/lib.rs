//! docfuse - Merge heterogeneous documents into a single PDF.
//!
//! This library takes an ordered batch of uploaded files and produces one
//! PDF containing all of them, in order. It supports:
//!
//! - Native PDFs, copied page for page
//! - Raster images (JPEG, PNG, GIF, BMP, WebP, TIFF), downscaled and
//!   recompressed per quality tier
//! - Plain text, Markdown and HTML, laid out in a monospace font
//! - Word documents, spreadsheets (XLSX, XLS, ODS, CSV) and presentations,
//!   reduced to text
//!
//! A file that cannot be converted is replaced by a one-page error notice;
//! the rest of the batch goes through. Only unreadable or encrypted source
//! PDFs abort a merge.
//!
//! # Examples
//!
//! ```no_run
//! use docfuse::{InputFile, MergeConfig, Merger};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let merger = Merger::new(MergeConfig::default())?;
//! let output = merger
//!     .merge(vec![
//!         InputFile::new("intro.md", "# Quarterly report"),
//!         InputFile::new("figures.csv", "q,revenue\n1,100\n2,140\n"),
//!     ])
//!     .await?;
//!
//! println!(
//!     "{} files into {} pages",
//!     output.statistics.files_received, output.statistics.total_pages
//! );
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod config;
pub mod convert;
pub mod error;
pub mod input;
pub mod io;
pub mod merge;
pub mod render;
pub mod sequence;

// Re-export commonly used types
pub use classify::{CategoryTable, Classifier, FileCategory};
pub use config::{MergeConfig, QualityTier, TextLayout, UnrecognizedPolicy};
pub use error::{DocFuseError, ENCRYPTED_PDF_HINT, Result};
pub use input::InputFile;
pub use merge::{FileOutcome, FileReport, MergeOutput, MergeStatistics, Merger};
pub use sequence::{natural_cmp, sort_natural};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
