//! The page assembly engine.
//!
//! # Examples
//!
//! ```no_run
//! use docfuse::merge::Merger;
//! use docfuse::{InputFile, MergeConfig, QualityTier};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MergeConfig::default().with_quality(QualityTier::Low);
//! let merger = Merger::new(config)?;
//!
//! let files = vec![
//!     InputFile::new("scan.jpg", std::fs::read("scan.jpg")?),
//!     InputFile::new("budget.csv", std::fs::read("budget.csv")?),
//! ];
//! let output = merger.merge(files).await?;
//! std::fs::write("merged.pdf", &output.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod merger;
pub mod report;

pub use merger::{MergeOutput, Merger};
pub use report::{FileOutcome, FileReport, MergeStatistics};

use crate::config::{MergeConfig, QualityTier};
use crate::error::Result;
use crate::input::InputFile;

/// Merge `files` with the default configuration at the given quality.
///
/// Convenience function that creates a merger and performs the merge.
///
/// # Errors
///
/// Returns an error if the batch is empty or a source PDF cannot be read.
pub async fn merge_files(files: Vec<InputFile>, quality: QualityTier) -> Result<Vec<u8>> {
    let merger = Merger::new(MergeConfig::default().with_quality(quality))?;
    let output = merger.merge(files).await?;
    Ok(output.bytes)
}
