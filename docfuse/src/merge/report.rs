//! Per-file outcomes and merge statistics.

use serde::Serialize;
use std::time::Duration;

use crate::classify::FileCategory;

/// What became of one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Converted or copied into `count` pages.
    Pages {
        /// Pages contributed to the output.
        count: usize,
    },
    /// Replaced by a one-page error notice.
    ErrorPage {
        /// Message shown on the notice.
        reason: String,
    },
    /// Left out of the output.
    Skipped,
}

/// Outcome of one input file, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Display name of the file.
    pub name: String,
    /// Category the file was classified as.
    pub category: FileCategory,
    /// What the merge did with it.
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    /// Pages this file contributed, error notices included.
    pub fn page_count(&self) -> usize {
        match &self.outcome {
            FileOutcome::Pages { count } => *count,
            FileOutcome::ErrorPage { .. } => 1,
            FileOutcome::Skipped => 0,
        }
    }
}

/// Statistics about a merge operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeStatistics {
    /// Number of files handed to the merge.
    pub files_received: usize,

    /// Files converted or copied successfully.
    pub files_converted: usize,

    /// Files replaced by an error notice.
    pub files_failed: usize,

    /// Files left out entirely.
    pub files_skipped: usize,

    /// Total number of pages in the output.
    pub total_pages: usize,

    /// Total size of the inputs in bytes.
    pub input_size: u64,

    /// Size of the output in bytes.
    pub output_size: u64,

    /// Wall-clock time of the whole merge.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Tally the statistics of a finished merge.
    pub fn from_reports(reports: &[FileReport]) -> Self {
        let mut stats = Self {
            files_received: reports.len(),
            ..Default::default()
        };
        for report in reports {
            match report.outcome {
                FileOutcome::Pages { .. } => stats.files_converted += 1,
                FileOutcome::ErrorPage { .. } => stats.files_failed += 1,
                FileOutcome::Skipped => stats.files_skipped += 1,
            }
            stats.total_pages += report.page_count();
        }
        stats
    }

    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
