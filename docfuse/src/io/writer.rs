//! Serializing the output document.
//!
//! The whole document is held in memory and serialized exactly once, after
//! the last page has been appended.

use lopdf::Document;
use std::time::{Duration, Instant};

use crate::error::Result;

/// Options for serializing a PDF.
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    /// Flate-compress streams that allow it.
    pub compress: bool,

    /// Drop objects unreachable from the trailer and renumber the rest.
    pub optimize: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compress: true,
            optimize: true,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone, Copy)]
pub struct WriteStatistics {
    /// Time taken to serialize.
    pub write_time: Duration,

    /// Size of the produced buffer in bytes.
    pub byte_len: usize,

    /// Number of unreachable objects dropped.
    pub pruned_objects: usize,
}

/// Turns a finished [`Document`] into bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without compression (faster, larger output).
    pub fn without_compression() -> Self {
        Self {
            options: WriteOptions {
                compress: false,
                ..Default::default()
            },
        }
    }

    /// Serialize `doc`, returning the bytes and write statistics.
    ///
    /// Pruning runs before compression so that unreachable objects left
    /// over from source documents (their old catalogs and page tree nodes)
    /// are not compressed for nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DocFuseError::Pdf`] or [`crate::DocFuseError::Io`]
    /// when serialization fails.
    pub fn write(&self, doc: &mut Document) -> Result<(Vec<u8>, WriteStatistics)> {
        let start = Instant::now();

        let pruned_objects = if self.options.optimize {
            let pruned = doc.prune_objects().len();
            doc.renumber_objects();
            pruned
        } else {
            0
        };

        if self.options.compress {
            doc.compress();
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;

        let stats = WriteStatistics {
            write_time: start.elapsed(),
            byte_len: bytes.len(),
            pruned_objects,
        };
        tracing::debug!(
            bytes = stats.byte_len,
            pruned = stats.pruned_objects,
            write_time = ?stats.write_time,
            "serialized output document"
        );

        Ok((bytes, stats))
    }
}
