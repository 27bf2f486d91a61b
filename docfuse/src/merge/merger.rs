//! Core merge implementation.
//!
//! Files are handled strictly one after another in input order. Each file
//! either contributes its pages, is replaced by a one-page error notice, or
//! (unrecognized files under the skip policy) contributes nothing. Only a
//! source PDF that cannot be read aborts the batch.

use std::sync::Arc;
use std::time::Instant;

use crate::classify::{Classifier, FileCategory};
use crate::config::{MergeConfig, UnrecognizedPolicy};
use crate::convert::extract::extractor_for;
use crate::convert::image::ImageNormalizer;
use crate::convert::text::TextPaginator;
use crate::error::{DocFuseError, Result};
use crate::input::InputFile;
use crate::io::{PdfReader, PdfWriter, WriteOptions};
use crate::merge::report::{FileOutcome, FileReport, MergeStatistics};
use crate::render::OutputDocument;

/// Result of a merge operation.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// The serialized PDF.
    pub bytes: Vec<u8>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// One report per input file, in input order.
    pub reports: Vec<FileReport>,
}

/// Combines a batch of heterogeneous files into one PDF.
///
/// A merger holds only immutable configuration and is cheap to clone, so
/// one instance can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct Merger {
    config: Arc<MergeConfig>,
    classifier: Classifier,
    reader: PdfReader,
    normalizer: ImageNormalizer,
    paginator: TextPaginator,
    writer: PdfWriter,
}

impl Merger {
    /// Create a merger from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DocFuseError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn new(config: MergeConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            classifier: Classifier::new(config.categories.clone()),
            reader: PdfReader::new(),
            normalizer: ImageNormalizer::new(config.quality),
            paginator: TextPaginator::new(config.layout),
            writer: PdfWriter::with_options(WriteOptions {
                compress: config.compress,
                optimize: true,
            }),
            config: Arc::new(config),
        })
    }

    /// The configuration this merger was built with.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// The classifier used to route files.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Merge `files` into one PDF on tokio's blocking pool.
    ///
    /// # Errors
    ///
    /// See [`Merger::merge_blocking`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use docfuse::{InputFile, MergeConfig, Merger};
    /// # async fn example() -> docfuse::Result<()> {
    /// let merger = Merger::new(MergeConfig::default())?;
    /// let files = vec![
    ///     InputFile::new("cover.pdf", std::fs::read("cover.pdf")?),
    ///     InputFile::new("notes.txt", "Remember the milk"),
    /// ];
    /// let output = merger.merge(files).await?;
    /// println!("Merged {} pages", output.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, files: Vec<InputFile>) -> Result<MergeOutput> {
        let merger = self.clone();
        tokio::task::spawn_blocking(move || merger.merge_blocking(files))
            .await
            .map_err(|e| DocFuseError::other(format!("Merge task failed: {e}")))?
    }

    /// Merge `files` into one PDF on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `files` is empty, or every file was skipped ([`DocFuseError::EmptyBatch`])
    /// - A source PDF is encrypted ([`DocFuseError::EncryptedPdf`])
    /// - A source PDF cannot be parsed ([`DocFuseError::SourceDocument`])
    /// - The output cannot be serialized
    pub fn merge_blocking(&self, files: Vec<InputFile>) -> Result<MergeOutput> {
        if files.is_empty() {
            return Err(DocFuseError::EmptyBatch);
        }

        let start = Instant::now();
        let mut output = OutputDocument::new(self.config.layout);
        let mut reports = Vec::with_capacity(files.len());

        for file in &files {
            let name = file.name();
            let category = self.classifier.classify(name);
            tracing::debug!(name, %category, bytes = file.len(), "processing file");

            let outcome = match self.convert(&mut output, file, category) {
                Ok(Some(count)) => FileOutcome::Pages { count },
                Ok(None) => FileOutcome::Skipped,
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(name, error = %err, "conversion failed, inserting error page");
                    let reason = notice_message(&err);
                    output.add_error_page(name, &reason)?;
                    FileOutcome::ErrorPage { reason }
                }
                Err(err) => return Err(err),
            };

            reports.push(FileReport {
                name: name.to_string(),
                category,
                outcome,
            });
        }

        if output.is_empty() {
            return Err(DocFuseError::EmptyBatch);
        }

        let mut document = output.finish();
        let (bytes, _) = self.writer.write(&mut document)?;

        let mut statistics = MergeStatistics::from_reports(&reports);
        statistics.input_size = files.iter().map(|f| f.len() as u64).sum();
        statistics.output_size = bytes.len() as u64;
        statistics.merge_time = start.elapsed();

        tracing::info!(
            files = statistics.files_received,
            converted = statistics.files_converted,
            failed = statistics.files_failed,
            skipped = statistics.files_skipped,
            pages = statistics.total_pages,
            input = %statistics.format_input_size(),
            output = %statistics.format_output_size(),
            elapsed = ?statistics.merge_time,
            "merge finished"
        );

        Ok(MergeOutput {
            bytes,
            statistics,
            reports,
        })
    }

    /// Append the pages of one file, returning how many were added.
    ///
    /// `Ok(None)` means the file was skipped.
    fn convert(
        &self,
        output: &mut OutputDocument,
        file: &InputFile,
        category: FileCategory,
    ) -> Result<Option<usize>> {
        let name = file.name();

        match category {
            FileCategory::Pdf => {
                let loaded = self.reader.load(name, file.bytes())?;
                let count = output
                    .append_pdf(loaded.document)
                    .map_err(|e| DocFuseError::source_document(name, e.to_string()))?;
                Ok(Some(count))
            }
            FileCategory::Image => {
                let image = self.normalizer.normalize(name, file.bytes())?;
                output
                    .add_image_page(&image)
                    .map_err(|e| DocFuseError::conversion(name, e.to_string()))?;
                Ok(Some(1))
            }
            FileCategory::Unrecognized => match self.config.unrecognized {
                UnrecognizedPolicy::Skip => {
                    tracing::warn!(name, "skipping file with unrecognized type");
                    Ok(None)
                }
                UnrecognizedPolicy::ErrorPage => Err(DocFuseError::unsupported_format(name)),
            },
            text_like => {
                let extractor =
                    extractor_for(text_like).ok_or_else(|| DocFuseError::unsupported_format(name))?;
                let text = extractor.extract(name, file.bytes());

                let title = if text_like == FileCategory::Text && !self.config.title_plain_text {
                    None
                } else {
                    Some(name)
                };
                let pages = self.paginator.paginate(&text, title);
                let count = output
                    .add_text_pages(&pages)
                    .map_err(|e| DocFuseError::conversion(name, e.to_string()))?;
                Ok(Some(count))
            }
        }
    }
}

/// Body text of the error notice for a recoverable failure.
fn notice_message(err: &DocFuseError) -> String {
    match err {
        DocFuseError::Conversion { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}
