//! Error types for docfuse.
//!
//! Errors fall into two severities:
//!
//! - **Per-file** ([`DocFuseError::Conversion`], [`DocFuseError::UnsupportedFormat`]):
//!   one input could not be converted. The merge engine replaces that file's
//!   pages with an error notice and carries on with the rest of the batch.
//! - **Batch** (everything else): the request cannot produce a complete
//!   document. A native PDF that cannot be read falls here, since its pages
//!   cannot be salvaged into the output.

use std::io;

/// Result type alias for docfuse operations.
pub type Result<T> = std::result::Result<T, DocFuseError>;

/// Sentence shown to users when a source PDF is password protected.
pub const ENCRYPTED_PDF_HINT: &str = "One of the PDFs is password protected. \
     Remove the password (for example with 'qpdf --decrypt in.pdf out.pdf') and upload it again.";

/// Main error type for docfuse operations.
#[derive(Debug, thiserror::Error)]
pub enum DocFuseError {
    /// No files were provided for merging, or none of them produced a page.
    #[error("No files to merge")]
    EmptyBatch,

    /// File extension is not mapped to any category.
    #[error("Unsupported file type: {name}")]
    UnsupportedFormat {
        /// Display name of the file.
        name: String,
    },

    /// A single file could not be converted.
    #[error("Failed to convert {name}: {reason}")]
    Conversion {
        /// Display name of the file.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// A native PDF input could not be parsed.
    #[error("Failed to read PDF {name}: {reason}")]
    SourceDocument {
        /// Display name of the file.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// A native PDF input is encrypted or password protected.
    #[error("PDF is encrypted and cannot be processed: {name}\n  Hint: {}", ENCRYPTED_PDF_HINT)]
    EncryptedPdf {
        /// Display name of the file.
        name: String,
    },

    /// Building or serializing the output document failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl DocFuseError {
    /// Create a Conversion error.
    pub fn conversion(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conversion {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a SourceDocument error.
    pub fn source_document(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceDocument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(name: impl Into<String>) -> Self {
        Self::EncryptedPdf { name: name.into() }
    }

    /// Create an UnsupportedFormat error.
    pub fn unsupported_format(name: impl Into<String>) -> Self {
        Self::UnsupportedFormat { name: name.into() }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error only affects one file of the batch.
    ///
    /// The merge engine renders recoverable errors as an error page and
    /// keeps going.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Conversion { .. } | Self::UnsupportedFormat { .. })
    }

    /// Check if this error aborts the whole batch.
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Check if this error is about an encrypted or password protected PDF.
    ///
    /// Matches the dedicated variant as well as parser reasons that mention
    /// encryption. File names are never inspected.
    pub fn is_encryption(&self) -> bool {
        match self {
            Self::EncryptedPdf { .. } => true,
            Self::SourceDocument { reason, .. } => mentions_encryption(reason),
            Self::Pdf(err) => mentions_encryption(&err.to_string()),
            _ => false,
        }
    }
}

/// Check whether an error message talks about encryption or passwords.
pub(crate) fn mentions_encryption(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("encrypt") || message.contains("decrypt") || message.contains("password")
}
