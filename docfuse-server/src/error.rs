//! HTTP error responses.
//!
//! Every failure becomes a single `text/plain` response; a request either
//! gets the whole merged PDF or one of these, never both.

use axum::extract::multipart::MultipartError;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use docfuse::{DocFuseError, ENCRYPTED_PDF_HINT};

/// Errors a request handler can end with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request carried no file the server can convert.
    #[error("No files to merge")]
    NoFiles,

    /// The multipart body could not be read.
    #[error("Invalid upload: {}", .0.body_text())]
    Multipart(#[from] MultipartError),

    /// The merge ran past the configured limit.
    #[error("Merge timed out after {0} seconds")]
    Timeout(u64),

    /// The merge engine failed.
    #[error(transparent)]
    Merge(#[from] DocFuseError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoFiles | Self::Merge(DocFuseError::EmptyBatch) => StatusCode::BAD_REQUEST,
            Self::Multipart(err) => err.status(),
            Self::Timeout(_) | Self::Merge(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Merge(err) if err.is_encryption() => ENCRYPTED_PDF_HINT.to_string(),
            Self::Merge(DocFuseError::EmptyBatch) => self.to_string(),
            Self::Merge(err) => format!("Failed to merge files: {err}"),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "merge request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "merge request rejected");
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}
