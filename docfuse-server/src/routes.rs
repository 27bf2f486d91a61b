//! HTTP routes.
//!
//! - `GET /` - upload page
//! - `POST /merge` - merge the uploaded files into one PDF
//! - `GET /api/formats` - accepted extensions per category
//! - `GET /health` - liveness probe

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use docfuse::{
    Classifier, FileCategory, InputFile, MergeConfig, Merger, QualityTier, UnrecognizedPolicy,
    sort_natural,
};

use crate::error::ApiError;

const INDEX_HTML: &str = include_str!("../static/index.html");
const OUTPUT_FILENAME: &str = "merged.pdf";

/// Shared, read-only state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<MergeConfig>,
    classifier: Classifier,
    merge_timeout: Duration,
}

impl AppState {
    /// Build the state from a base merge configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: MergeConfig, merge_timeout: Duration) -> docfuse::Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier: Classifier::new(config.categories.clone()),
            config: Arc::new(config),
            merge_timeout,
        })
    }
}

/// Build the application router.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/merge", post(merge))
        .route("/api/formats", get(formats))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": docfuse::VERSION,
    }))
}

async fn formats(State(state): State<AppState>) -> Json<BTreeMap<&'static str, Vec<String>>> {
    let map = FileCategory::SUPPORTED
        .iter()
        .map(|category| {
            let extensions = state
                .classifier
                .extensions_for(*category)
                .into_iter()
                .map(str::to_string)
                .collect();
            (category.as_str(), extensions)
        })
        .collect();
    Json(map)
}

/// Fields read from a merge request.
#[derive(Debug, Default)]
struct Upload {
    files: Vec<InputFile>,
    quality: Option<String>,
    natural_order: bool,
}

async fn read_upload(state: &AppState, multipart: &mut Multipart) -> Result<Upload, ApiError> {
    let mut upload = Upload::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "files" | "files[]" => {
                let name = field.file_name().unwrap_or("").to_string();
                let declared_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;

                if name.is_empty() && bytes.is_empty() {
                    continue;
                }
                if state.config.unrecognized == UnrecognizedPolicy::Skip
                    && !state.classifier.is_supported(&name)
                {
                    tracing::warn!(name = %name, "dropping file of unrecognized type");
                    continue;
                }

                let mut file = InputFile::new(name, bytes.to_vec());
                if let Some(declared_type) = declared_type {
                    file = file.with_declared_type(declared_type);
                }
                upload.files.push(file);
            }
            "quality" => upload.quality = Some(field.text().await?),
            "order" => upload.natural_order = field.text().await?.trim() == "natural",
            other => tracing::debug!(field = other, "ignoring multipart field"),
        }
    }

    Ok(upload)
}

async fn merge(State(state): State<AppState>, mut multipart: Multipart) -> Result<Response, ApiError> {
    let mut upload = read_upload(&state, &mut multipart).await?;
    if upload.files.is_empty() {
        return Err(ApiError::NoFiles);
    }
    if upload.natural_order {
        sort_natural(&mut upload.files);
    }

    let quality = QualityTier::parse_lenient(upload.quality.as_deref());
    tracing::info!(files = upload.files.len(), quality = quality.as_str(), "merge requested");

    let merger = Merger::new(state.config.as_ref().clone().with_quality(quality))?;
    let output = tokio::time::timeout(state.merge_timeout, merger.merge(upload.files))
        .await
        .map_err(|_| ApiError::Timeout(state.merge_timeout.as_secs()))??;

    tracing::info!(
        pages = output.statistics.total_pages,
        size = %output.statistics.format_output_size(),
        "merge served"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{OUTPUT_FILENAME}\""),
            ),
        ],
        output.bytes,
    )
        .into_response())
}
