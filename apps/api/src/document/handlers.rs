//! Axum route handlers for résumé optimization and PDF rendering.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::document::extract::extract_text;
use crate::document::layout::PageGeometry;
use crate::document::render::{render_to_bytes, DEFAULT_OUTPUT_NAME};
use crate::errors::{require_text, AppError};
use crate::models::resume::{RenderableDocument, ResumeFields};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Multipart form: `resume` (PDF file) + `job_description` (text).
#[derive(Debug, Default)]
pub struct OptimizeForm {
    pub resume: Option<Bytes>,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub optimized_resume: String,
    pub extracted_chars: usize,
}

#[derive(Debug, Deserialize)]
pub struct RenderTextRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub lines: Option<Vec<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/optimize
pub async fn handle_optimize(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OptimizeResponse>, AppError> {
    let (optimized_resume, extracted_chars) = optimize(&state, multipart).await?;
    Ok(Json(OptimizeResponse {
        optimized_resume,
        extracted_chars,
    }))
}

/// POST /api/v1/resume/optimize/pdf
pub async fn handle_optimize_pdf(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (optimized, _) = optimize(&state, multipart).await?;
    let bytes = render_blocking(
        RenderableDocument::from_text(&optimized),
        state.page_geometry.clone(),
    )
    .await?;
    Ok(pdf_download(bytes, DEFAULT_OUTPUT_NAME))
}

/// POST /api/v1/render/text
pub async fn handle_render_text(
    State(state): State<AppState>,
    Json(request): Json<RenderTextRequest>,
) -> Result<Response, AppError> {
    let document = match (request.lines, request.text) {
        (Some(lines), _) => RenderableDocument::Lines(lines),
        (None, Some(text)) => RenderableDocument::from_text(&text),
        (None, None) => {
            return Err(AppError::Validation(
                "either text or lines is required".to_string(),
            ))
        }
    };
    let bytes = render_blocking(document, state.page_geometry.clone()).await?;
    Ok(pdf_download(bytes, "document.pdf"))
}

/// POST /api/v1/render/resume
pub async fn handle_render_resume(
    State(state): State<AppState>,
    Json(fields): Json<ResumeFields>,
) -> Result<Response, AppError> {
    require_text("name", &fields.name)?;
    let bytes = render_blocking(
        RenderableDocument::Resume(fields),
        state.page_geometry.clone(),
    )
    .await?;
    Ok(pdf_download(bytes, "resume.pdf"))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Shared optimize flow: read form → extract → one completion call.
/// Returns the optimized text and the number of extracted characters.
async fn optimize(state: &AppState, multipart: Multipart) -> Result<(String, usize), AppError> {
    let form = read_optimize_form(multipart).await?;
    require_text("job_description", &form.job_description)?;
    let payload = form
        .resume
        .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    // Extraction is CPU-bound; keep it off the async executor.
    let resume = tokio::task::spawn_blocking(move || extract_text(&payload))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))?;
    info!("Extracted {} chars from uploaded resume", resume.source_text.len());

    let optimized = state
        .advisor
        .optimize_resume(&form.job_description, &resume)
        .await?;
    Ok((optimized, resume.source_text.chars().count()))
}

async fn read_optimize_form(mut multipart: Multipart) -> Result<OptimizeForm, AppError> {
    let mut form = OptimizeForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("resume") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read resume: {e}")))?;
                form.resume = Some(data);
            }
            Some("job_description") => {
                form.job_description = field.text().await.map_err(|e| {
                    AppError::Validation(format!("could not read job_description: {e}"))
                })?;
            }
            _ => {}
        }
    }
    Ok(form)
}

async fn render_blocking(
    document: RenderableDocument,
    geometry: PageGeometry,
) -> Result<Vec<u8>, AppError> {
    let bytes = tokio::task::spawn_blocking(move || render_to_bytes(&document, &geometry))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;
    Ok(bytes)
}

fn pdf_download(bytes: Vec<u8>, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
