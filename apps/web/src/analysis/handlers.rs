//! Axum route handlers for the readiness page and the JSON analysis API.

use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::Html,
    Json,
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::analysis::pipeline::run_analysis;
use crate::errors::AppError;
use crate::models::submission::{Submission, UploadedDocument};
use crate::presentation::{
    IndexTemplate, ScoringFactor, View, SCORING_LOGIC, UPLOAD_FAILED_MESSAGE,
};
use crate::state::AppState;

/// Multipart field carrying the resume file.
pub const RESUME_FIELD: &str = "resume";
/// Multipart field carrying the job description text.
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub request_id: Uuid,
    pub model: &'static str,
    /// Model output, verbatim.
    pub analysis: String,
    pub scoring_logic: &'static [ScoringFactor],
}

/// Reads the upload form. A file part with no filename and no bytes is what
/// browsers send when nothing was chosen, so it counts as no document.
pub async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            RESUME_FIELD => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                submission.document = Some(UploadedDocument {
                    filename,
                    content_type,
                    bytes,
                });
            }
            JOB_DESCRIPTION_FIELD => {
                submission.job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// GET /
pub async fn handle_index() -> Result<Html<String>, AppError> {
    let page = IndexTemplate::new(&View::Idle, "").render()?;
    Ok(Html(page))
}

/// POST /analyze
///
/// Runs the pipeline and re-renders the page with its outcome. Rejected
/// uploads, missing input, unreadable PDFs and model failures are all shown
/// on the page, never as an error status.
pub async fn handle_analyze_page(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            warn!("Upload rejected: {e}");
            let view = View::Error(UPLOAD_FAILED_MESSAGE.to_string());
            return Ok(Html(IndexTemplate::new(&view, "").render()?));
        }
    };
    let outcome = run_analysis(&state.llm, &submission).await;
    let view = View::from_outcome(&outcome);
    let page = IndexTemplate::new(&view, &submission.job_description).render()?;
    Ok(Html(page))
}

/// POST /api/v1/analyze
pub async fn handle_analyze_api(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let submission = read_submission(multipart).await?;
    let analysis = run_analysis(&state.llm, &submission).await?;

    Ok(Json(AnalyzeResponse {
        request_id: analysis.request_id,
        model: analysis.model,
        analysis: analysis.response,
        scoring_logic: &SCORING_LOGIC,
    }))
}
