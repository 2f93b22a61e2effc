//! Readiness analysis pipeline.
//!
//! Flow: input guard → extract resume text → build prompt → Gemini generate.
//!
//! Each stage is all-or-nothing. The first failing stage ends the run and is
//! reported as one [`AnalysisError`] variant; nothing is retried and no partial
//! result is ever returned.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::prompts::build_readiness_prompt;
use crate::extract::{extract_resume_text, ExtractionOutcome};
use crate::llm_client::{GeminiClient, LlmError};
use crate::models::submission::Submission;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("a resume and a job description are both required")]
    MissingInput,

    #[error("resume text could not be extracted")]
    ExtractionFailed,

    #[error("model call failed: {0}")]
    Model(#[from] LlmError),
}

/// A finished analysis. `response` is the model output, unvalidated.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub request_id: Uuid,
    pub model: &'static str,
    pub response: String,
}

/// Runs one analysis end to end.
pub async fn run_analysis(
    llm: &GeminiClient,
    submission: &Submission,
) -> Result<Analysis, AnalysisError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("analysis", %request_id);
    run_stages(llm, submission, request_id).instrument(span).await
}

async fn run_stages(
    llm: &GeminiClient,
    submission: &Submission,
    request_id: Uuid,
) -> Result<Analysis, AnalysisError> {
    if !submission.is_complete() {
        info!("Submission incomplete, skipping analysis");
        return Err(AnalysisError::MissingInput);
    }

    let resume_text = match extract_resume_text(submission.document.as_ref()).await {
        ExtractionOutcome::Extracted(text) => text,
        ExtractionOutcome::NoInput | ExtractionOutcome::Failed => {
            return Err(AnalysisError::ExtractionFailed)
        }
    };
    info!(
        resume_chars = resume_text.len(),
        job_description_chars = submission.job_description.len(),
        "Resume text extracted"
    );

    let prompt = build_readiness_prompt(&resume_text, &submission.job_description);

    let response = llm.generate(&prompt).await.map_err(|e| {
        warn!("Readiness analysis failed at the model call: {e}");
        AnalysisError::Model(e)
    })?;
    info!(response_chars = response.len(), "Readiness analysis complete");

    Ok(Analysis {
        request_id,
        model: crate::llm_client::MODEL,
        response,
    })
}
