//! Resume text extraction.
//!
//! Turns an uploaded PDF into one plain-text string: the text of every page,
//! in page order, concatenated with no separator. Every failure mode (not a
//! PDF, corrupt structure, a page that cannot be decoded, a panic inside the
//! parser, or simply no text at all) collapses into [`ExtractionOutcome::Failed`].

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::models::submission::UploadedDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// No document was supplied.
    NoInput,
    /// The document could not be read, or it yielded no text.
    Failed,
    /// Non-empty page text, concatenated in page order.
    Extracted(String),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0:?}")]
    Pdf(#[from] pdf_extract::OutputError),
}

/// Extracts the text of every page and joins it with no separator.
/// Blocking and CPU bound.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)?;
    debug!("Extracted {} PDF page(s)", pages.len());
    Ok(pages.concat())
}

/// Runs extraction on the blocking pool. Never panics and never returns
/// partial text.
pub async fn extract_resume_text(document: Option<&UploadedDocument>) -> ExtractionOutcome {
    let Some(document) = document else {
        return ExtractionOutcome::NoInput;
    };

    let bytes = document.bytes.clone();
    let joined = tokio::task::spawn_blocking(move || extract_pdf_text(&bytes)).await;

    match joined {
        Ok(Ok(text)) if !text.is_empty() => ExtractionOutcome::Extracted(text),
        Ok(Ok(_)) => {
            warn!(filename = %document.filename, "PDF contained no extractable text");
            ExtractionOutcome::Failed
        }
        Ok(Err(e)) => {
            warn!(
                filename = %document.filename,
                content_type = ?document.content_type,
                "{e}"
            );
            ExtractionOutcome::Failed
        }
        Err(e) => {
            error!(filename = %document.filename, "PDF extraction task aborted: {e}");
            ExtractionOutcome::Failed
        }
    }
}
