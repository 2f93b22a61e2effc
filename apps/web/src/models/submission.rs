use bytes::Bytes;

/// A resume file as received from the upload form. Lives for one request only.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Everything the user submitted with a single click of "Analyze Readiness".
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub document: Option<UploadedDocument>,
    pub job_description: String,
}

impl Submission {
    /// The pipeline only runs when both a document and a non-empty job
    /// description are present. Whitespace is content; it is not trimmed.
    pub fn is_complete(&self) -> bool {
        self.document.is_some() && !self.job_description.is_empty()
    }
}
