//! Server-rendered single page.
//!
//! The page has one form and one result area. `GET /` renders it idle; every
//! submission re-renders it with the outcome of that run. While a run is in
//! flight the browser shows the progress message and keeps the button
//! disabled (see `templates/index.html`).

use askama::Template;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use serde::Serialize;

use crate::analysis::pipeline::{Analysis, AnalysisError};

pub const MISSING_INPUT_MESSAGE: &str = "Please upload a resume AND paste a job description.";
pub const EXTRACTION_FAILED_MESSAGE: &str =
    "Could not read the PDF. Please try a standard text-based PDF.";
pub const MODEL_FAILED_MESSAGE: &str = "Analysis failed. Please try again in a moment.";
pub const UPLOAD_FAILED_MESSAGE: &str =
    "The upload could not be read. Please attach a PDF under the size limit and try again.";
pub const PROGRESS_MESSAGE: &str = "AI is analyzing your profile... (Approx 10 seconds)";

/// One factor of the static "How was this calculated?" panel. The panel is
/// fixed copy; it is never derived from the model output.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoringFactor {
    pub name: &'static str,
    pub description: &'static str,
}

pub const SCORING_LOGIC: [ScoringFactor; 4] = [
    ScoringFactor {
        name: "Keyword Matching",
        description: "We compared skills in your resume vs. the job description.",
    },
    ScoringFactor {
        name: "Experience Relevance",
        description: "We checked if your past projects align with the role.",
    },
    ScoringFactor {
        name: "Formatting & Clarity",
        description: "Professional structure contributes to the score.",
    },
    ScoringFactor {
        name: "Gap Analysis",
        description: "Missing critical skills lower the readiness level.",
    },
];

/// What the result area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Idle,
    Warning(String),
    Error(String),
    /// Rendered HTML of the model response.
    Success(String),
}

impl View {
    pub fn from_outcome(outcome: &Result<Analysis, AnalysisError>) -> Self {
        match outcome {
            Ok(analysis) => View::Success(render_markdown(&analysis.response)),
            Err(AnalysisError::MissingInput) => View::Warning(MISSING_INPUT_MESSAGE.to_string()),
            Err(AnalysisError::ExtractionFailed) => {
                View::Error(EXTRACTION_FAILED_MESSAGE.to_string())
            }
            Err(AnalysisError::Model(_)) => View::Error(MODEL_FAILED_MESSAGE.to_string()),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub view: &'a View,
    pub job_description: &'a str,
    pub progress_message: &'a str,
    pub scoring_logic: &'a [ScoringFactor],
}

impl<'a> IndexTemplate<'a> {
    pub fn new(view: &'a View, job_description: &'a str) -> Self {
        Self {
            view,
            job_description,
            progress_message: PROGRESS_MESSAGE,
            scoring_logic: &SCORING_LOGIC,
        }
    }
}

/// URL schemes a rendered link or image may point at. Relative URLs carry no
/// scheme and are kept.
const ALLOWED_URL_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Renders model Markdown to HTML. Raw HTML in the model output is emitted as
/// escaped text and link or image destinations outside
/// [`ALLOWED_URL_SCHEMES`] are emptied, so the result is safe to embed
/// unescaped.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::Start(tag) => Event::Start(sanitize_tag(tag)),
        Event::End(tag) => Event::End(sanitize_tag(tag)),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn sanitize_tag(tag: Tag<'_>) -> Tag<'_> {
    match tag {
        Tag::Link(kind, dest, title) => Tag::Link(kind, sanitize_destination(dest), title),
        Tag::Image(kind, dest, title) => Tag::Image(kind, sanitize_destination(dest), title),
        other => other,
    }
}

fn sanitize_destination(dest: CowStr<'_>) -> CowStr<'_> {
    if is_allowed_destination(&dest) {
        dest
    } else {
        CowStr::Borrowed("")
    }
}

fn is_allowed_destination(dest: &str) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme.
    let cleaned: String = dest
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    match cleaned.split_once(':') {
        Some((scheme, _))
            if !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            ALLOWED_URL_SCHEMES
                .iter()
                .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
        }
        _ => true,
    }
}
