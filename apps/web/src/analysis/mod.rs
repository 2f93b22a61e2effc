// Readiness analysis: resume + job description in, Gemini assessment out.
// All LLM calls go through llm_client; no direct Gemini calls here.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
