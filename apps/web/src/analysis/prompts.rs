// Prompt template for the readiness analysis. The model output is shown to the
// user verbatim, so the section list below is the whole output contract.

/// The six sections the model is asked to produce, in order.
pub const OUTPUT_SECTIONS: [&str; 6] = [
    "1. **Readiness Score**: (Give a number between 0-100)",
    "2. **Readiness Level**: (Choose one: Beginner, Intermediate, or Interview-Ready)",
    "3. **Strengths**: (List 3 bullet points)",
    "4. **Weaknesses**: (List 3 bullet points of missing skills or weak areas)",
    "5. **Personalized Improvement Plan**: (Step-by-step guide to fix weaknesses)",
    "6. **Estimated Timeline**: (Time required to become interview-ready, e.g., \"2 weeks\")",
];

/// Builds the readiness prompt. Pure: identical inputs give a byte-identical
/// prompt. Performs no validation of its inputs, and braces inside them are
/// copied through untouched.
pub fn build_readiness_prompt(resume_text: &str, job_description: &str) -> String {
    let output_format = OUTPUT_SECTIONS.join("\n");
    format!(
        r#"You are an expert Technical Interviewer and Career Coach.
Review the following Resume against the Job Description.

RESUME TEXT:
{resume_text}

JOB DESCRIPTION:
{job_description}

Your goal is to assess interview readiness in under 2 minutes.

STRICTLY FOLLOW THIS OUTPUT FORMAT:
{output_format}

Be honest, direct, and constructive."#
    )
}
