/// System prompt for resume field extraction. Enforces JSON-only output.
pub const RESUME_EXTRACT_SYSTEM: &str = "You are a precise resume parser for a recruiting team. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Never guess: return null (or an empty array) for anything the resume does not state.";

/// `{resume_text}` is replaced with the extracted document text.
pub const RESUME_EXTRACT_PROMPT: &str = r#"Extract candidate data from the resume below.

Return a JSON object with exactly these keys:
{
  "full_name": string | null,
  "email": string | null,
  "phone": string | null,
  "location": string | null,
  "skills": [string],
  "total_experience": string | null,   // total years of professional experience as a number, e.g. "4.5"
  "links": [{ "link_name": string | null, "link_url": string | null }],
  "education": [{ "institution": string | null, "degree": string | null, "year": string | null }],
  "employment_history": [{ "company": string | null, "title": string | null, "duration": string | null }],
  "projects": [{ "name": string | null, "description": string | null, "tools": string | null }],
  "summary": string | null
}

RESUME:
{resume_text}"#;
