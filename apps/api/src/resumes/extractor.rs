//! Resume extraction — pluggable, trait-based AI field extraction.
//!
//! Default: `LlmResumeExtractor` (Claude via `LlmClient`).
//! `AppState` holds an `Arc<dyn ResumeExtractor>` so tests and alternative
//! providers can swap the backend without touching handlers.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::resumes::draft::ResumeDraft;
use crate::resumes::prompts::{RESUME_EXTRACT_PROMPT, RESUME_EXTRACT_SYSTEM};

/// Longest resume text sent to the model, in characters.
pub const MAX_RESUME_CHARS: usize = 60_000;
const EXTRACTION_TEMPERATURE: f32 = 0.1;

#[async_trait]
pub trait ResumeExtractor: Send + Sync {
    async fn extract(&self, resume_text: &str) -> Result<ResumeDraft, AppError>;

    /// Short label for logs, e.g. "llm".
    fn backend(&self) -> &'static str;
}

pub struct LlmResumeExtractor(pub LlmClient);

#[async_trait]
impl ResumeExtractor for LlmResumeExtractor {
    async fn extract(&self, resume_text: &str) -> Result<ResumeDraft, AppError> {
        let text = truncate_chars(resume_text, MAX_RESUME_CHARS);
        let prompt = RESUME_EXTRACT_PROMPT.replace("{resume_text}", text);

        let draft: ResumeDraft = self
            .0
            .call_json(&prompt, RESUME_EXTRACT_SYSTEM, EXTRACTION_TEMPERATURE)
            .await
            .map_err(|e| AppError::Llm(format!("Resume extraction failed: {e}")))?;

        info!(
            "Extracted resume draft: {} skills, {} positions",
            draft.skills.len(),
            draft.employment_history.len()
        );
        Ok(draft)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Cuts `text` to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
