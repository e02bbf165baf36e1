//! Axum route handlers for resume ingestion.

use std::time::Duration;

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateRow, NewCandidate};
use crate::resumes::draft::ResumeDraft;
use crate::resumes::storage::{presigned_resume_url, put_resume, StoredResume};
use crate::resumes::text::{extract_text, ResumeFormat};
use crate::state::AppState;
use crate::store::candidates::{create_candidate, get_candidate};

const FILE_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    #[serde(alias = "resumeText")]
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub success: bool,
    pub data: ResumeDraft,
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadOptions {
    /// Create a candidate record from the draft right away.
    #[serde(default)]
    pub create: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub path: String,
    pub file_name: String,
    #[serde(rename = "text_length")]
    pub text_length: usize,
    pub draft: Option<ResumeDraft>,
    pub candidate: Option<CandidateRow>,
    /// Why `?create=true` did not produce a candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeUrlResponse {
    pub url: String,
    pub expires_in_secs: u64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/parse
///
/// Runs AI extraction over already-extracted resume text.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseResumeRequest>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resumeText cannot be empty".to_string()));
    }

    let draft = state.extractor.extract(&request.resume_text).await?;

    Ok(Json(ParseResumeResponse {
        success: true,
        data: draft,
    }))
}

/// POST /api/v1/resumes/upload
///
/// Multipart upload (field `file`): store → extract text → AI draft.
/// With `?create=true` the draft is saved as a new candidate in `screening`;
/// when that is not possible the stored path and draft still come back, with a
/// `notice` explaining why.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Query(options): Query<UploadOptions>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (file_name, body) = read_file_field(&mut multipart).await?;

    if body.is_empty() {
        return Err(AppError::Validation(format!("{file_name} is empty")));
    }
    if body.len() > state.config.max_upload_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "{file_name} exceeds the {} byte limit",
            state.config.max_upload_bytes
        )));
    }

    let format = ResumeFormat::from_file_name(&file_name)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let stored = put_resume(
        &state.s3,
        &state.config.s3_bucket,
        &file_name,
        format,
        body.clone(),
    )
    .await?;

    let text = match extract_text(body, format).await {
        Ok(text) => text,
        Err(e) => {
            // The file is stored; the recruiter can still fill the record by hand.
            warn!("Text extraction failed for {}: {e}", stored.path);
            String::new()
        }
    };

    let draft = if text.is_empty() {
        None
    } else {
        Some(state.extractor.extract(&text).await?)
    };

    let (candidate, notice) = match plan_candidate(draft.as_ref(), options.create, &stored, &text) {
        CandidatePlan::Create(new_candidate) => {
            let row = create_candidate(&state.db, &new_candidate).await?;
            info!("Created candidate {} from upload {}", row.id, stored.path);
            (Some(row), None)
        }
        CandidatePlan::NeedsReview(notice) => {
            warn!("Upload {} not turned into a candidate: {notice}", stored.path);
            (None, Some(notice))
        }
        CandidatePlan::Skip => (None, None),
    };

    Ok(Json(UploadResponse {
        path: stored.path,
        file_name: stored.file_name,
        text_length: text.chars().count(),
        draft,
        candidate,
        notice,
    }))
}

/// GET /api/v1/candidates/:id/resume-url
pub async fn handle_resume_url(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<ResumeUrlResponse>, AppError> {
    let candidate = get_candidate(&state.db, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    let key = candidate
        .resume_file_path
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} has no resume")))?;

    let ttl = state.config.resume_url_ttl_secs;
    let url = presigned_resume_url(
        &state.s3,
        &state.config.s3_bucket,
        &key,
        Duration::from_secs(ttl),
    )
    .await?;

    Ok(Json(ResumeUrlResponse {
        url,
        expires_in_secs: ttl,
    }))
}

/// What to do with an upload's draft once the file is stored.
#[derive(Debug)]
enum CandidatePlan {
    Create(NewCandidate),
    /// The file and draft are returned; the recruiter finishes the record by hand.
    NeedsReview(String),
    Skip,
}

fn plan_candidate(
    draft: Option<&ResumeDraft>,
    create: bool,
    stored: &StoredResume,
    text: &str,
) -> CandidatePlan {
    if !create {
        return CandidatePlan::Skip;
    }
    let Some(draft) = draft else {
        return CandidatePlan::NeedsReview(format!(
            "No text could be extracted from {}",
            stored.file_name
        ));
    };

    let new_candidate = draft.clone().into_new_candidate(stored, text);
    if new_candidate.email.trim().is_empty() {
        return CandidatePlan::NeedsReview(format!(
            "No email found in {}; review the draft and create the candidate manually",
            stored.file_name
        ));
    }
    CandidatePlan::Create(new_candidate)
}

async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("file field has no file name".to_string()))?;
        let body = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(e.body_text()))?;
        return Ok((file_name, body));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> StoredResume {
        StoredResume {
            path: "uploads/1700000000000-k2j4h5g6f.pdf".to_string(),
            file_name: "priya_cv.pdf".to_string(),
        }
    }

    fn draft(email: Option<&str>) -> ResumeDraft {
        ResumeDraft {
            full_name: Some("Priya Nair".to_string()),
            email: email.map(str::to_string),
            skills: vec!["Python".to_string()],
            ..ResumeDraft::default()
        }
    }

    #[test]
    fn test_upload_without_create_skips_candidate() {
        let plan = plan_candidate(Some(&draft(Some("p@example.com"))), false, &stored(), "text");
        assert!(matches!(plan, CandidatePlan::Skip));
    }

    #[test]
    fn test_upload_with_email_creates_candidate() {
        let plan = plan_candidate(Some(&draft(Some("p@example.com"))), true, &stored(), "text");
        let CandidatePlan::Create(candidate) = plan else {
            panic!("expected a candidate, got {plan:?}");
        };
        assert_eq!(candidate.email, "p@example.com");
        assert_eq!(candidate.resume_file_path.as_deref(), Some(stored().path.as_str()));
    }

    #[test]
    fn test_missing_email_keeps_upload_for_review() {
        let plan = plan_candidate(Some(&draft(None)), true, &stored(), "text");
        let CandidatePlan::NeedsReview(notice) = plan else {
            panic!("expected review, got {plan:?}");
        };
        assert!(notice.contains("priya_cv.pdf"));
    }

    #[test]
    fn test_review_response_still_carries_path_and_draft() {
        let response = UploadResponse {
            path: stored().path,
            file_name: stored().file_name,
            text_length: 4,
            draft: Some(draft(None)),
            candidate: None,
            notice: Some("No email found".to_string()),
        };
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["path"], "uploads/1700000000000-k2j4h5g6f.pdf");
        assert_eq!(body["fileName"], "priya_cv.pdf");
        assert_eq!(body["text_length"], 4);
        assert_eq!(body["draft"]["full_name"], "Priya Nair");
        assert!(body["candidate"].is_null());
        assert_eq!(body["notice"], "No email found");
    }

    #[test]
    fn test_no_text_means_nothing_to_create() {
        let plan = plan_candidate(None, true, &stored(), "");
        assert!(matches!(plan, CandidatePlan::NeedsReview(_)));
    }
}
