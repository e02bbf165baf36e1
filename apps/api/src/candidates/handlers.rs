//! Axum route handlers for the Candidates API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::candidates::search::{filter_candidates, SearchFilter, SearchQuery};
use crate::candidates::stats::{compute_dashboard_stats, DashboardStats};
use crate::errors::AppError;
use crate::models::candidate::{CandidateRow, CandidateUpdate, NewCandidate};
use crate::state::AppState;
use crate::store::candidates;

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    Ok(Json(candidates::list_candidates(&state.db).await?))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateRow>, AppError> {
    let candidate = candidates::get_candidate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    Ok(Json(candidate))
}

/// POST /api/v1/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(request): Json<NewCandidate>,
) -> Result<(StatusCode, Json<CandidateRow>), AppError> {
    validate_identity(Some(&request.full_name), Some(&request.email))?;

    let candidate = candidates::create_candidate(&state.db, &request).await?;
    info!("Created candidate {}", candidate.id);
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// PATCH /api/v1/candidates/:id
pub async fn handle_update_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CandidateUpdate>,
) -> Result<Json<CandidateRow>, AppError> {
    validate_identity(request.full_name.as_deref(), request.email.as_deref())?;

    let candidate = candidates::update_candidate(&state.db, id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    Ok(Json(candidate))
}

/// DELETE /api/v1/candidates/:id
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !candidates::delete_candidate(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Candidate {id} not found")));
    }
    info!("Deleted candidate {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/candidates/search?q=&min_experience=&max_experience=&skills=
pub async fn handle_search_candidates(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let filter = SearchFilter::from(query);
    if filter.min_years > filter.max_years {
        return Err(AppError::Validation(
            "min_experience cannot exceed max_experience".to_string(),
        ));
    }

    let all = candidates::list_candidates(&state.db).await?;
    Ok(Json(filter_candidates(all, &filter)))
}

/// GET /api/v1/dashboard/stats
pub async fn handle_dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, AppError> {
    let all = candidates::list_candidates(&state.db).await?;
    Ok(Json(compute_dashboard_stats(&all, Utc::now())))
}

/// Checks name/email when present. Creation passes both; updates pass whichever changed.
fn validate_identity(full_name: Option<&str>, email: Option<&str>) -> Result<(), AppError> {
    if full_name.is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("full_name cannot be empty".to_string()));
    }
    if let Some(email) = email {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Validation(format!("'{email}' is not a valid email")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_requires_name_and_email() {
        assert!(validate_identity(Some("Ada"), Some("ada@example.com")).is_ok());
        assert!(validate_identity(Some("  "), Some("ada@example.com")).is_err());
        assert!(validate_identity(Some("Ada"), Some("")).is_err());
        assert!(validate_identity(Some("Ada"), Some("not-an-email")).is_err());
    }

    #[test]
    fn test_identity_skips_absent_fields() {
        assert!(validate_identity(None, None).is_ok());
        assert!(validate_identity(None, Some("ada@example.com")).is_ok());
    }
}
