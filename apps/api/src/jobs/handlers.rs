//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobRow, JobUpdate, NewJob};
use crate::state::AppState;
use crate::store::jobs;

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(jobs::list_jobs(&state.db).await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = jobs::get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<NewJob>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    validate_experience_band(request.min_experience, request.max_experience)?;

    let job = jobs::create_job(&state.db, &request).await?;
    info!("Created job {} ({})", job.id, job.title);
    Ok((StatusCode::CREATED, Json(job)))
}

/// PATCH /api/v1/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<JobUpdate>,
) -> Result<Json<JobRow>, AppError> {
    if request.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let existing = jobs::get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    let (min, max) = resulting_band(&request, &existing);
    validate_experience_band(min, max)?;

    let job = jobs::update_job(&state.db, id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !jobs::delete_job(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    info!("Deleted job {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// The experience band the job will have once `update` is applied.
fn resulting_band(update: &JobUpdate, existing: &JobRow) -> (Option<i32>, Option<i32>) {
    (
        update.min_experience.unwrap_or(existing.min_experience),
        update.max_experience.unwrap_or(existing.max_experience),
    )
}

fn validate_experience_band(min: Option<i32>, max: Option<i32>) -> Result<(), AppError> {
    if min.is_some_and(|m| m < 0) || max.is_some_and(|m| m < 0) {
        return Err(AppError::Validation(
            "experience bounds cannot be negative".to_string(),
        ));
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(AppError::Validation(format!(
                "min_experience ({min}) cannot exceed max_experience ({max})"
            )));
        }
    }
    Ok(())
}
