//! Axum route handlers for the Match API.

use axum::{
    extract::{rejection::JsonRejection, FromRef, Path, State},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::aggregate::MatchConfig;
use crate::matching::descriptors::{CandidateDescriptor, JobDescriptor, MatchResult};
use crate::matching::request::{MatchRequest, MatchResponse};
use crate::state::AppState;
use crate::store::{candidates, jobs};

/// Routes that need nothing but a `MatchConfig`.
pub fn routes<S>() -> Router<S>
where
    MatchConfig: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api/v1/match", post(handle_match))
}

/// POST /api/v1/match
///
/// Stateless scoring of a caller-supplied `{ job, candidates }` payload.
pub async fn handle_match(
    State(config): State<MatchConfig>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MatchResponse>, AppError> {
    let Json(payload) = payload?;
    let request = MatchRequest::from_value(payload)?;
    let matches = run_blocking(request, config).await?;
    Ok(Json(MatchResponse::new(matches)))
}

/// POST /api/v1/jobs/:id/match
///
/// Scores every stored candidate against a stored job.
pub async fn handle_match_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<MatchResponse>, AppError> {
    let job = jobs::get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let summaries = candidates::list_match_summaries(&state.db).await?;

    info!("Matching {} candidates for job: {}", summaries.len(), job.title);

    let request = MatchRequest {
        job: JobDescriptor::from(&job),
        candidates: summaries.into_iter().map(CandidateDescriptor::from).collect(),
    };
    let matches = run_blocking(request, state.matching.clone()).await?;

    info!(
        "Matched candidates. Top score: {}",
        matches.first().map_or(0, |m| m.match_score)
    );

    Ok(Json(MatchResponse::new(matches)))
}

/// Scoring is CPU-bound; keep it off the async worker threads.
async fn run_blocking(
    request: MatchRequest,
    config: MatchConfig,
) -> Result<Vec<MatchResult>, AppError> {
    tokio::task::spawn_blocking(move || request.run(&config))
        .await
        .map_err(|e| AppError::Internal(e.into()))
}
