pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::communications::handlers as communications;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Candidates
        .route(
            "/api/v1/candidates",
            get(candidates::handle_list_candidates).post(candidates::handle_create_candidate),
        )
        .route(
            "/api/v1/candidates/search",
            get(candidates::handle_search_candidates),
        )
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handle_get_candidate)
                .patch(candidates::handle_update_candidate)
                .delete(candidates::handle_delete_candidate),
        )
        .route(
            "/api/v1/candidates/:id/resume-url",
            get(resumes::handle_resume_url),
        )
        .route(
            "/api/v1/candidates/:id/communications",
            get(communications::handle_list_communications)
                .post(communications::handle_send_communication),
        )
        .route(
            "/api/v1/dashboard/stats",
            get(candidates::handle_dashboard_stats),
        )
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .patch(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .route("/api/v1/jobs/:id/match", post(matching::handle_match_job))
        // Resumes
        .route("/api/v1/resumes/parse", post(resumes::handle_parse_resume))
        .route(
            "/api/v1/resumes/upload",
            post(resumes::handle_upload_resume).layer(DefaultBodyLimit::max(body_limit)),
        )
        // Match engine
        .merge(matching::routes())
        .with_state(state)
}
