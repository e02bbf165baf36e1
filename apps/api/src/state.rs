use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use axum::extract::FromRef;
use sqlx::PgPool;

use crate::communications::sender::EmailSender;
use crate::config::Config;
use crate::matching::aggregate::MatchConfig;
use crate::resumes::extractor::ResumeExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Pluggable resume extractor. Default: LlmResumeExtractor.
    pub extractor: Arc<dyn ResumeExtractor>,
    /// Pluggable email sender. Default: WebhookEmailSender, or DisabledEmailSender when unconfigured.
    pub mailer: Arc<dyn EmailSender>,
    pub config: Config,
    /// Derived once from `config` at startup.
    pub matching: MatchConfig,
}

impl FromRef<AppState> for MatchConfig {
    fn from_ref(state: &AppState) -> Self {
        state.matching.clone()
    }
}
