mod candidates;
mod communications;
mod config;
mod errors;
mod jobs;
mod llm_client;
mod matching;
mod models;
mod resumes;
mod routes;
mod state;
mod store;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::communications::sender::build_email_sender;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resumes::extractor::{LlmResumeExtractor, ResumeExtractor};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::create_pool;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruit API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.db_max_connections).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Initialize resume extractor
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    let extractor: Arc<dyn ResumeExtractor> = Arc::new(LlmResumeExtractor(llm));
    info!(
        "Resume extractor initialized ({}, model: {})",
        extractor.backend(),
        llm_client::MODEL
    );

    let mailer = build_email_sender(&config)?;
    info!("Email sender initialized ({})", mailer.backend());

    let matching = config.match_config();
    info!(
        "Match engine: {:?} skill matching, parallel above {} candidates",
        matching.skill_mode, matching.parallel_threshold
    );

    let state = AppState {
        db,
        s3,
        extractor,
        mailer,
        config: config.clone(),
        matching,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "recruit-static",
    );

    let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    // MinIO serves buckets by path, not by subdomain
    let s3_config = aws_sdk_s3::config::Builder::from(&shared)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
