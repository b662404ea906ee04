mod config;
mod errors;
mod export;
mod form;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod storage;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, S3Config};
use crate::export::{ExportSink, FileExportSink, S3ExportSink};
use crate::routes::build_router;
use crate::session::ResumeSession;
use crate::state::AppState;
use crate::storage::{KeyValueStore, MemoryStore, RedisStore, ResumeRepository};

const REDIS_KEY_PREFIX: &str = "resumefy";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumefy API v{}", env!("CARGO_PKG_VERSION"));

    // Key-value store: Redis when configured, otherwise process memory
    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisStore::open(url, REDIS_KEY_PREFIX)?),
        None => {
            info!("REDIS_URL not set; using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };
    let repo = ResumeRepository::new(store);

    // Export target
    let exporter: Arc<dyn ExportSink> = match &config.s3 {
        Some(s3) => {
            let client = build_s3_client(s3).await;
            info!("S3 export sink initialized (bucket: {})", s3.bucket);
            Arc::new(S3ExportSink::new(client, s3.bucket.clone()))
        }
        None => {
            info!("Exporting to {}", config.export_dir.display());
            Arc::new(FileExportSink::new(config.export_dir.clone()))
        }
    };

    let session = ResumeSession::restore(&repo).await;
    info!("Session restored (theme: {})", session.theme);

    let state = AppState::new(session, repo, exporter, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once a hosted frontend exists

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &S3Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "resumefy-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
