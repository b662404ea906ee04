use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::export::ExportSink;
use crate::session::ResumeSession;
use crate::storage::ResumeRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one live session. Held for the whole of each operation so there is
    /// never more than one mutator.
    pub session: Arc<Mutex<ResumeSession>>,
    pub repo: ResumeRepository,
    /// Pluggable export target. Default: files under EXPORT_DIR; S3 when configured.
    pub exporter: Arc<dyn ExportSink>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        session: ResumeSession,
        repo: ResumeRepository,
        exporter: Arc<dyn ExportSink>,
        config: Config,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            repo,
            exporter,
            config,
        }
    }
}
