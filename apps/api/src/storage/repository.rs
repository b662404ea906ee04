use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::models::snapshot::SavedSnapshot;
use crate::storage::backup::{decode_document, encode_document};
use crate::storage::KeyValueStore;

pub const DOCUMENT_KEY: &str = "resumeData";
pub const THEME_KEY: &str = "currentTheme";
pub const SNAPSHOTS_KEY: &str = "savedResumes";
pub const DARK_MODE_KEY: &str = "darkMode";

/// Typed access to the four keys the application persists.
#[derive(Clone)]
pub struct ResumeRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ResumeRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn load_document(&self) -> Result<Option<ResumeDocument>, AppError> {
        match self.store.get(DOCUMENT_KEY).await? {
            Some(raw) => decode_document(&raw).map(Some),
            None => Ok(None),
        }
    }

    pub async fn save_document(&self, doc: &ResumeDocument) -> Result<(), AppError> {
        let raw = encode_document(doc)?;
        self.store.set(DOCUMENT_KEY, &raw).await?;
        Ok(())
    }

    pub async fn load_theme(&self) -> Result<Option<String>, AppError> {
        Ok(self.store.get(THEME_KEY).await?)
    }

    pub async fn save_theme(&self, theme: &str) -> Result<(), AppError> {
        self.store.set(THEME_KEY, theme).await?;
        Ok(())
    }

    /// Saves document and theme together, the way every auto-save does.
    pub async fn save_session(&self, doc: &ResumeDocument, theme: &str) -> Result<(), AppError> {
        self.save_document(doc).await?;
        self.save_theme(theme).await
    }

    pub async fn load_snapshots(&self) -> Result<Vec<SavedSnapshot>, AppError> {
        match self.store.get(SNAPSHOTS_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| AppError::Parse(format!("Saved resumes are corrupted: {e}"))),
            None => Ok(Vec::new()),
        }
    }

    pub async fn save_snapshots(&self, snapshots: &[SavedSnapshot]) -> Result<(), AppError> {
        let raw = serde_json::to_string(snapshots)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode snapshots: {e}")))?;
        self.store.set(SNAPSHOTS_KEY, &raw).await?;
        info!("Persisted {} saved resume(s)", snapshots.len());
        Ok(())
    }

    pub async fn load_dark_mode(&self) -> Result<bool, AppError> {
        Ok(self.store.get(DARK_MODE_KEY).await?.as_deref() == Some("enabled"))
    }

    pub async fn save_dark_mode(&self, enabled: bool) -> Result<(), AppError> {
        let value = if enabled { "enabled" } else { "disabled" };
        self.store.set(DARK_MODE_KEY, value).await?;
        Ok(())
    }

    /// Startup read. Unreadable or corrupt data is logged and treated as absent.
    pub async fn restore_document(&self) -> Option<ResumeDocument> {
        match self.load_document().await {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Ignoring stored resume: {e}");
                None
            }
        }
    }
}
