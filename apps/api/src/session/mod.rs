// The live resume session. Exactly one exists per process, held in
// `AppState` behind an async mutex; every mutation runs with the lock held.

pub mod handlers;
pub mod service;
pub mod suggestions;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::resume::ResumeDocument;
use crate::render::{themes, DEFAULT_THEME};
use crate::storage::ResumeRepository;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSession {
    pub document: ResumeDocument,
    pub theme: String,
    pub auto_save: bool,
    pub dark_mode: bool,
}

impl Default for ResumeSession {
    fn default() -> Self {
        Self {
            document: ResumeDocument::default(),
            theme: DEFAULT_THEME.to_string(),
            auto_save: true,
            dark_mode: false,
        }
    }
}

/// Partial update of the session toggles.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub auto_save: Option<bool>,
    pub dark_mode: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub auto_save: bool,
    pub dark_mode: bool,
}

impl ResumeSession {
    /// Rebuilds the session from the store. Anything unreadable is logged and
    /// replaced by its default.
    pub async fn restore(repo: &ResumeRepository) -> Self {
        let mut session = Self::default();

        if let Some(doc) = repo.restore_document().await {
            session.document = doc;
            info!("Restored saved resume");
        }

        match repo.load_theme().await {
            Ok(Some(theme)) if themes::find(&theme).is_some() => session.theme = theme,
            Ok(Some(theme)) => warn!("Ignoring unknown stored theme '{theme}'"),
            Ok(None) => {}
            Err(e) => warn!("Could not read stored theme: {e}"),
        }

        match repo.load_dark_mode().await {
            Ok(enabled) => session.dark_mode = enabled,
            Err(e) => warn!("Could not read dark mode preference: {e}"),
        }

        session
    }

    pub fn settings(&self) -> Settings {
        Settings {
            auto_save: self.auto_save,
            dark_mode: self.dark_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::testing::FailingStore;
    use crate::storage::{KeyValueStore, MemoryStore};

    #[tokio::test]
    async fn test_restore_from_empty_store_is_default() {
        let repo = ResumeRepository::new(Arc::new(MemoryStore::new()));
        assert_eq!(ResumeSession::restore(&repo).await, ResumeSession::default());
    }

    #[tokio::test]
    async fn test_restore_reads_all_keys() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("resumeData", r#"{"personal": {"fullName": "Ada"}}"#)
            .await
            .unwrap();
        store.set("currentTheme", "executive").await.unwrap();
        store.set("darkMode", "enabled").await.unwrap();

        let session = ResumeSession::restore(&ResumeRepository::new(store)).await;
        assert_eq!(session.document.personal.full_name, "Ada");
        assert_eq!(session.theme, "executive");
        assert!(session.dark_mode);
    }

    #[tokio::test]
    async fn test_restore_survives_corrupt_and_failing_stores() {
        let store = Arc::new(MemoryStore::new());
        store.set("resumeData", "not json").await.unwrap();
        store.set("currentTheme", "neon").await.unwrap();
        let session = ResumeSession::restore(&ResumeRepository::new(store)).await;
        assert_eq!(session, ResumeSession::default());

        let failing = ResumeSession::restore(&ResumeRepository::new(Arc::new(FailingStore))).await;
        assert_eq!(failing, ResumeSession::default());
    }
}
