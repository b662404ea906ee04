//! Session operations. Each one takes the session lock, applies its change,
//! and persists through the repository. A failed save never rolls back the
//! in-memory document: it is reported as a notice instead.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{filename_hint, ExportArtifact, ExportReceipt, HTML_CONTENT_TYPE};
use crate::form::{collect, populate, FormState, PopulatedForm};
use crate::models::image::{encode_upload, ImageKind};
use crate::models::resume::ResumeDocument;
use crate::models::snapshot::{SavedSnapshot, SnapshotSummary};
use crate::render::{render, render_page, render_themed, themes, DEFAULT_THEME};
use crate::session::suggestions::suggestion_for;
use crate::session::{ResumeSession, Settings, SettingsUpdate};
use crate::state::AppState;
use crate::storage::backup::{backup_filename, decode_document, encode_document};

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

/// Whether the change reached the store, plus a user-facing notice on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveOutcome {
    pub saved: bool,
    pub notice: Option<String>,
}

impl SaveOutcome {
    fn skipped() -> Self {
        Self {
            saved: false,
            notice: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub document: ResumeDocument,
    pub theme: String,
    #[serde(flatten)]
    pub save: SaveOutcome,
}

#[derive(Debug, Serialize)]
pub struct FormResponse {
    #[serde(flatten)]
    pub populated: PopulatedForm,
    pub theme: String,
    #[serde(flatten)]
    pub save: SaveOutcome,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    #[serde(flatten)]
    pub settings: Settings,
    #[serde(flatten)]
    pub save: SaveOutcome,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub field: String,
    pub suggestion: &'static str,
    #[serde(flatten)]
    pub save: SaveOutcome,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub link: String,
    pub receipt: ExportReceipt,
}

pub struct Backup {
    pub filename: String,
    pub body: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Persistence helpers
// ────────────────────────────────────────────────────────────────────────────

async fn persist(state: &AppState, session: &ResumeSession) -> SaveOutcome {
    match state
        .repo
        .save_session(&session.document, &session.theme)
        .await
    {
        Ok(()) => SaveOutcome {
            saved: true,
            notice: None,
        },
        Err(e) => {
            warn!("Keeping unsaved changes in memory: {e}");
            SaveOutcome {
                saved: false,
                notice: Some("Error saving data".to_string()),
            }
        }
    }
}

async fn persist_if_enabled(state: &AppState, session: &ResumeSession) -> SaveOutcome {
    if session.auto_save {
        persist(state, session).await
    } else {
        SaveOutcome::skipped()
    }
}

fn form_response(session: &ResumeSession, save: SaveOutcome) -> FormResponse {
    FormResponse {
        populated: populate(&session.document),
        theme: session.theme.clone(),
        save,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document operations
// ────────────────────────────────────────────────────────────────────────────

pub async fn current_document(state: &AppState) -> DocumentResponse {
    let session = state.session.lock().await;
    DocumentResponse {
        document: session.document.clone(),
        theme: session.theme.clone(),
        save: SaveOutcome::skipped(),
    }
}

pub async fn populated_form(state: &AppState) -> FormResponse {
    let session = state.session.lock().await;
    form_response(&session, SaveOutcome::skipped())
}

/// Form -> document, then auto-save.
pub async fn collect_form(state: &AppState, form: &FormState) -> DocumentResponse {
    let mut session = state.session.lock().await;
    collect(form, &mut session.document);
    let save = persist_if_enabled(state, &session).await;
    DocumentResponse {
        document: session.document.clone(),
        theme: session.theme.clone(),
        save,
    }
}

/// Starts a new, empty resume. Always persisted.
pub async fn reset(state: &AppState) -> FormResponse {
    let mut session = state.session.lock().await;
    session.document = ResumeDocument::default();
    let save = persist(state, &session).await;
    info!("Started a new resume");
    form_response(&session, save)
}

/// Validates and stores an uploaded image, replacing any previous one.
pub async fn set_image(
    state: &AppState,
    kind: ImageKind,
    content_type: &str,
    data: &[u8],
) -> Result<SaveOutcome, AppError> {
    let image = encode_upload(kind, content_type, data)?;

    let mut session = state.session.lock().await;
    match kind {
        ImageKind::Photo => session.document.photo = Some(image),
        ImageKind::Logo => session.document.logo = Some(image),
    }
    info!("Stored {} ({} bytes)", kind.label(), data.len());
    Ok(persist_if_enabled(state, &session).await)
}

pub async fn remove_image(state: &AppState, kind: ImageKind) -> SaveOutcome {
    let mut session = state.session.lock().await;
    match kind {
        ImageKind::Photo => session.document.photo = None,
        ImageKind::Logo => session.document.logo = None,
    }
    persist_if_enabled(state, &session).await
}

/// Replaces the document with a backup. Decoding happens before the lock is
/// taken, so a malformed backup leaves the session untouched.
pub async fn import_backup(state: &AppState, raw: &[u8]) -> Result<FormResponse, AppError> {
    let raw = std::str::from_utf8(raw)
        .map_err(|e| AppError::Parse(format!("Invalid backup file: {e}")))?;
    let document = decode_document(raw)?;

    let mut session = state.session.lock().await;
    session.document = document;
    let save = persist(state, &session).await;
    info!("Imported resume backup");
    Ok(form_response(&session, save))
}

pub async fn backup(state: &AppState) -> Result<Backup, AppError> {
    let session = state.session.lock().await;
    Ok(Backup {
        filename: backup_filename(Utc::now()),
        body: encode_document(&session.document)?,
    })
}

pub async fn apply_suggestion(state: &AppState, field: &str) -> Result<SuggestionResponse, AppError> {
    let suggestion = suggestion_for(field)
        .ok_or_else(|| AppError::NotFound("AI suggestions coming soon!".to_string()))?;

    let mut session = state.session.lock().await;
    session.document.personal.profile_summary = suggestion.to_string();
    let save = persist(state, &session).await;
    Ok(SuggestionResponse {
        field: field.to_string(),
        suggestion,
        save,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering and export
// ────────────────────────────────────────────────────────────────────────────

pub async fn preview(state: &AppState) -> String {
    let session = state.session.lock().await;
    match session.theme.as_str() {
        DEFAULT_THEME => render(&session.document),
        theme => render_themed(&session.document, theme),
    }
}

pub async fn print_page(state: &AppState) -> String {
    let session = state.session.lock().await;
    render_page(&session.document, &session.theme)
}

async fn page_artifact(state: &AppState, filename: Option<String>) -> ExportArtifact {
    let session = state.session.lock().await;
    ExportArtifact {
        filename: filename.unwrap_or_else(|| filename_hint(&session.document, "html")),
        content_type: HTML_CONTENT_TYPE,
        body: render_page(&session.document, &session.theme),
    }
}

/// Sends the printable page to the export sink. The session lock is released
/// before the sink runs; the document is never modified here.
pub async fn export(state: &AppState) -> Result<ExportReceipt, AppError> {
    let artifact = page_artifact(state, None).await;
    state.exporter.export(artifact).await
}

pub async fn share(state: &AppState) -> Result<ShareResponse, AppError> {
    let id = Uuid::new_v4();
    let artifact = page_artifact(state, Some(format!("shared/{id}.html"))).await;
    let receipt = state.exporter.export(artifact).await?;
    Ok(ShareResponse {
        link: format!(
            "{}/view/{id}",
            state.config.share_base_url.trim_end_matches('/')
        ),
        receipt,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Theme and settings
// ────────────────────────────────────────────────────────────────────────────

pub async fn select_theme(state: &AppState, theme_id: &str) -> Result<SaveOutcome, AppError> {
    if themes::find(theme_id).is_none() {
        return Err(AppError::Validation(format!("Unknown theme '{theme_id}'")));
    }
    let mut session = state.session.lock().await;
    session.theme = theme_id.to_string();
    Ok(persist(state, &session).await)
}

pub async fn settings(state: &AppState) -> Settings {
    state.session.lock().await.settings()
}

pub async fn update_settings(state: &AppState, update: SettingsUpdate) -> SettingsResponse {
    let mut session = state.session.lock().await;
    if let Some(auto_save) = update.auto_save {
        session.auto_save = auto_save;
        info!("Auto-save {}", if auto_save { "enabled" } else { "disabled" });
    }

    let mut save = SaveOutcome::skipped();
    if let Some(dark_mode) = update.dark_mode {
        session.dark_mode = dark_mode;
        save = match state.repo.save_dark_mode(dark_mode).await {
            Ok(()) => SaveOutcome {
                saved: true,
                notice: None,
            },
            Err(e) => {
                warn!("Dark mode preference not saved: {e}");
                SaveOutcome {
                    saved: false,
                    notice: Some("Error saving data".to_string()),
                }
            }
        };
    }

    SettingsResponse {
        settings: session.settings(),
        save,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Named snapshots
// ────────────────────────────────────────────────────────────────────────────

pub async fn list_snapshots(state: &AppState) -> Result<Vec<SnapshotSummary>, AppError> {
    let snapshots = state.repo.load_snapshots().await?;
    Ok(snapshots
        .iter()
        .enumerate()
        .map(|(i, s)| s.summary(i))
        .collect())
}

pub async fn save_snapshot(state: &AppState, name: &str) -> Result<SnapshotSummary, AppError> {
    if name.is_empty() {
        return Err(AppError::Validation("Please enter a resume name".to_string()));
    }

    let session = state.session.lock().await;
    let mut snapshots = state.repo.load_snapshots().await?;
    snapshots.push(SavedSnapshot {
        name: name.to_string(),
        document: session.document.clone(),
        theme: session.theme.clone(),
        saved_at: Utc::now(),
    });
    state.repo.save_snapshots(&snapshots).await?;

    let index = snapshots.len() - 1;
    info!("Saved resume \"{name}\" as snapshot {index}");
    Ok(snapshots[index].summary(index))
}

/// Replaces the live document and theme with a saved snapshot.
pub async fn load_snapshot(state: &AppState, index: usize) -> Result<FormResponse, AppError> {
    let mut session = state.session.lock().await;
    let snapshot = state
        .repo
        .load_snapshots()
        .await?
        .into_iter()
        .nth(index)
        .ok_or_else(|| AppError::NotFound(format!("Saved resume {index} not found")))?;

    session.document = snapshot.document;
    session.theme = snapshot.theme;
    let save = persist(state, &session).await;
    info!("Loaded saved resume \"{}\"", snapshot.name);
    Ok(form_response(&session, save))
}

pub async fn delete_snapshot(state: &AppState, index: usize) -> Result<(), AppError> {
    let _session = state.session.lock().await;
    let mut snapshots = state.repo.load_snapshots().await?;
    if index >= snapshots.len() {
        return Err(AppError::NotFound(format!("Saved resume {index} not found")));
    }
    let removed = snapshots.remove(index);
    state.repo.save_snapshots(&snapshots).await?;
    info!("Deleted saved resume \"{}\"", removed.name);
    Ok(())
}
