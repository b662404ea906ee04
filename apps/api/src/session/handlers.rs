use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::ExportReceipt;
use crate::models::image::{ImageError, ImageKind};
use crate::models::snapshot::SnapshotSummary;
use crate::render::{themes, ThemeCategory, ThemeInfo};
use crate::session::service::{
    self, DocumentResponse, FormResponse, SaveOutcome, SettingsResponse, ShareResponse,
    SuggestionResponse,
};
use crate::session::{Settings, SettingsUpdate};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ThemeQuery {
    pub category: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectThemeRequest {
    pub theme_id: String,
}

#[derive(Deserialize)]
pub struct SaveSnapshotRequest {
    pub name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<DocumentResponse> {
    Json(service::current_document(&state).await)
}

/// POST /api/v1/resume/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<FormResponse> {
    Json(service::reset(&state).await)
}

/// POST /api/v1/resume/suggest/:field
pub async fn handle_suggest(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<SuggestionResponse>, AppError> {
    Ok(Json(service::apply_suggestion(&state, &field).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering, export, backup
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume/preview
pub async fn handle_preview(State(state): State<AppState>) -> Html<String> {
    Html(service::preview(&state).await)
}

/// GET /api/v1/resume/print
pub async fn handle_print(State(state): State<AppState>) -> Html<String> {
    Html(service::print_page(&state).await)
}

/// POST /api/v1/resume/export
pub async fn handle_export(
    State(state): State<AppState>,
) -> Result<Json<ExportReceipt>, AppError> {
    Ok(Json(service::export(&state).await?))
}

/// POST /api/v1/resume/share
pub async fn handle_share(State(state): State<AppState>) -> Result<Json<ShareResponse>, AppError> {
    Ok(Json(service::share(&state).await?))
}

/// GET /api/v1/resume/backup
/// Downloadable copy of the stored document.
pub async fn handle_backup(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let backup = service::backup(&state).await?;
    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", backup.filename),
        ),
    ];
    Ok((headers, backup.body))
}

/// POST /api/v1/resume/import
/// Body is the raw backup file.
pub async fn handle_import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FormResponse>, AppError> {
    Ok(Json(service::import_backup(&state, &body).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Images
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/photo (multipart, field `file`)
pub async fn handle_upload_photo(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SaveOutcome>, AppError> {
    upload(&state, ImageKind::Photo, multipart).await
}

/// POST /api/v1/resume/logo (multipart, field `file`)
pub async fn handle_upload_logo(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SaveOutcome>, AppError> {
    upload(&state, ImageKind::Logo, multipart).await
}

/// DELETE /api/v1/resume/photo
pub async fn handle_remove_photo(State(state): State<AppState>) -> Json<SaveOutcome> {
    Json(service::remove_image(&state, ImageKind::Photo).await)
}

/// DELETE /api/v1/resume/logo
pub async fn handle_remove_logo(State(state): State<AppState>) -> Json<SaveOutcome> {
    Json(service::remove_image(&state, ImageKind::Logo).await)
}

async fn upload(
    state: &AppState,
    kind: ImageKind,
    multipart: Multipart,
) -> Result<Json<SaveOutcome>, AppError> {
    let (content_type, data) = read_file_field(multipart).await?;
    Ok(Json(
        service::set_image(state, kind, &content_type, &data).await?,
    ))
}

async fn read_file_field(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        return Ok((content_type, data));
    }
    Err(ImageError::Empty.into())
}

// ────────────────────────────────────────────────────────────────────────────
// Themes and settings
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/themes?category=modern
pub async fn handle_list_themes(
    Query(query): Query<ThemeQuery>,
) -> Result<Json<Vec<ThemeInfo>>, AppError> {
    let category = match query.category.as_deref() {
        None | Some("all") => None,
        Some(raw) => Some(
            ThemeCategory::from_id(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown category '{raw}'")))?,
        ),
    };
    Ok(Json(themes::filter(category)))
}

/// PUT /api/v1/theme
pub async fn handle_select_theme(
    State(state): State<AppState>,
    Json(req): Json<SelectThemeRequest>,
) -> Result<Json<SaveOutcome>, AppError> {
    Ok(Json(service::select_theme(&state, &req.theme_id).await?))
}

/// GET /api/v1/settings
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(service::settings(&state).await)
}

/// PUT /api/v1/settings
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Json<SettingsResponse> {
    Json(service::update_settings(&state, update).await)
}

// ────────────────────────────────────────────────────────────────────────────
// Snapshots
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/snapshots
pub async fn handle_list_snapshots(
    State(state): State<AppState>,
) -> Result<Json<Vec<SnapshotSummary>>, AppError> {
    Ok(Json(service::list_snapshots(&state).await?))
}

/// POST /api/v1/snapshots
pub async fn handle_save_snapshot(
    State(state): State<AppState>,
    Json(req): Json<SaveSnapshotRequest>,
) -> Result<(StatusCode, Json<SnapshotSummary>), AppError> {
    let summary = service::save_snapshot(&state, &req.name).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// POST /api/v1/snapshots/:index/load
pub async fn handle_load_snapshot(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<FormResponse>, AppError> {
    Ok(Json(service::load_snapshot(&state, index).await?))
}

/// DELETE /api/v1/snapshots/:index
pub async fn handle_delete_snapshot(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<StatusCode, AppError> {
    service::delete_snapshot(&state, index).await?;
    Ok(StatusCode::NO_CONTENT)
}
