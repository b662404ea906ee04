pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::form::handlers as form;
use crate::models::image::ImageKind;
use crate::session::handlers;
use crate::state::AppState;

/// Room for the largest image upload plus multipart framing.
fn body_limit() -> usize {
    ImageKind::Photo.max_bytes() + 64 * 1024
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document
        .route("/api/v1/resume", get(handlers::handle_get_resume))
        .route("/api/v1/resume/form", get(form::handle_get_form))
        .route("/api/v1/resume/collect", post(form::handle_collect))
        .route("/api/v1/resume/reset", post(handlers::handle_reset))
        .route(
            "/api/v1/resume/suggest/:field",
            post(handlers::handle_suggest),
        )
        // Rendering and export
        .route("/api/v1/resume/preview", get(handlers::handle_preview))
        .route("/api/v1/resume/print", get(handlers::handle_print))
        .route("/api/v1/resume/export", post(handlers::handle_export))
        .route("/api/v1/resume/share", post(handlers::handle_share))
        .route("/api/v1/resume/backup", get(handlers::handle_backup))
        .route("/api/v1/resume/import", post(handlers::handle_import))
        // Images
        .route(
            "/api/v1/resume/photo",
            post(handlers::handle_upload_photo).delete(handlers::handle_remove_photo),
        )
        .route(
            "/api/v1/resume/logo",
            post(handlers::handle_upload_logo).delete(handlers::handle_remove_logo),
        )
        // Themes and settings
        .route("/api/v1/themes", get(handlers::handle_list_themes))
        .route("/api/v1/theme", put(handlers::handle_select_theme))
        .route(
            "/api/v1/settings",
            get(handlers::handle_get_settings).put(handlers::handle_update_settings),
        )
        // Saved resumes
        .route(
            "/api/v1/snapshots",
            get(handlers::handle_list_snapshots).post(handlers::handle_save_snapshot),
        )
        .route(
            "/api/v1/snapshots/:index/load",
            post(handlers::handle_load_snapshot),
        )
        .route(
            "/api/v1/snapshots/:index",
            delete(handlers::handle_delete_snapshot),
        )
        .layer(DefaultBodyLimit::max(body_limit()))
        .with_state(state)
}
