use axum::{extract::State, Json};

use crate::form::FormState;
use crate::session::service::{self, DocumentResponse, FormResponse};
use crate::state::AppState;

/// GET /api/v1/resume/form
/// Rows the form should render for the current document.
pub async fn handle_get_form(State(state): State<AppState>) -> Json<FormResponse> {
    Json(service::populated_form(&state).await)
}

/// POST /api/v1/resume/collect
pub async fn handle_collect(
    State(state): State<AppState>,
    Json(form): Json<FormState>,
) -> Json<DocumentResponse> {
    Json(service::collect_form(&state, &form).await)
}
