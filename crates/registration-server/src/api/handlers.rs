//! HTTP request handlers.

use super::types::{HealthResponse, MessageResponse, ParticipantView, RegisterRequest};
use super::AppState;
use crate::error::ApiError;
use crate::export;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use registration_store::Registration;
use tracing::{error, info, warn};

/// Liveness message.
pub async fn liveness() -> &'static str {
    "Registration service is running"
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, registrations) = match state.store.count().await {
        Ok(n) => ("ok".to_string(), n),
        Err(e) => {
            warn!(cause = %e, "Health check could not read the store");
            ("degraded".to_string(), 0)
        }
    };

    Json(HealthResponse {
        status,
        backend: state.store.backend_name(),
        registrations,
    })
}

/// Accept a registration submission.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let stored = state
        .store
        .create(request.into_submission())
        .await
        .map_err(ApiError::from_store("Gagal menyimpan data pendaftaran."))?;

    info!(name = %stored.name, event = %stored.event, "Registration stored");

    Ok(Json(MessageResponse {
        message: "Pendaftaran berhasil. Terima kasih!".to_string(),
    }))
}

/// List registrations for display, phone numbers masked.
pub async fn list_participants(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipantView>>, ApiError> {
    let records = state
        .store
        .list_all()
        .await
        .map_err(ApiError::from_store("Gagal membaca data pendaftaran."))?;

    Ok(Json(records.into_iter().map(ParticipantView::masked).collect()))
}

/// Download the full unmasked list as an XLSX workbook.
pub async fn download_excel(State(state): State<AppState>) -> Response {
    let records = match fetch_all(&state).await {
        Ok(r) => r,
        Err(()) => return export_failure("Gagal membuat file Excel."),
    };

    match export::to_workbook(&records) {
        Ok(bytes) => attachment(export::EXCEL_CONTENT_TYPE, export::EXCEL_FILENAME, bytes),
        Err(e) => {
            error!(cause = %e, "Failed to build XLSX workbook");
            export_failure("Gagal membuat file Excel.")
        }
    }
}

/// Download the full unmasked list as a JSON file.
pub async fn download_json(State(state): State<AppState>) -> Response {
    let records = match fetch_all(&state).await {
        Ok(r) => r,
        Err(()) => return export_failure("Gagal membuat file JSON."),
    };

    match export::to_json(&records) {
        Ok(bytes) => attachment("application/json", export::JSON_FILENAME, bytes),
        Err(e) => {
            error!(cause = %e, "Failed to serialize JSON export");
            export_failure("Gagal membuat file JSON.")
        }
    }
}

async fn fetch_all(state: &AppState) -> Result<Vec<Registration>, ()> {
    state.store.list_all().await.map_err(|e| {
        error!(cause = %e, "Failed to read registrations for export");
    })
}

/// Build a download response with a fixed filename.
fn attachment(content_type: &str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Export failures are plain text, not JSON.
fn export_failure(message: &'static str) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}
