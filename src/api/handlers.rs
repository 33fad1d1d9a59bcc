//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use super::server::AppState;
use crate::core::decode;
use crate::error::DecodeFailure;
use crate::excel::{PrintoutExporter, DAY_PRINTOUT_SHEET};
use crate::printout::Printout;
use crate::session::{CommitOutcome, ViewState};

/// Content type of the exported printout document
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// File name offered for the exported printout document
pub const EXPORT_FILE_NAME: &str = "parties.xlsx";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
            error_kind: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
            error_kind: None,
        }
    }

    /// Error response naming which decode step failed
    pub fn failure(failure: &DecodeFailure) -> Self {
        Self {
            error_kind: Some(failure.kind().to_string()),
            ..Self::err(failure.to_string())
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Party Printout Server".to_string(),
        version: state.version.clone(),
        description: "Day Printout booking sheet to party printout".to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/health", "Health check endpoint"),
            EndpointInfo::new("GET", "/version", "Get server version"),
            EndpointInfo::new("POST", "/api/v1/upload", "Upload a booking workbook"),
            EndpointInfo::new("GET", "/api/v1/printout", "Current printout state"),
            EndpointInfo::new("POST", "/api/v1/reset", "Clear the current printout"),
            EndpointInfo::new("GET", "/api/v1/export", "Download the printout as .xlsx"),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub sheet: String,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        sheet: DAY_PRINTOUT_SHEET.to_string(),
    }))
}

/// POST /api/v1/upload - Decode an uploaded workbook and show it
///
/// The body is the raw workbook. The result is only applied if no newer
/// upload (or reset) started while this one was decoding.
pub async fn upload(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let ticket = state.session.lock().await.begin_upload();
    info!(bytes = body.len(), "upload received");

    let result = tokio::task::spawn_blocking(move || decode(&body, DAY_PRINTOUT_SHEET))
        .await
        .unwrap_or_else(|e| Err(DecodeFailure::Decode(format!("decode task failed: {}", e))));

    let mut session = state.session.lock().await;
    match session.commit(ticket, result) {
        CommitOutcome::Loaded => {
            let printout = session.sheet().map(Printout::render).unwrap_or_default();
            (StatusCode::OK, Json(ApiResponse::ok(printout))).into_response()
        }
        CommitOutcome::Failed(failure) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<Printout>::failure(&failure)),
        )
            .into_response(),
        CommitOutcome::Superseded => (
            StatusCode::CONFLICT,
            Json(ApiResponse::<Printout>::err(
                "Upload superseded by a newer upload",
            )),
        )
            .into_response(),
    }
}

/// Current view state
#[derive(Serialize)]
pub struct PrintoutResponse {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub printout: Option<Printout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureInfo>,
}

#[derive(Serialize)]
pub struct FailureInfo {
    pub kind: String,
    pub message: String,
}

impl From<&DecodeFailure> for FailureInfo {
    fn from(failure: &DecodeFailure) -> Self {
        Self {
            kind: failure.kind().to_string(),
            message: failure.to_string(),
        }
    }
}

/// GET /api/v1/printout - Current printout state
pub async fn printout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.lock().await;
    let view = session.state();

    let response = PrintoutResponse {
        state: view.name().to_string(),
        printout: match view {
            ViewState::Loaded(sheet) => Some(Printout::render(sheet)),
            _ => None,
        },
        failure: match view {
            ViewState::Failed(failure) => Some(failure.into()),
            _ => None,
        },
    };
    Json(ApiResponse::ok(response))
}

/// Reset response
#[derive(Serialize)]
pub struct ResetResponse {
    pub state: String,
}

/// POST /api/v1/reset - Clear the printout
pub async fn reset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    session.reset();
    Json(ApiResponse::ok(ResetResponse {
        state: session.state().name().to_string(),
    }))
}

/// GET /api/v1/export - Download the printout document
pub async fn export(State(state): State<Arc<AppState>>) -> Response {
    let printout = {
        let session = state.session.lock().await;
        session.sheet().map(Printout::render)
    };

    let Some(printout) = printout.filter(|p| !p.is_empty()) else {
        return (
            StatusCode::CONFLICT,
            Json(ApiResponse::<Printout>::err("No parties loaded to export")),
        )
            .into_response();
    };

    match PrintoutExporter::new(&printout).to_buffer() {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("export failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Printout>::err(e.to_string())),
            )
                .into_response()
        }
    }
}
