// Protected Module Handlers
// Dashboard snapshot, deepfake upload and phishing check

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use super::error::ServiceError;
use super::extract::ApiJson;
use super::AppState;
use crate::models::{DeepfakeVerdict, PhishingReport, PhishingRequest};
use crate::services::refresh::DashboardSnapshot;
use crate::services::ImageUpload;

const UPLOAD_FIELD: &str = "files";

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
}

#[derive(Debug, Serialize)]
pub struct DeepfakeResponse {
    pub success: bool,
    pub results: Vec<DeepfakeVerdict>,
}

#[derive(Debug, Serialize)]
pub struct PhishingResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: PhishingReport,
}

/// `GET /dashboard`: latest refreshed snapshot, fetching one if none exists yet.
pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let snapshot = match state.refresh.latest().await {
        Some(snapshot) => snapshot,
        None => state.refresh.refresh_once().await,
    };
    Json(DashboardResponse {
        success: true,
        snapshot,
    })
}

/// `POST /deepfake/detect`: forwards every `files` part to the backend.
pub async fn detect_deepfake(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DeepfakeResponse>, ServiceError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::Validation(format!("Invalid upload: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServiceError::Validation(format!("Invalid upload: {}", e)))?;

        uploads.push(ImageUpload {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    info!("[deepfake] Forwarding {} file(s) to {}", uploads.len(), state.deepfake.url());
    let results = state.deepfake.detect(uploads).await?;

    Ok(Json(DeepfakeResponse {
        success: true,
        results,
    }))
}

/// `POST /phishing/check`
pub async fn check_phishing(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PhishingRequest>,
) -> Result<Json<PhishingResponse>, ServiceError> {
    let report = state.phishing.check(&request.url)?;
    info!(
        url = %report.url,
        score = report.score,
        phishing = report.is_phishing,
        "[phishing] Checked URL"
    );
    Ok(Json(PhishingResponse {
        success: true,
        report,
    }))
}
