// API Errors
// Maps service failures onto HTTP status codes and `{success:false, error}` bodies

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::services::{DeepfakeError, NewsError, PhishingError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Validation(msg) => warn!("[api] Rejected request: {}", msg),
            Self::Upstream(msg) | Self::Internal(msg) => error!("[api] {}: {}", status, msg),
        }
        (status, Json(json!({ "success": false, "error": self.to_string() }))).into_response()
    }
}

impl From<DeepfakeError> for ServiceError {
    fn from(e: DeepfakeError) -> Self {
        match e {
            DeepfakeError::NoFiles => Self::Validation(e.to_string()),
            other => Self::Upstream(other.to_string()),
        }
    }
}

impl From<NewsError> for ServiceError {
    fn from(e: NewsError) -> Self {
        Self::Upstream(e.to_string())
    }
}

impl From<PhishingError> for ServiceError {
    fn from(e: PhishingError) -> Self {
        Self::Validation(e.to_string())
    }
}
