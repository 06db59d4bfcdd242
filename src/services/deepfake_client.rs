// Deepfake Backend Client
// Forwards uploaded images to the detection backend and maps its results

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{BackendDetection, BackendResponse, DeepfakeVerdict};
use crate::services::config_store::DeepfakeConfig;

pub const DEEPFAKE_LABEL: &str = "deepfake";

#[derive(Error, Debug)]
pub enum DeepfakeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    JsonError(String),
    #[error("No results returned from backend")]
    EmptyResults,
    #[error("No files to analyze")]
    NoFiles,
}

/// An uploaded file to forward.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct DeepfakeClient {
    client: Client,
    url: String,
}

impl DeepfakeClient {
    pub fn new(config: &DeepfakeConfig) -> Result<Self, DeepfakeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Upload every file under the `files` field and map the backend's answer.
    pub async fn detect(&self, uploads: Vec<ImageUpload>) -> Result<Vec<DeepfakeVerdict>, DeepfakeError> {
        if uploads.is_empty() {
            return Err(DeepfakeError::NoFiles);
        }

        let mut form = Form::new();
        for upload in uploads {
            debug!("[deepfake] Attaching {} ({} bytes)", upload.filename, upload.bytes.len());
            let mut part = Part::bytes(upload.bytes).file_name(upload.filename);
            if let Some(ct) = upload.content_type.as_deref() {
                part = part.mime_str(ct)?;
            }
            form = form.part("files", part);
        }

        let response = self.client.post(&self.url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeepfakeError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let payload: BackendResponse = response
            .json()
            .await
            .map_err(|e| DeepfakeError::JsonError(e.to_string()))?;

        map_results(payload)
    }
}

/// `{results: [...]}` into verdicts. An empty list is an error.
pub fn map_results(payload: BackendResponse) -> Result<Vec<DeepfakeVerdict>, DeepfakeError> {
    if payload.results.is_empty() {
        return Err(DeepfakeError::EmptyResults);
    }
    Ok(payload.results.into_iter().map(map_detection).collect())
}

pub fn map_detection(detection: BackendDetection) -> DeepfakeVerdict {
    let filename = detection.filename.unwrap_or_default();

    if let Some(error) = detection.error {
        warn!("[deepfake] Backend reported an error for {}: {}", filename, error);
        return DeepfakeVerdict {
            filename,
            is_deepfake: false,
            result: "Error".to_string(),
            confidence: 0,
            shape: detection.shape,
            error: Some(error),
        };
    }

    let is_deepfake = detection
        .label
        .as_deref()
        .is_some_and(|l| l.eq_ignore_ascii_case(DEEPFAKE_LABEL));
    let confidence = (detection.confidence.unwrap_or(0.0) * 100.0)
        .round()
        .clamp(0.0, 100.0) as u32;

    DeepfakeVerdict {
        filename,
        is_deepfake,
        result: if is_deepfake { "Deepfake" } else { "Original" }.to_string(),
        confidence,
        shape: detection.shape,
        error: None,
    }
}
