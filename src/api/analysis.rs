// Analysis Handlers
// Free-text and headline scoring endpoints

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::error::ServiceError;
use super::extract::ApiJson;
use super::AppState;
use crate::models::{AnalysisReport, ContentSample, HeadlineRequest, HeadlineResult};
use crate::services::text_processor::{count_words, preview};

const MIN_TEXT_CHARS: usize = 10;
const INPUT_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: AnalysisReport,
}

#[derive(Debug, Serialize)]
pub struct HeadlineResponse {
    pub success: bool,
    pub headline: String,
    pub analysis: HeadlineResult,
}

/// Reject submissions the scorer can't say anything useful about.
pub fn validate_sample(sample: &ContentSample) -> Result<String, ServiceError> {
    if sample.is_blank() {
        return Err(ServiceError::Validation(
            "Please provide news text or title to analyze".to_string(),
        ));
    }
    let combined = sample.combined_text();
    if combined.chars().count() < MIN_TEXT_CHARS {
        return Err(ServiceError::Validation(
            "Please provide at least 10 characters of text to analyze".to_string(),
        ));
    }
    Ok(combined)
}

pub async fn analyze(
    State(state): State<AppState>,
    ApiJson(sample): ApiJson<ContentSample>,
) -> Result<Json<AnalyzeResponse>, ServiceError> {
    let started = Instant::now();
    let combined = validate_sample(&sample)?;

    let score = state.scorer.score_sample(&sample);
    let request_id = Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        prediction = score.prediction.as_str(),
        confidence = score.confidence_score,
        "[analyze] Scored submission"
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        analysis: AnalysisReport {
            score,
            input_text: preview(&combined, INPUT_PREVIEW_CHARS),
            word_count: count_words(&combined),
            analysis_timestamp: Utc::now().to_rfc3339(),
            processing_time: started.elapsed().as_millis() as u64,
            request_id,
        },
    }))
}

pub async fn analyze_headline(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<HeadlineRequest>,
) -> Result<Json<HeadlineResponse>, ServiceError> {
    let headline = request.headline.trim();
    if headline.is_empty() {
        return Err(ServiceError::Validation("Please provide a headline to analyze".to_string()));
    }

    let analysis = state.headline.analyze(headline);
    info!(
        prediction = analysis.prediction.as_str(),
        credibility = analysis.credibility_score,
        "[headline] Scored headline"
    );

    Ok(Json(HeadlineResponse {
        success: true,
        headline: headline.to_string(),
        analysis,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sample() {
        let err = validate_sample(&ContentSample::new(None, "   ")).unwrap_err();
        assert_eq!(err.to_string(), "Please provide news text or title to analyze");

        let err = validate_sample(&ContentSample::new(Some("Hi"), "there")).unwrap_err();
        assert_eq!(err.to_string(), "Please provide at least 10 characters of text to analyze");

        let ok = validate_sample(&ContentSample::new(Some("Title"), "long enough body")).unwrap();
        assert_eq!(ok, "Title long enough body");
    }
}
