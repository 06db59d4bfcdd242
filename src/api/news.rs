// News Handlers
// Live feed, analytics and CSV export endpoints

use axum::extract::{Query, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::error::ServiceError;
use super::extract::ApiJson;
use super::AppState;
use crate::models::{AiSummary, AnalyticsSummary, ArticleRecord, FeedMode, RawArticle};
use crate::services::csv_export::{articles_to_csv, today_disposition, CSV_CONTENT_TYPE};
use crate::services::detection::{ai_summary, generate_analytics};
use crate::services::mock_articles::{mock_articles, MOCK_ARTICLE_COUNT};

const MAX_LIMIT: usize = 100;
pub const EXPORT_LIMIT: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    pub limit: Option<usize>,
    #[serde(default)]
    pub refresh: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_articles: Option<Vec<ArticleRecord>>,
    pub analytics: AnalyticsSummary,
    pub summary: AiSummary,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub status: &'static str,
    pub data: AnalyticsData,
    pub timestamp: String,
}

fn no_store(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}

/// `GET /api/news?limit=&refresh=`
pub async fn get_news(State(state): State<AppState>, Query(query): Query<NewsQuery>) -> Response {
    let limit = query
        .limit
        .unwrap_or(state.config.news.default_limit)
        .clamp(1, MAX_LIMIT);
    info!(limit, refresh = query.refresh.unwrap_or(false), "[news] Feed requested");

    let response = state.feed.load(limit).await;
    no_store(Json(response).into_response())
}

fn analytics_response(processed: Option<Vec<ArticleRecord>>, articles: &[ArticleRecord]) -> AnalyticsResponse {
    AnalyticsResponse {
        status: "success",
        data: AnalyticsData {
            analytics: generate_analytics(articles),
            summary: ai_summary(articles),
            processed_articles: processed,
        },
        timestamp: Utc::now().to_rfc3339(),
    }
}

/// `GET /api/analytics`: analytics over the built-in article set.
pub async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsResponse> {
    let feed = state
        .feed
        .build(&mock_articles(MOCK_ARTICLE_COUNT), FeedMode::IntelligentMock, None, None);
    Json(analytics_response(None, &feed.data))
}

/// `POST /api/analytics` with `{articles: [...]}`.
pub async fn post_analytics(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<AnalyticsResponse>, ServiceError> {
    let invalid = || ServiceError::Validation("Invalid articles data".to_string());

    let articles = body.get("articles").filter(|a| a.is_array()).ok_or_else(invalid)?;
    let raw: Vec<RawArticle> = serde_json::from_value(articles.clone()).map_err(|_| invalid())?;

    let feed = state.feed.build(&raw, FeedMode::IntelligentMock, None, None);
    info!("[analytics] Processed {} posted articles", feed.data.len());

    Ok(Json(analytics_response(Some(feed.data.clone()), &feed.data)))
}

/// `GET /api/export/csv`
pub async fn export_csv(State(state): State<AppState>) -> Response {
    let feed = state.feed.load(EXPORT_LIMIT).await;
    info!("[export] Writing {} articles as CSV", feed.data.len());

    let body = articles_to_csv(&feed.data);
    (
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, today_disposition()),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        body,
    )
        .into_response()
}
