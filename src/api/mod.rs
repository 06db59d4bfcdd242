// HTTP API
// Router, shared state and handler modules

pub mod analysis;
pub mod auth;
pub mod error;
pub mod extract;
pub mod health;
pub mod modules;
pub mod news;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::config_store::AppConfig;
use crate::services::noise::noise_for;
use crate::services::{
    ContentScorer, DeepfakeClient, HeadlineScorer, NewsClient, NewsFeed, PeriodicRefresh,
    PhishingChecker,
};

pub use auth::{SessionVerifier, StaticTokenVerifier, SESSION_COOKIE};
pub use error::ServiceError;
pub use extract::ApiJson;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub scorer: ContentScorer,
    pub headline: HeadlineScorer,
    pub feed: NewsFeed,
    pub deepfake: DeepfakeClient,
    pub phishing: PhishingChecker,
    pub refresh: Arc<PeriodicRefresh>,
    pub verifier: Arc<dyn SessionVerifier>,
}

impl AppState {
    /// Wire every service from configuration. Sessions are checked against
    /// `auth.sessionTokens`.
    pub fn from_config(config: AppConfig) -> Result<Self, ServiceError> {
        let verifier = Arc::new(StaticTokenVerifier::new(config.auth.session_tokens.clone()));
        Self::with_verifier(config, verifier)
    }

    pub fn with_verifier(
        config: AppConfig,
        verifier: Arc<dyn SessionVerifier>,
    ) -> Result<Self, ServiceError> {
        let noise = noise_for(config.scoring.jitter);

        let feed = NewsFeed::new(NewsClient::new(&config.news)?, noise.clone());
        let refresh = PeriodicRefresh::new(
            feed.clone(),
            config.dashboard.refresh_period(),
            config.dashboard.article_limit,
        );

        Ok(Self {
            scorer: ContentScorer::new(noise.clone()),
            headline: HeadlineScorer::new(noise.clone()),
            deepfake: DeepfakeClient::new(&config.deepfake)?,
            phishing: PhishingChecker::new(noise),
            feed,
            refresh: Arc::new(refresh),
            verifier,
            config: Arc::new(config),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.deepfake.max_upload_bytes);

    let protected = Router::new()
        .route("/dashboard", get(modules::dashboard))
        .route("/fake-news/analyze", post(analysis::analyze))
        .route(
            "/deepfake/detect",
            post(modules::detect_deepfake).layer(upload_limit),
        )
        .route("/phishing/check", post(modules::check_phishing))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/analyze", post(analysis::analyze))
        .route("/api/headline", post(analysis::analyze_headline))
        .route("/api/news", get(news::get_news))
        .route("/api/analytics", get(news::get_analytics).post(news::post_analytics))
        .route("/api/export/csv", get(news::export_csv))
        .merge(protected)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
