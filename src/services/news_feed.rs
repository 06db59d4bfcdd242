// News Feed Pipeline
// Fetch -> enrich -> annotate -> analytics, with mock fallback

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::{FeedMode, NewsResponse, RawArticle};
use crate::services::detection::{generate_analytics, FeedAnnotator};
use crate::services::enrichment::ArticleEnricher;
use crate::services::mock_articles::mock_articles;
use crate::services::news_client::NewsClient;
use crate::services::noise::NoiseSource;

pub const UNAVAILABLE_MESSAGE: &str = "Using mock data due to API unavailability";
pub const ERROR_MESSAGE: &str = "Using mock data due to API error";

#[derive(Clone)]
pub struct NewsFeed {
    client: NewsClient,
    enricher: ArticleEnricher,
    annotator: FeedAnnotator,
}

impl NewsFeed {
    pub fn new(client: NewsClient, noise: Arc<dyn NoiseSource>) -> Self {
        Self {
            client,
            enricher: ArticleEnricher::new(noise.clone()),
            annotator: FeedAnnotator::new(noise),
        }
    }

    /// Never fails: API trouble turns into a mock-backed response.
    pub async fn load(&self, limit: usize) -> NewsResponse {
        info!("[feed] Fetching {} articles", limit);

        match self.client.fetch(limit).await {
            Ok(raw) if !raw.is_empty() => self.build(&raw, FeedMode::IntelligentMock, None, None),
            Ok(_) => {
                warn!("[feed] No articles returned from news sources");
                self.build(
                    &mock_articles(limit),
                    FeedMode::MockFallback,
                    Some(UNAVAILABLE_MESSAGE),
                    None,
                )
            }
            Err(e) => {
                warn!("[feed] News API error: {}", e);
                self.build(
                    &mock_articles(limit),
                    FeedMode::ErrorFallback,
                    Some(ERROR_MESSAGE),
                    Some(e.to_string()),
                )
            }
        }
    }

    /// Enrich, annotate and summarize a given article set.
    pub fn build(
        &self,
        raw: &[RawArticle],
        mode: FeedMode,
        message: Option<&str>,
        error: Option<String>,
    ) -> NewsResponse {
        let mut articles = self.enricher.process_all(raw);
        self.annotator.annotate_all(&mut articles);
        let analytics = generate_analytics(&articles);

        info!("[feed] Processed {} articles ({:?})", articles.len(), mode);

        NewsResponse {
            success: true,
            total_results: articles.len(),
            data: articles,
            analytics,
            ai_analysis_enabled: true,
            ai_mode: mode,
            processed: true,
            message: message.map(str::to_string),
            error,
        }
    }

    pub fn enricher(&self) -> &ArticleEnricher {
        &self.enricher
    }
}
