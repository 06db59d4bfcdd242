// News API Client
// Sequential multi-strategy fetch from the news aggregation API

use std::collections::HashSet;
use std::time::Duration;

use rand::seq::SliceRandom;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::RawArticle;
use crate::services::config_store::NewsConfig;

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    JsonError(String),
    #[error("No data array in {0} response")]
    MissingData(&'static str),
}

/// One endpoint of the news API and the query it is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsStrategy {
    pub name: &'static str,
    pub path: &'static str,
    pub locale: Option<&'static str>,
    pub limit: u32,
}

pub const STRATEGIES: [NewsStrategy; 3] = [
    NewsStrategy { name: "headlines", path: "headlines", locale: Some("us"), limit: 8 },
    NewsStrategy { name: "all-news", path: "all", locale: None, limit: 8 },
    NewsStrategy { name: "top-news", path: "top", locale: Some("us"), limit: 6 },
];

#[derive(Debug, Deserialize)]
struct NewsPayload {
    #[serde(default)]
    data: Option<Vec<RawArticle>>,
}

#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
    delay: Duration,
}

impl NewsClient {
    pub fn new(config: &NewsConfig) -> Result<Self, NewsError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone().filter(|t| !t.is_empty()),
            delay: config.strategy_delay(),
        })
    }

    fn query(&self, strategy: &NewsStrategy) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(4);
        if let Some(token) = &self.api_token {
            query.push(("api_token", token.clone()));
        }
        if let Some(locale) = strategy.locale {
            query.push(("locale", locale.to_string()));
        }
        query.push(("language", "en".to_string()));
        query.push(("limit", strategy.limit.to_string()));
        query
    }

    /// One request against one endpoint.
    pub async fn fetch_strategy(&self, strategy: &NewsStrategy) -> Result<Vec<RawArticle>, NewsError> {
        let url = format!("{}/{}", self.base_url, strategy.path);
        debug!("[news] Fetching from {}", strategy.name);

        let response = self
            .client
            .get(&url)
            .query(&self.query(strategy))
            .header("User-Agent", format!("NewsCollector-{}", chrono::Utc::now().timestamp_millis()))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let payload: NewsPayload = response
            .json()
            .await
            .map_err(|e| NewsError::JsonError(e.to_string()))?;

        payload.data.ok_or(NewsError::MissingData(strategy.name))
    }

    /// Run every strategy in order and collect what they return.
    ///
    /// Fails only when every strategy failed, with the last error.
    pub async fn collect(&self) -> Result<Vec<RawArticle>, NewsError> {
        let mut collected = Vec::new();
        let mut last_error = None;
        let mut any_ok = false;

        for strategy in &STRATEGIES {
            match self.fetch_strategy(strategy).await {
                Ok(articles) => {
                    info!("[news] Got {} articles from {}", articles.len(), strategy.name);
                    any_ok = true;
                    collected.extend(articles);
                }
                Err(e) => {
                    warn!("[news] {} failed: {}", strategy.name, e);
                    last_error = Some(e);
                }
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        match last_error {
            Some(e) if !any_ok => Err(e),
            _ => Ok(collected),
        }
    }

    /// Collect, drop duplicates and URL-less articles, shuffle and keep `target`.
    pub async fn fetch(&self, target: usize) -> Result<Vec<RawArticle>, NewsError> {
        let collected = self.collect().await?;
        info!("[news] Total articles collected: {}", collected.len());

        let mut unique = dedupe_by_url(collected);
        unique.shuffle(&mut rand::rng());
        unique.truncate(target);
        Ok(unique)
    }
}

/// First occurrence of each URL wins; articles without a URL are dropped.
pub fn dedupe_by_url(articles: Vec<RawArticle>) -> Vec<RawArticle> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| match a.url.as_deref() {
            Some(url) if !url.is_empty() => seen.insert(url.to_string()),
            _ => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: Option<&str>, title: &str) -> RawArticle {
        RawArticle {
            url: url.map(str::to_string),
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_dedupe_keeps_first_and_drops_missing_urls() {
        let articles = vec![
            with_url(Some("https://a"), "first"),
            with_url(None, "no url"),
            with_url(Some("https://b"), "b"),
            with_url(Some("https://a"), "second"),
            with_url(Some(""), "empty"),
        ];
        let unique = dedupe_by_url(articles);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].title.as_deref(), Some("first"));
    }

    #[test]
    fn test_strategy_order_and_limits() {
        let names: Vec<_> = STRATEGIES.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["headlines", "all-news", "top-news"]);
        let limits: Vec<_> = STRATEGIES.iter().map(|s| s.limit).collect();
        assert_eq!(limits, vec![8, 8, 6]);
        assert!(STRATEGIES[1].locale.is_none());
    }

    #[test]
    fn test_query_omits_missing_token() {
        let client = NewsClient::new(&NewsConfig::default()).unwrap();
        let query = client.query(&STRATEGIES[0]);
        assert!(query.iter().all(|(k, _)| *k != "api_token"));
        assert!(query.contains(&("locale", "us".to_string())));

        let config = NewsConfig {
            api_token: Some("tok".to_string()),
            ..Default::default()
        };
        let client = NewsClient::new(&config).unwrap();
        assert!(client.query(&STRATEGIES[1]).contains(&("api_token", "tok".to_string())));
    }
}
