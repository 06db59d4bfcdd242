// Falsify Data Models
// Request/response payloads shared by the scorers, enrichment and the HTTP layer

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Treat an explicit JSON `null` like a missing string field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ============ Shared Enums ============

/// Outcome of a fake-content scorer.
///
/// `Error` and `Unavailable` only appear on feed annotations and are counted
/// as failures by analytics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Prediction {
    Real,
    Fake,
    Uncertain,
    Error,
    Unavailable,
}

impl Prediction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Fake => "fake",
            Self::Uncertain => "uncertain",
            Self::Error => "error",
            Self::Unavailable => "unavailable",
        }
    }

    /// True for predictions produced by a successful analysis pass.
    pub fn is_analyzed(&self) -> bool {
        !matches!(self, Self::Error | Self::Unavailable)
    }
}

/// Coarse Low/Medium/High bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

pub type ConfidenceLevel = Level;
pub type ViralityTier = Level;
pub type RiskLevel = Level;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

// ============ Content Scoring ============

/// A user submission for the free-text analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContentSample {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl ContentSample {
    pub fn new(title: Option<&str>, text: &str) -> Self {
        Self {
            text: text.to_string(),
            title: title.map(|t| t.to_string()),
            source: None,
        }
    }

    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// `"{title} {text}"`, trimmed.
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title_or_empty(), self.text).trim().to_string()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty() && self.title_or_empty().trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FactorImpact {
    IncreasesFakeProbability,
    IncreasesRealProbability,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContributingFactor {
    pub factor: String,
    pub impact: FactorImpact,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Probabilities {
    pub fake: f64,
    pub real: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub prediction: Prediction,
    /// 0..1, three decimals.
    pub confidence: f64,
    /// 0..100.
    pub confidence_score: u32,
    pub confidence_level: ConfidenceLevel,
    pub probabilities: Probabilities,
    pub analysis_factors: Vec<ContributingFactor>,
    pub fake_score: f64,
    /// 0.75 plus 0.1 per credible rule matched, three decimals.
    pub evidence_confidence: f64,
    pub methodology: String,
}

/// Scorer output plus request metadata, as returned by `/api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub score: ScoreResult,
    pub input_text: String,
    pub word_count: usize,
    pub analysis_timestamp: String,
    pub processing_time: u64,
    pub request_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlineResult {
    pub prediction: Prediction,
    pub confidence_score: u32,
    pub confidence_level: ConfidenceLevel,
    pub is_suspicious: bool,
    pub suspicious_indicators: Vec<String>,
    pub credibility_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeadlineRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub headline: String,
}

// ============ News Articles ============

/// `categories` arrives either as a single string or a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CategoryField {
    One(String),
    Many(Vec<String>),
}

impl CategoryField {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(s) => s
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            Self::Many(v) => v.clone(),
        }
    }
}

/// `source` is a plain name on the news API and `{id, name}` on older payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SourceField {
    Name(String),
    Object {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl SourceField {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(n) => Some(n.as_str()),
            Self::Object { name, .. } => name.as_deref(),
        }
    }
}

/// An article as returned by the news aggregation API.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawArticle {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub article_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "urlToImage")]
    pub image_url: Option<String>,
    #[serde(default, alias = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(default, rename = "pubDate")]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub source: Option<SourceField>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, alias = "category")]
    pub categories: Option<CategoryField>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

impl RawArticle {
    /// description, then snippet, then text.
    pub fn content(&self) -> &str {
        [&self.description, &self.snippet, &self.text]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name())
    }

    pub fn category_list(&self) -> Vec<String> {
        self.categories.as_ref().map(|c| c.to_vec()).unwrap_or_default()
    }

    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().map_or(false, |u| !u.is_empty())
    }
}

/// An enriched article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub article_id: String,
    pub title: String,
    pub text_body: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub snippet: String,
    pub date: String,
    pub source: String,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub url: String,
    pub image_url: String,
    pub readability: u32,
    pub engagement: u32,
    pub virality: ViralityTier,
    pub sentiment: Sentiment,
    pub word_count: usize,
    pub reading_time: usize,
    pub collection_timestamp: String,
    pub processed: bool,
    pub reliability_score: u32,
    pub language: String,
    pub published_at: String,
    #[serde(default)]
    pub keywords: String,

    // Feed annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_prediction: Option<Prediction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_confidence_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_probabilities: Option<Probabilities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_method: Option<String>,
}

// ============ Analytics ============

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClassShare {
    pub count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PredictionBreakdown {
    pub real: ClassShare,
    pub fake: ClassShare,
    pub uncertain: ClassShare,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    pub predictions: BTreeMap<String, usize>,
    pub avg_confidence: u32,
    pub high_confidence_count: usize,
    pub low_confidence_count: usize,
    pub total_analyzed: usize,
    pub real_count: usize,
    pub fake_count: usize,
    pub uncertain_count: usize,
    pub error_count: usize,
    pub service_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_timestamp: Option<String>,
    pub success_rate: u32,
    pub prediction_breakdown: PredictionBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_articles: usize,
    pub unique_sources: usize,
    pub unique_categories: usize,
    pub last_updated: String,
    pub avg_readability: u32,
    pub avg_engagement: u32,
    pub sentiment_distribution: BTreeMap<String, usize>,
    pub virality_distribution: BTreeMap<String, usize>,
    pub processing_status: String,
    pub ai_analysis: AiAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSummary {
    pub status: String,
    pub summary: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_analyzed: Option<usize>,
}

// ============ News Feed ============

/// Where the articles in a feed response came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedMode {
    IntelligentMock,
    MockFallback,
    ErrorFallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub success: bool,
    pub data: Vec<ArticleRecord>,
    pub analytics: AnalyticsSummary,
    pub total_results: usize,
    pub ai_analysis_enabled: bool,
    pub ai_mode: FeedMode,
    pub processed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============ Deepfake ============

/// One entry of the deepfake backend's `results` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendDetection {
    pub filename: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub shape: Option<Vec<u32>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendResponse {
    #[serde(default)]
    pub results: Vec<BackendDetection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeepfakeVerdict {
    pub filename: String,
    pub is_deepfake: bool,
    /// "Deepfake", "Original", or "Error" when the backend rejected the file
    pub result: String,
    /// 0..100
    pub confidence: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============ Phishing ============

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhishingCheck {
    pub name: String,
    pub status: CheckStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PhishingRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhishingReport {
    pub url: String,
    pub is_phishing: bool,
    pub risk_level: RiskLevel,
    pub score: u32,
    pub checks: Vec<PhishingCheck>,
}
