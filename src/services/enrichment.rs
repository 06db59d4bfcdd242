// Article Enrichment
// Derives readability, engagement, virality, sentiment and reliability for news articles

use std::sync::{Arc, LazyLock};

use chrono::{DateTime, NaiveDate, Utc};
use regex::{Regex, RegexBuilder};
use uuid::Uuid;

use crate::models::{ArticleRecord, Level, RawArticle, Sentiment, ViralityTier};
use crate::services::noise::NoiseSource;
use crate::services::text_processor::{count_words, keyword_hits, reading_time_minutes, split_sentences};

const POSITIVE_WORDS: &[&str] = &[
    "success",
    "good",
    "great",
    "excellent",
    "win",
    "victory",
    "breakthrough",
    "agreement",
    "positive",
    "achievement",
];

const NEGATIVE_WORDS: &[&str] = &[
    "crisis",
    "danger",
    "wrong",
    "bad",
    "terrible",
    "failure",
    "disaster",
    "problem",
    "issue",
    "concern",
];

const VIRAL_CATEGORIES: &[&str] = &["entertainment", "sports", "technology", "breaking"];
const RELIABLE_SOURCES: &[&str] = &["reuters", "bbc", "ap news", "associated press", "bloomberg"];

static ENGAGING_TITLE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    RegexBuilder::new(r"\?|!|breaking|urgent|exclusive")
        .case_insensitive(true)
        .build()
        .ok()
});

static VIRAL_TITLE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    RegexBuilder::new(r"breaking|viral|trending|shocking")
        .case_insensitive(true)
        .build()
        .ok()
});

fn title_matches(re: &LazyLock<Option<Regex>>, title: &str) -> bool {
    re.as_ref().is_some_and(|r| r.is_match(title))
}

pub const DEFAULT_TITLE: &str = "Untitled Article";
pub const DEFAULT_SOURCE: &str = "Unknown Source";
pub const DEFAULT_AUTHOR: &str = "N/A";
pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_URL: &str = "#";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Turns API articles into [`ArticleRecord`]s.
#[derive(Clone)]
pub struct ArticleEnricher {
    noise: Arc<dyn NoiseSource>,
}

impl ArticleEnricher {
    pub fn new(noise: Arc<dyn NoiseSource>) -> Self {
        Self { noise }
    }

    /// `100 - 1.5 * avg sentence length` with ±10 jitter, clamped to [10, 100].
    pub fn readability(&self, text: &str) -> u32 {
        if text.chars().count() < 10 {
            return self.noise.range(40.0, 70.0).floor() as u32;
        }

        let sentences = split_sentences(text);
        let words = count_words(text);
        if sentences.is_empty() || words == 0 {
            return self.noise.range(30.0, 70.0).floor() as u32;
        }

        let avg_sentence_length = words as f64 / sentences.len() as f64;
        let score = 100.0 - avg_sentence_length * 1.5 + self.noise.symmetric(10.0);
        score.round().clamp(10.0, 100.0) as u32
    }

    pub fn engagement(&self, article: &RawArticle) -> u32 {
        let mut score = self.noise.range(25.0, 75.0).floor();

        if let Some(title) = article.title.as_deref() {
            let len = title.chars().count();
            if (40..=70).contains(&len) {
                score += 15.0;
            }
            if title_matches(&ENGAGING_TITLE, title) {
                score += 10.0;
            }
        }
        if has_long_description(article) {
            score += 10.0;
        }
        if article.has_image() {
            score += 5.0;
        }

        score.clamp(0.0, 100.0) as u32
    }

    pub fn virality(&self, article: &RawArticle) -> ViralityTier {
        let mut score = 0.0;

        let viral_category = article
            .category_list()
            .iter()
            .any(|c| VIRAL_CATEGORIES.contains(&c.to_lowercase().as_str()));
        if viral_category {
            score += 30.0;
        }
        if article.title.as_deref().is_some_and(|t| title_matches(&VIRAL_TITLE, t)) {
            score += 25.0;
        }
        score += self.noise.range(0.0, 50.0);

        if score >= 70.0 {
            Level::High
        } else if score >= 40.0 {
            Level::Medium
        } else {
            Level::Low
        }
    }

    /// Majority of positive vs negative keyword hits; ties fall back to a draw.
    pub fn sentiment(&self, text: &str) -> Sentiment {
        if text.is_empty() {
            return Sentiment::Neutral;
        }

        let lower = text.to_lowercase();
        let positive = keyword_hits(&lower, POSITIVE_WORDS).len();
        let negative = keyword_hits(&lower, NEGATIVE_WORDS).len();

        if positive > negative {
            return Sentiment::Positive;
        }
        if negative > positive {
            return Sentiment::Negative;
        }

        let draw = self.noise.unit();
        if draw < 0.35 {
            Sentiment::Positive
        } else if draw < 0.7 {
            Sentiment::Neutral
        } else {
            Sentiment::Negative
        }
    }

    pub fn process_article(&self, article: &RawArticle) -> ArticleRecord {
        let content = article.content().to_string();
        let title = non_empty(article.title.as_deref()).unwrap_or(DEFAULT_TITLE);
        let full_text = format!("{} {}", article.title.as_deref().unwrap_or(""), content);
        let categories = article.category_list();
        let now = Utc::now();

        ArticleRecord {
            article_id: article_id(article),
            title: title.to_string(),
            text_body: content.clone(),
            description: article.description.clone().unwrap_or_default(),
            snippet: article.snippet.clone().unwrap_or_default(),
            date: format_date(
                article.published_at.as_deref().or(article.pub_date.as_deref()),
                now,
            ),
            source: non_empty(article.source_name()).unwrap_or(DEFAULT_SOURCE).to_string(),
            author: non_empty(article.author.as_deref()).unwrap_or(DEFAULT_AUTHOR).to_string(),
            category: if categories.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                categories.join(", ")
            },
            categories,
            url: non_empty(article.url.as_deref()).unwrap_or(DEFAULT_URL).to_string(),
            image_url: article.image_url.clone().unwrap_or_default(),
            readability: self.readability(&full_text),
            engagement: self.engagement(article),
            virality: self.virality(article),
            sentiment: self.sentiment(&full_text),
            word_count: count_words(&content),
            reading_time: reading_time_minutes(&content),
            collection_timestamp: now.to_rfc3339(),
            processed: true,
            reliability_score: reliability_score(article),
            language: non_empty(article.language.as_deref())
                .unwrap_or(DEFAULT_LANGUAGE)
                .to_string(),
            published_at: non_empty(article.published_at.as_deref())
                .map(str::to_string)
                .unwrap_or_else(|| now.to_rfc3339()),
            keywords: article.keywords.clone().unwrap_or_default(),
            ai_prediction: None,
            ai_confidence: None,
            ai_confidence_score: None,
            ai_probabilities: None,
            ai_status: None,
            ai_analysis_timestamp: None,
            ai_method: None,
        }
    }

    pub fn process_all(&self, articles: &[RawArticle]) -> Vec<ArticleRecord> {
        articles.iter().map(|a| self.process_article(a)).collect()
    }
}

/// 60 base, +25 for a known wire/broadcaster, +10 long description, +5 image.
pub fn reliability_score(article: &RawArticle) -> u32 {
    let mut score = 60;

    if let Some(source) = article.source_name() {
        let source = source.to_lowercase();
        if RELIABLE_SOURCES.iter().any(|s| source.contains(s)) {
            score += 25;
        }
    }
    if has_long_description(article) {
        score += 10;
    }
    if article.has_image() {
        score += 5;
    }

    score.min(100)
}

fn has_long_description(article: &RawArticle) -> bool {
    article
        .description
        .as_deref()
        .is_some_and(|d| d.chars().count() > 100)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// An already-assigned `article_id`, then `uuid`, then `id`, else a generated one.
fn article_id(article: &RawArticle) -> String {
    let existing = non_empty(article.article_id.as_deref())
        .or(non_empty(article.uuid.as_deref()))
        .or(non_empty(article.id.as_deref()));
    if let Some(id) = existing {
        return id.to_string();
    }
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("article_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// `YYYY-MM-DD` of an RFC 3339 or bare date string, or of `now` when it doesn't parse.
pub fn format_date(value: Option<&str>, now: DateTime<Utc>) -> String {
    let today = now.format("%Y-%m-%d").to_string();
    let Some(value) = non_empty(value) else {
        return today;
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d").to_string();
    }
    if let Some(date) = value.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()) {
        return date.format("%Y-%m-%d").to_string();
    }
    today
}
