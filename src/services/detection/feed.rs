// Feed Annotator
// Attaches ai_* prediction fields to every enriched article in a news feed

use std::sync::Arc;

use chrono::Utc;

use crate::models::{ArticleRecord, Probabilities};
use crate::services::noise::NoiseSource;
use crate::services::text_processor::keyword_hits;

use super::rules::{FEED_FACTUAL_WORDS, FEED_RELIABLE_SOURCES, FEED_SENSATIONAL_WORDS, FEED_TITLE_RULES};
use super::scorer::METHODOLOGY;
use super::thresholds::{decide, round_to, scoring_profile, ScoringProfile, ScoringVariant};

const RELIABLE_SOURCE_SHIFT: f64 = 0.4;
const RELIABLE_SOURCE_CONFIDENCE: f64 = 0.15;
const FACTUAL_WORD_SHIFT: f64 = 0.1;
const SENSATIONAL_WORD_SHIFT: f64 = 0.15;

/// Deterministic feed score for one article and the confidence boost it earned.
pub fn feed_score(article: &ArticleRecord) -> (f64, f64) {
    let title = article.title.as_str();
    let content = if article.description.is_empty() {
        article.snippet.to_lowercase()
    } else {
        article.description.to_lowercase()
    };
    let source = article.source.to_lowercase();
    let full_text = format!("{} {}", title.to_lowercase(), content);

    let mut score: f64 = FEED_TITLE_RULES.matches(title).map(|r| r.weight).sum();
    let mut boost = 0.0;

    if FEED_RELIABLE_SOURCES.iter().any(|s| source.contains(s)) {
        score -= RELIABLE_SOURCE_SHIFT;
        boost += RELIABLE_SOURCE_CONFIDENCE;
    }

    score -= keyword_hits(&full_text, FEED_FACTUAL_WORDS).len() as f64 * FACTUAL_WORD_SHIFT;
    score += keyword_hits(&full_text, FEED_SENSATIONAL_WORDS).len() as f64 * SENSATIONAL_WORD_SHIFT;

    (score, boost)
}

#[derive(Clone)]
pub struct FeedAnnotator {
    noise: Arc<dyn NoiseSource>,
    profile: ScoringProfile,
}

impl FeedAnnotator {
    pub fn new(noise: Arc<dyn NoiseSource>) -> Self {
        Self {
            noise,
            profile: scoring_profile(ScoringVariant::Feed),
        }
    }

    pub fn annotate(&self, article: &mut ArticleRecord) {
        let (base, boost) = feed_score(article);
        let score = base + self.noise.symmetric(self.profile.jitter);
        let decision = decide(score, boost, &self.profile, self.noise.as_ref());

        article.ai_prediction = Some(decision.prediction);
        article.ai_confidence = Some(round_to(decision.confidence, 3));
        article.ai_confidence_score = Some((decision.confidence * 100.0).round() as u32);
        article.ai_probabilities = Some(Probabilities {
            fake: round_to(decision.probabilities.fake, 3),
            real: round_to(decision.probabilities.real, 3),
        });
        article.ai_status = Some("analyzed".to_string());
        article.ai_analysis_timestamp = Some(Utc::now().to_rfc3339());
        article.ai_method = Some(METHODOLOGY.to_string());
    }

    pub fn annotate_all(&self, articles: &mut [ArticleRecord]) {
        for article in articles.iter_mut() {
            self.annotate(article);
        }
    }
}
