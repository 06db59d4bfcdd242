// Headline Analyzer
// 0-100 scale variant of the scorer, tuned for single-line headlines

use std::sync::Arc;

use crate::models::{HeadlineResult, Prediction};
use crate::services::noise::{NoNoise, NoiseSource};
use crate::services::text_processor::normalize_punctuation;

use super::rules::{HEADLINE_CREDIBLE_RULES, HEADLINE_FAKE_RULES};
use super::thresholds::HEADLINE_LEVELS;

const MAX_INDICATORS: usize = 4;
const JITTER_MAX: f64 = 20.0;
const SUSPICIOUS_ABOVE: f64 = 40.0;
const FAKE_ABOVE: f64 = 60.0;
const REAL_BELOW: f64 = 25.0;
const CONFIDENCE_CAP: f64 = 95.0;

#[derive(Clone)]
pub struct HeadlineScorer {
    noise: Arc<dyn NoiseSource>,
}

impl Default for HeadlineScorer {
    fn default() -> Self {
        Self::new(Arc::new(NoNoise))
    }
}

impl HeadlineScorer {
    pub fn new(noise: Arc<dyn NoiseSource>) -> Self {
        Self { noise }
    }

    /// Suspicion points before jitter: +15 per fake rule, -10 per credible rule.
    pub fn base_score(headline: &str) -> (f64, Vec<String>) {
        let mut score = 0.0;
        let mut indicators = Vec::new();

        for rule in HEADLINE_FAKE_RULES.matches(headline) {
            score += rule.weight;
            indicators.push(rule.name.to_string());
        }
        for rule in HEADLINE_CREDIBLE_RULES.matches(headline) {
            score -= rule.weight;
            indicators.push(format!("✓ {}", rule.name));
        }

        (score, indicators)
    }

    pub fn analyze(&self, headline: &str) -> HeadlineResult {
        let (base, mut indicators) = Self::base_score(&normalize_punctuation(headline));
        let final_score = (base + self.noise.range(0.0, JITTER_MAX)).clamp(0.0, 100.0);

        let (prediction, confidence) = if final_score > FAKE_ABOVE {
            (
                Prediction::Fake,
                (60.0 + (final_score - FAKE_ABOVE) * 0.8).min(CONFIDENCE_CAP),
            )
        } else if final_score < REAL_BELOW {
            (
                Prediction::Real,
                (70.0 + (REAL_BELOW - final_score) * 0.6).min(CONFIDENCE_CAP),
            )
        } else {
            (Prediction::Uncertain, self.noise.range(45.0, 65.0))
        };

        indicators.truncate(MAX_INDICATORS);

        HeadlineResult {
            prediction,
            confidence_score: confidence.round() as u32,
            confidence_level: HEADLINE_LEVELS.level(confidence),
            is_suspicious: final_score > SUSPICIOUS_ABOVE,
            suspicious_indicators: indicators,
            credibility_score: (100.0 - final_score).round() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Level;
    use crate::services::noise::{FixedNoise, RandomNoise};

    #[test]
    fn test_sensational_headline_is_fake() {
        let scorer = HeadlineScorer::default();
        let r = scorer.analyze("SHOCKING!! Doctors hate this miracle cure they kept secret");
        // sensational, clickbait, emphasis and exaggerated rules: 60, plus 10 jitter
        assert_eq!(r.prediction, Prediction::Fake);
        assert!(r.is_suspicious);
        assert_eq!(r.suspicious_indicators.len(), 4);
        assert_eq!(r.confidence_score, 68);
        assert_eq!(r.confidence_level, Level::Medium);
        assert_eq!(r.credibility_score, 30);
    }

    #[test]
    fn test_attributed_headline_is_real() {
        let scorer = HeadlineScorer::default();
        let r = scorer.analyze("Survey data confirms modest rise in rail ridership, officials say");
        assert_eq!(r.prediction, Prediction::Real);
        assert!(!r.is_suspicious);
        assert!(r.suspicious_indicators.iter().all(|i| i.starts_with('✓')));
        assert_eq!(r.credibility_score, 100);
        assert_eq!(r.confidence_score, 85);
        assert_eq!(r.confidence_level, Level::High);
    }

    #[test]
    fn test_plain_headline_depends_on_jitter() {
        let low = HeadlineScorer::new(Arc::new(FixedNoise(0.0))).analyze("City council meets on Tuesday");
        assert_eq!(low.prediction, Prediction::Real);
        assert_eq!(low.confidence_score, 85);

        let breaking = HeadlineScorer::new(Arc::new(FixedNoise(0.5))).analyze("Breaking: council meets");
        // 15 + 15 (emphasis matches BREAKING case-insensitively) + 10
        assert_eq!(breaking.prediction, Prediction::Uncertain);
        assert_eq!(breaking.confidence_score, 55);
        assert_eq!(breaking.confidence_level, Level::Low);
    }

    #[test]
    fn test_curly_apostrophe_counts_as_clickbait() {
        let r = HeadlineScorer::default().analyze("You won\u{2019}t believe this diet");
        assert_eq!(r.suspicious_indicators, vec!["Clickbait phrases".to_string()]);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let scorer = HeadlineScorer::new(Arc::new(RandomNoise));
        for _ in 0..200 {
            let r = scorer.analyze("URGENT!!! You won't believe the secret cover-up, amazing");
            assert!(r.confidence_score <= 95);
            assert!(r.credibility_score <= 100);
        }
    }
}
