// Heuristic Content Scorer
// Weighted pattern pass over title + body, followed by jitter and banding

use std::sync::Arc;

use crate::models::{ContentSample, ContributingFactor, FactorImpact, Probabilities, ScoreResult};
use crate::services::noise::{NoNoise, NoiseSource};
use crate::services::text_processor::normalize_punctuation;

use super::rules::{ARTICLE_CREDIBLE_RULES, ARTICLE_SUSPICIOUS_RULES};
use super::thresholds::{decide, round_to, scoring_profile, ScoringProfile, ScoringVariant};

pub const METHODOLOGY: &str = "intelligent_pattern_analysis";

const BASE_EVIDENCE_CONFIDENCE: f64 = 0.75;
const CREDIBLE_CONFIDENCE_STEP: f64 = 0.1;

/// The deterministic part of a score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Signed sum of rule weights, before jitter.
    pub fake_score: f64,
    /// Evidence confidence: 0.75 plus 0.1 per credible match.
    pub evidence_confidence: f64,
    /// Every matched rule, suspicious first, in catalog order.
    pub factors: Vec<ContributingFactor>,
}

impl ScoreBreakdown {
    pub fn has_factor(&self, name: &str) -> bool {
        self.factors.iter().any(|f| f.factor == name)
    }
}

/// Run both rule catalogs over `text`.
pub fn breakdown(text: &str) -> ScoreBreakdown {
    let mut fake_score = 0.0;
    let mut evidence_confidence = BASE_EVIDENCE_CONFIDENCE;
    let mut factors = Vec::new();

    for rule in ARTICLE_SUSPICIOUS_RULES.matches(text) {
        fake_score += rule.weight;
        factors.push(ContributingFactor {
            factor: rule.name.to_string(),
            impact: FactorImpact::IncreasesFakeProbability,
            weight: rule.weight,
        });
    }

    for rule in ARTICLE_CREDIBLE_RULES.matches(text) {
        fake_score -= rule.weight;
        evidence_confidence += CREDIBLE_CONFIDENCE_STEP;
        factors.push(ContributingFactor {
            factor: rule.name.to_string(),
            impact: FactorImpact::IncreasesRealProbability,
            weight: rule.weight,
        });
    }

    ScoreBreakdown {
        fake_score,
        evidence_confidence,
        factors,
    }
}

/// Free-text fake-content scorer.
#[derive(Clone)]
pub struct ContentScorer {
    noise: Arc<dyn NoiseSource>,
    profile: ScoringProfile,
}

impl Default for ContentScorer {
    fn default() -> Self {
        Self::deterministic()
    }
}

impl ContentScorer {
    pub fn new(noise: Arc<dyn NoiseSource>) -> Self {
        Self {
            noise,
            profile: scoring_profile(ScoringVariant::Article),
        }
    }

    /// No jitter; uncertain draws land on their band midpoints.
    pub fn deterministic() -> Self {
        Self::new(Arc::new(NoNoise))
    }

    pub fn score_sample(&self, sample: &ContentSample) -> ScoreResult {
        self.score(sample.title_or_empty(), &sample.text)
    }

    /// Punctuation is normalized before matching, so curly quotes hit the same
    /// rules as straight ones.
    pub fn score(&self, title: &str, body: &str) -> ScoreResult {
        let text = normalize_punctuation(&format!("{} {}", title, body));
        self.finish(breakdown(&text))
    }

    fn finish(&self, base: ScoreBreakdown) -> ScoreResult {
        let fake_score = base.fake_score + self.noise.symmetric(self.profile.jitter);
        let decision = decide(fake_score, 0.0, &self.profile, self.noise.as_ref());
        let confidence = decision.confidence.clamp(0.0, 1.0);
        let evidence_confidence = round_to(base.evidence_confidence, 3);

        let mut factors = base.factors;
        factors.truncate(self.profile.max_factors);

        ScoreResult {
            prediction: decision.prediction,
            confidence: round_to(confidence, 3),
            confidence_score: (confidence * 100.0).round() as u32,
            confidence_level: self.profile.levels.level(confidence),
            probabilities: Probabilities {
                fake: round_to(decision.probabilities.fake, 3),
                real: round_to(decision.probabilities.real, 3),
            },
            analysis_factors: factors,
            fake_score: round_to(fake_score, 2),
            evidence_confidence,
            methodology: METHODOLOGY.to_string(),
        }
    }
}
