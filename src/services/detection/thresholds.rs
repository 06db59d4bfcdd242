// Scoring thresholds
// Bands that turn a signed fake score into a prediction, confidence and level.

use crate::models::{ConfidenceLevel, Level, Prediction, Probabilities};
use crate::services::noise::NoiseSource;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScoringVariant {
    /// Free-text analyzer (`/api/analyze`).
    Article,
    /// Per-article annotation of the news feed.
    Feed,
}

/// Strictly-greater cutoffs for High and Medium.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LevelCutoffs {
    pub high: f64,
    pub medium: f64,
}

impl LevelCutoffs {
    pub fn level(&self, value: f64) -> ConfidenceLevel {
        if value > self.high {
            Level::High
        } else if value > self.medium {
            Level::Medium
        } else {
            Level::Low
        }
    }
}

/// Cutoffs on the 0..1 confidence scale.
pub const ARTICLE_LEVELS: LevelCutoffs = LevelCutoffs { high: 0.8, medium: 0.6 };
/// Cutoffs on the 0..100 headline scale.
pub const HEADLINE_LEVELS: LevelCutoffs = LevelCutoffs { high: 75.0, medium: 55.0 };

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringProfile {
    /// Half-width of the symmetric jitter added to the fake score.
    pub jitter: f64,
    /// `|score|` below this is uncertain.
    pub uncertain_band: f64,
    /// Scores strictly above this are fake. Anything else outside the band is
    /// real, including positive scores between the band and this threshold.
    pub fake_threshold: f64,
    pub base_confidence: f64,
    pub confidence_cap: f64,
    /// `[lo, hi)` range the uncertain confidence is drawn from.
    pub uncertain_confidence: (f64, f64),
    pub levels: LevelCutoffs,
    pub max_factors: usize,
}

pub fn scoring_profile(variant: ScoringVariant) -> ScoringProfile {
    match variant {
        ScoringVariant::Article => ScoringProfile {
            jitter: 0.1,
            uncertain_band: 0.15,
            fake_threshold: 0.15,
            base_confidence: 0.6,
            confidence_cap: 0.95,
            uncertain_confidence: (0.5, 0.75),
            levels: ARTICLE_LEVELS,
            max_factors: 5,
        },
        ScoringVariant::Feed => ScoringProfile {
            jitter: 0.15,
            uncertain_band: 0.1,
            fake_threshold: 0.2,
            base_confidence: 0.7,
            confidence_cap: 0.95,
            uncertain_confidence: (0.5, 0.7),
            levels: ARTICLE_LEVELS,
            max_factors: 5,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub prediction: Prediction,
    /// 0..1
    pub confidence: f64,
    pub probabilities: Probabilities,
}

/// Classify a (jittered) fake score.
///
/// `confidence_boost` is added to the profile's base confidence for decided
/// outcomes (the feed annotator raises it for allow-listed sources).
pub fn decide(
    score: f64,
    confidence_boost: f64,
    profile: &ScoringProfile,
    noise: &dyn NoiseSource,
) -> Decision {
    if score.abs() < profile.uncertain_band {
        let (lo, hi) = profile.uncertain_confidence;
        return Decision {
            prediction: Prediction::Uncertain,
            confidence: noise.range(lo, hi),
            probabilities: Probabilities {
                fake: noise.range(0.4, 0.6),
                real: noise.range(0.4, 0.6),
            },
        };
    }

    let confidence = (profile.base_confidence + confidence_boost + score.abs())
        .min(profile.confidence_cap)
        .max(0.0);

    if score > profile.fake_threshold {
        Decision {
            prediction: Prediction::Fake,
            confidence,
            probabilities: Probabilities { fake: confidence, real: 1.0 - confidence },
        }
    } else {
        Decision {
            prediction: Prediction::Real,
            confidence,
            probabilities: Probabilities { fake: 1.0 - confidence, real: confidence },
        }
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::noise::{FixedNoise, NoNoise};

    #[test]
    fn test_level_bucketing_is_monotonic() {
        let mut last = Level::Low;
        for i in 0..=100 {
            let level = ARTICLE_LEVELS.level(i as f64 / 100.0);
            assert!(level >= last);
            last = level;
        }
        assert_eq!(ARTICLE_LEVELS.level(0.8), Level::Medium);
        assert_eq!(ARTICLE_LEVELS.level(0.81), Level::High);
        assert_eq!(HEADLINE_LEVELS.level(55.0), Level::Low);
        assert_eq!(HEADLINE_LEVELS.level(56.0), Level::Medium);
    }

    #[test]
    fn test_decide_bands() {
        let profile = scoring_profile(ScoringVariant::Article);
        assert_eq!(decide(0.1, 0.0, &profile, &NoNoise).prediction, Prediction::Uncertain);
        assert_eq!(decide(0.16, 0.0, &profile, &NoNoise).prediction, Prediction::Fake);
        assert_eq!(decide(-0.15, 0.0, &profile, &NoNoise).prediction, Prediction::Real);
        // Exactly on the threshold is outside the band but not above it
        assert_eq!(decide(0.15, 0.0, &profile, &NoNoise).prediction, Prediction::Real);
    }

    #[test]
    fn test_confidence_is_capped() {
        let profile = scoring_profile(ScoringVariant::Article);
        let d = decide(2.0, 0.0, &profile, &NoNoise);
        assert_eq!(d.confidence, 0.95);
        assert!((d.probabilities.real - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_feed_gap_between_band_and_threshold_is_real() {
        let profile = scoring_profile(ScoringVariant::Feed);
        let d = decide(0.15, 0.0, &profile, &FixedNoise(0.0));
        assert_eq!(d.prediction, Prediction::Real);
        assert!((d.confidence - 0.85).abs() < 1e-9);
        assert_eq!(decide(0.2, 0.0, &profile, &NoNoise).prediction, Prediction::Real);
        assert_eq!(decide(0.21, 0.0, &profile, &NoNoise).prediction, Prediction::Fake);
        assert_eq!(decide(0.09, 0.0, &profile, &FixedNoise(0.0)).prediction, Prediction::Uncertain);
        let d = decide(-0.15, 0.15, &profile, &NoNoise);
        assert_eq!(d.prediction, Prediction::Real);
        assert!((d.confidence - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert_eq!(round_to(0.555, 2), 0.56);
    }
}
