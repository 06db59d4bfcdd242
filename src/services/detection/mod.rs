// Detection Module
// Heuristic fake-content scoring organized into specialized submodules:
// - rules: weighted regex catalogs for every scorer variant
// - thresholds: banding of a signed score into prediction and confidence
// - scorer: free-text analyzer
// - headline: 0-100 headline analyzer
// - feed: per-article annotation of the news feed
// - aggregation: feed analytics and summary

pub mod rules;
pub mod thresholds;
pub mod scorer;
pub mod headline;
pub mod feed;
pub mod aggregation;

// Re-export commonly used items
pub use scorer::{breakdown, ContentScorer, ScoreBreakdown, METHODOLOGY};
pub use headline::HeadlineScorer;
pub use feed::{feed_score, FeedAnnotator};
pub use aggregation::{ai_summary, generate_analytics};
pub use thresholds::{decide, scoring_profile, Decision, LevelCutoffs, ScoringProfile, ScoringVariant};
