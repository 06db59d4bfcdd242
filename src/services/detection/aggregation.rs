// Aggregation Logic
// Folds enriched, annotated articles into feed-level analytics

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;

use crate::models::{
    AiAnalysis, AiSummary, AnalyticsSummary, ArticleRecord, ClassShare, Prediction,
    PredictionBreakdown,
};

const MISSING_SCORE: u32 = 50;
const HIGH_CONFIDENCE_SCORE: u32 = 80;
const LOW_CONFIDENCE_SCORE: u32 = 60;

const NO_DATA: &str = "no_data";

/// Share of `part` in `total` as a whole percentage, rounded down.
fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part * 100 / total) as u32
}

fn rounded_mean(sum: u64, count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

/// Feed analytics, including the prediction breakdown.
///
/// An empty slice yields zeros, empty maps and `no_data` statuses.
pub fn generate_analytics(articles: &[ArticleRecord]) -> AnalyticsSummary {
    let last_updated = Utc::now().to_rfc3339();

    if articles.is_empty() {
        return AnalyticsSummary {
            last_updated,
            processing_status: NO_DATA.to_string(),
            ai_analysis: AiAnalysis {
                service_status: NO_DATA.to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
    }

    let total = articles.len();

    let unique_sources = articles
        .iter()
        .map(|a| if a.source.is_empty() { "unknown" } else { a.source.as_str() })
        .collect::<HashSet<_>>()
        .len();

    let unique_categories = articles
        .iter()
        .flat_map(article_categories)
        .filter(|c| !c.is_empty() && c != "general")
        .collect::<HashSet<_>>()
        .len()
        .max(1);

    let readability_sum: u64 = articles
        .iter()
        .map(|a| u64::from(if a.readability == 0 { MISSING_SCORE } else { a.readability }))
        .sum();
    let engagement_sum: u64 = articles
        .iter()
        .map(|a| u64::from(if a.engagement == 0 { MISSING_SCORE } else { a.engagement }))
        .sum();

    let mut sentiment_distribution = BTreeMap::new();
    let mut virality_distribution = BTreeMap::new();
    for article in articles {
        *sentiment_distribution
            .entry(article.sentiment.as_str().to_string())
            .or_insert(0) += 1;
        *virality_distribution
            .entry(article.virality.as_str().to_string())
            .or_insert(0) += 1;
    }

    AnalyticsSummary {
        total_articles: total,
        unique_sources,
        unique_categories,
        last_updated,
        avg_readability: rounded_mean(readability_sum, total),
        avg_engagement: rounded_mean(engagement_sum, total),
        sentiment_distribution,
        virality_distribution,
        processing_status: "completed".to_string(),
        ai_analysis: ai_analysis(articles),
    }
}

/// Categories as a list, splitting the joined `category` string when the
/// list wasn't kept.
fn article_categories(article: &ArticleRecord) -> Vec<String> {
    if !article.categories.is_empty() {
        return article.categories.clone();
    }
    if article.category.is_empty() {
        return vec!["general".to_string()];
    }
    article
        .category
        .split(',')
        .map(|c| c.trim().to_string())
        .collect()
}

fn is_analyzed(article: &ArticleRecord) -> bool {
    article.ai_prediction.is_some_and(|p| p.is_analyzed())
}

fn ai_analysis(articles: &[ArticleRecord]) -> AiAnalysis {
    let total = articles.len();

    let mut predictions: BTreeMap<String, usize> = BTreeMap::new();
    for article in articles {
        let key = article.ai_prediction.unwrap_or(Prediction::Uncertain);
        *predictions.entry(key.as_str().to_string()).or_insert(0) += 1;
    }
    let count = |p: Prediction| predictions.get(p.as_str()).copied().unwrap_or(0);

    let real_count = count(Prediction::Real);
    let fake_count = count(Prediction::Fake);
    let uncertain_count = count(Prediction::Uncertain);
    let error_count = count(Prediction::Error) + count(Prediction::Unavailable);

    let analyzed: Vec<f64> = articles
        .iter()
        .filter(|a| is_analyzed(a))
        .filter_map(|a| a.ai_confidence)
        .filter(|c| *c > 0.0)
        .collect();
    let avg_confidence = if analyzed.is_empty() {
        0.0
    } else {
        analyzed.iter().sum::<f64>() / analyzed.len() as f64
    };

    let service_status = if error_count == total {
        "offline"
    } else if error_count > 0 {
        "partial"
    } else if !analyzed.is_empty() {
        "online"
    } else {
        "unknown"
    };

    let scores = || articles.iter().filter_map(|a| a.ai_confidence_score);
    let high_confidence_count = scores().filter(|s| *s >= HIGH_CONFIDENCE_SCORE).count();
    let low_confidence_count = scores()
        .filter(|s| *s > 0 && *s < LOW_CONFIDENCE_SCORE)
        .count();

    let share = |n: usize| ClassShare {
        count: n,
        percentage: percentage(n, total),
    };

    AiAnalysis {
        avg_confidence: (avg_confidence * 100.0).round() as u32,
        high_confidence_count,
        low_confidence_count,
        total_analyzed: analyzed.len(),
        real_count,
        fake_count,
        uncertain_count,
        error_count,
        service_status: service_status.to_string(),
        analysis_timestamp: Some(Utc::now().to_rfc3339()),
        success_rate: percentage(analyzed.len(), total),
        prediction_breakdown: PredictionBreakdown {
            real: share(real_count),
            fake: share(fake_count),
            uncertain: share(uncertain_count),
        },
        predictions,
    }
}

/// One-line verdict over the annotated feed.
pub fn ai_summary(articles: &[ArticleRecord]) -> AiSummary {
    let analyzed: Vec<&ArticleRecord> = articles.iter().filter(|a| is_analyzed(a)).collect();

    if analyzed.is_empty() {
        return AiSummary {
            status: "No AI analysis available".to_string(),
            summary: "AI service is currently unavailable".to_string(),
            recommendation: "Please try refreshing to enable AI analysis".to_string(),
            confidence: None,
            total_analyzed: None,
        };
    }

    let with = |p: Prediction| articles.iter().filter(|a| a.ai_prediction == Some(p)).count();
    let real_count = with(Prediction::Real);
    let fake_count = with(Prediction::Fake);
    let avg_confidence = analyzed
        .iter()
        .map(|a| a.ai_confidence.unwrap_or(0.0))
        .sum::<f64>()
        / analyzed.len() as f64;

    let (summary, recommendation) = if fake_count == 0 {
        (
            format!("All {} articles appear to be legitimate news", real_count),
            "Content looks reliable based on AI analysis",
        )
    } else if fake_count > real_count {
        (
            format!(
                "{} potentially fake articles detected out of {}",
                fake_count,
                analyzed.len()
            ),
            "Exercise caution - high number of potentially fake articles detected",
        )
    } else {
        (
            format!("{} real and {} potentially fake articles detected", real_count, fake_count),
            "Mixed content - review individual article predictions",
        )
    };

    AiSummary {
        status: "Analysis Complete".to_string(),
        summary,
        recommendation: recommendation.to_string(),
        confidence: Some((avg_confidence * 100.0).round() as u32),
        total_analyzed: Some(analyzed.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Level, RawArticle, Sentiment, SourceField};
    use crate::services::enrichment::ArticleEnricher;
    use crate::services::noise::NoNoise;
    use std::sync::Arc;

    fn article(source: &str, categories: &[&str], prediction: Option<Prediction>, confidence: f64) -> ArticleRecord {
        let raw = RawArticle {
            title: Some("Title".to_string()),
            source: Some(SourceField::Name(source.to_string())),
            ..Default::default()
        };
        let mut record = ArticleEnricher::new(Arc::new(NoNoise)).process_article(&raw);
        record.categories = categories.iter().map(|c| c.to_string()).collect();
        record.ai_prediction = prediction;
        record.ai_confidence = prediction.map(|_| confidence);
        record.ai_confidence_score = prediction.map(|_| (confidence * 100.0).round() as u32);
        record
    }

    #[test]
    fn test_empty_collection() {
        let summary = generate_analytics(&[]);
        assert_eq!(summary.total_articles, 0);
        assert_eq!(summary.unique_sources, 0);
        assert_eq!(summary.unique_categories, 0);
        assert_eq!(summary.avg_readability, 0);
        assert!(summary.sentiment_distribution.is_empty());
        assert_eq!(summary.processing_status, "no_data");
        assert_eq!(summary.ai_analysis.service_status, "no_data");
        assert_eq!(summary.ai_analysis.total_analyzed, 0);
        assert!(summary.ai_analysis.analysis_timestamp.is_none());
    }

    #[test]
    fn test_base_counts() {
        let articles = vec![
            article("Reuters", &["business", "general"], Some(Prediction::Real), 0.9),
            article("Reuters", &["science"], Some(Prediction::Fake), 0.85),
            article("BBC", &["general"], Some(Prediction::Uncertain), 0.55),
        ];
        let summary = generate_analytics(&articles);
        assert_eq!(summary.total_articles, 3);
        assert_eq!(summary.unique_sources, 2);
        assert_eq!(summary.unique_categories, 2);
        assert_eq!(summary.processing_status, "completed");
        assert_eq!(summary.virality_distribution.values().sum::<usize>(), 3);
        assert_eq!(summary.sentiment_distribution.values().sum::<usize>(), 3);
    }

    #[test]
    fn test_only_general_categories_count_as_one() {
        let articles = vec![article("A", &["general"], None, 0.0)];
        assert_eq!(generate_analytics(&articles).unique_categories, 1);
    }

    #[test]
    fn test_missing_scores_count_as_fifty() {
        let mut a = article("A", &[], None, 0.0);
        a.readability = 0;
        a.engagement = 0;
        let mut b = article("B", &[], None, 0.0);
        b.readability = 90;
        b.engagement = 71;
        let summary = generate_analytics(&[a, b]);
        assert_eq!(summary.avg_readability, 70);
        assert_eq!(summary.avg_engagement, 61);
    }

    #[test]
    fn test_ai_analysis_counts() {
        let articles = vec![
            article("A", &[], Some(Prediction::Real), 0.9),
            article("B", &[], Some(Prediction::Fake), 0.8),
            article("C", &[], Some(Prediction::Uncertain), 0.55),
        ];
        let ai = generate_analytics(&articles).ai_analysis;
        assert_eq!(ai.real_count, 1);
        assert_eq!(ai.fake_count, 1);
        assert_eq!(ai.uncertain_count, 1);
        assert_eq!(ai.error_count, 0);
        assert_eq!(ai.total_analyzed, 3);
        assert_eq!(ai.avg_confidence, 75);
        assert_eq!(ai.high_confidence_count, 2);
        assert_eq!(ai.low_confidence_count, 1);
        assert_eq!(ai.service_status, "online");
        assert_eq!(ai.success_rate, 100);
        assert_eq!(ai.prediction_breakdown.real.percentage, 33);
        let total_pct = ai.prediction_breakdown.real.percentage
            + ai.prediction_breakdown.fake.percentage
            + ai.prediction_breakdown.uncertain.percentage;
        assert!(total_pct <= 100);
    }

    #[test]
    fn test_service_status_with_errors() {
        let partial = vec![
            article("A", &[], Some(Prediction::Real), 0.9),
            article("B", &[], Some(Prediction::Error), 0.0),
        ];
        let ai = generate_analytics(&partial).ai_analysis;
        assert_eq!(ai.service_status, "partial");
        assert_eq!(ai.error_count, 1);
        assert_eq!(ai.success_rate, 50);

        let offline = vec![article("A", &[], Some(Prediction::Unavailable), 0.0)];
        assert_eq!(generate_analytics(&offline).ai_analysis.service_status, "offline");

        // Unannotated articles count as uncertain but not analyzed
        let unknown = vec![article("A", &[], None, 0.0)];
        let ai = generate_analytics(&unknown).ai_analysis;
        assert_eq!(ai.service_status, "unknown");
        assert_eq!(ai.predictions.get("uncertain"), Some(&1));
    }

    #[test]
    fn test_ai_summary_variants() {
        let none = ai_summary(&[article("A", &[], None, 0.0)]);
        assert_eq!(none.status, "No AI analysis available");
        assert!(none.confidence.is_none());

        let clean = ai_summary(&[
            article("A", &[], Some(Prediction::Real), 0.9),
            article("B", &[], Some(Prediction::Real), 0.7),
        ]);
        assert_eq!(clean.summary, "All 2 articles appear to be legitimate news");
        assert_eq!(clean.confidence, Some(80));
        assert_eq!(clean.total_analyzed, Some(2));

        let fakes = ai_summary(&[
            article("A", &[], Some(Prediction::Fake), 0.9),
            article("B", &[], Some(Prediction::Fake), 0.9),
            article("C", &[], Some(Prediction::Real), 0.9),
        ]);
        assert_eq!(fakes.summary, "2 potentially fake articles detected out of 3");

        let mixed = ai_summary(&[
            article("A", &[], Some(Prediction::Fake), 0.9),
            article("C", &[], Some(Prediction::Real), 0.9),
        ]);
        assert_eq!(mixed.recommendation, "Mixed content - review individual article predictions");
    }

    #[test]
    fn test_distribution_keys() {
        let mut a = article("A", &[], None, 0.0);
        a.sentiment = Sentiment::Negative;
        a.virality = Level::High;
        let summary = generate_analytics(&[a]);
        assert_eq!(summary.sentiment_distribution.get("negative"), Some(&1));
        assert_eq!(summary.virality_distribution.get("High"), Some(&1));
    }
}
