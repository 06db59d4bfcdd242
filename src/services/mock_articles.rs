// Mock Articles
// Fixed article set served when the news API is unavailable

use chrono::{Duration, Utc};

use crate::models::{CategoryField, RawArticle, SourceField};

struct MockSeed {
    title: &'static str,
    slug: &'static str,
    source: &'static str,
    categories: [&'static str; 2],
    description: &'static str,
    image: &'static str,
    snippet: &'static str,
}

const SEEDS: [MockSeed; 10] = [
    MockSeed {
        title: "Technology Giants Report Strong Q4 Earnings Despite Market Headwinds",
        slug: "tech-earnings-q4",
        source: "TechNews Daily",
        categories: ["Technology", "Business"],
        description: "Major technology companies exceeded analyst expectations in their fourth quarter reports, signaling resilience in a challenging economic environment.",
        image: "3B82F6/ffffff?text=Tech+News",
        snippet: "Technology sector shows strong performance...",
    },
    MockSeed {
        title: "New Climate Research Shows Promising Results for Carbon Capture Technology",
        slug: "climate-research",
        source: "Environmental Science Today",
        categories: ["Environment", "Science"],
        description: "Scientists at leading universities have developed more efficient methods for capturing atmospheric carbon dioxide.",
        image: "10B981/ffffff?text=Environment",
        snippet: "Revolutionary carbon capture methods...",
    },
    MockSeed {
        title: "Healthcare Innovation: AI-Powered Diagnostic Tool Shows 95% Accuracy Rate",
        slug: "ai-healthcare",
        source: "Medical Journal Weekly",
        categories: ["Healthcare", "Technology"],
        description: "New artificial intelligence system can detect early-stage diseases with unprecedented accuracy according to clinical trials.",
        image: "EF4444/ffffff?text=Healthcare+AI",
        snippet: "AI diagnostics breakthrough...",
    },
    MockSeed {
        title: "Global Education Initiative Launches to Bridge Digital Learning Gap",
        slug: "education-initiative",
        source: "Education World",
        categories: ["Education", "Society"],
        description: "International coalition announces ambitious program to provide digital learning resources to underserved communities worldwide.",
        image: "8B5CF6/ffffff?text=Education",
        snippet: "Digital education expansion...",
    },
    MockSeed {
        title: "Renewable Energy Milestone: Solar Power Costs Drop to Record Lows",
        slug: "solar-milestone",
        source: "Energy Report",
        categories: ["Energy", "Environment"],
        description: "Latest industry analysis reveals solar energy production costs have reached historic minimums, accelerating adoption globally.",
        image: "F59E0B/ffffff?text=Solar+Energy",
        snippet: "Solar costs plummet worldwide...",
    },
    MockSeed {
        title: "Space Exploration Update: Mars Mission Preparations Enter Final Phase",
        slug: "mars-mission",
        source: "Space Sciences Quarterly",
        categories: ["Science", "Space"],
        description: "International space agencies coordinate final preparations for the next crewed mission to Mars scheduled for 2026.",
        image: "DC2626/ffffff?text=Mars+Mission",
        snippet: "Mars mission timeline confirmed...",
    },
    MockSeed {
        title: "Economic Analysis: Global Markets Show Steady Recovery Trends",
        slug: "market-recovery",
        source: "Financial Times Today",
        categories: ["Business", "Economics"],
        description: "Comprehensive market analysis indicates sustained economic growth across major global indices over the past quarter.",
        image: "059669/ffffff?text=Market+News",
        snippet: "Markets maintain upward trajectory...",
    },
    MockSeed {
        title: "Transportation Revolution: Autonomous Vehicle Testing Expands Nationwide",
        slug: "autonomous-vehicles",
        source: "Transport Innovation",
        categories: ["Transportation", "Technology"],
        description: "Major automotive manufacturers announce expanded testing programs for self-driving vehicles in metropolitan areas.",
        image: "7C3AED/ffffff?text=Auto+Tech",
        snippet: "Autonomous vehicle rollout accelerates...",
    },
    MockSeed {
        title: "Agricultural Breakthrough: New Crop Varieties Increase Yield by 40%",
        slug: "crop-breakthrough",
        source: "Agriculture Today",
        categories: ["Agriculture", "Science"],
        description: "Agricultural researchers develop drought-resistant crop varieties that significantly increase food production capabilities.",
        image: "16A34A/ffffff?text=Agriculture",
        snippet: "Crop yields see dramatic improvement...",
    },
    MockSeed {
        title: "Cultural Heritage Preservation: Digital Archives Project Saves Historical Documents",
        slug: "heritage-preservation",
        source: "Cultural Heritage Weekly",
        categories: ["Culture", "Technology"],
        description: "International effort to digitize and preserve historical documents ensures cultural heritage accessibility for future generations.",
        image: "DB2777/ffffff?text=Heritage",
        snippet: "Historical preservation goes digital...",
    },
];

pub const MOCK_ARTICLE_COUNT: usize = SEEDS.len();

/// Up to `count` mock articles, published an hour apart starting now.
/// Ids are `mock_N` and uuids `mock-uuid-N`, 1-based.
pub fn mock_articles(count: usize) -> Vec<RawArticle> {
    let now = Utc::now();

    SEEDS
        .iter()
        .take(count)
        .enumerate()
        .map(|(index, seed)| RawArticle {
            uuid: Some(format!("mock-uuid-{}", index + 1)),
            article_id: Some(format!("mock_{}", index + 1)),
            title: Some(seed.title.to_string()),
            description: Some(seed.description.to_string()),
            snippet: Some(seed.snippet.to_string()),
            url: Some(format!("https://example.com/{}", seed.slug)),
            image_url: Some(format!("https://via.placeholder.com/400x300/{}", seed.image)),
            published_at: Some((now - Duration::hours(index as i64)).to_rfc3339()),
            source: Some(SourceField::Name(seed.source.to_string())),
            categories: Some(CategoryField::Many(
                seed.categories.iter().map(|c| c.to_string()).collect(),
            )),
            ..Default::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_ids() {
        let articles = mock_articles(100);
        assert_eq!(articles.len(), MOCK_ARTICLE_COUNT);
        assert_eq!(articles[0].uuid.as_deref(), Some("mock-uuid-1"));
        assert_eq!(articles[9].article_id.as_deref(), Some("mock_10"));
    }

    #[test]
    fn test_mock_respects_count() {
        assert_eq!(mock_articles(3).len(), 3);
        assert!(mock_articles(0).is_empty());
    }
}
