// Falsify Core Services

pub mod text_processor;
pub mod config_store;
pub mod noise;
pub mod detection;
pub mod enrichment;
pub mod news_client;
pub mod mock_articles;
pub mod news_feed;
pub mod deepfake_client;
pub mod phishing;
pub mod csv_export;
pub mod refresh;

pub use text_processor::*;
pub use config_store::*;
pub use noise::{noise_for, FixedNoise, NoNoise, NoiseSource, RandomNoise};

// Re-export detection module items
pub use detection::{
    ai_summary,
    generate_analytics,
    ContentScorer,
    FeedAnnotator,
    HeadlineScorer,
};
pub use enrichment::ArticleEnricher;
pub use news_client::{NewsClient, NewsError};
pub use news_feed::NewsFeed;
pub use deepfake_client::{DeepfakeClient, DeepfakeError, ImageUpload};
pub use phishing::{PhishingChecker, PhishingError};
pub use refresh::{DashboardSnapshot, PeriodicRefresh};
