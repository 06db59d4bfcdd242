// Pattern Rules
// Weighted regular-expression catalogs for the three scorer variants

use regex::RegexBuilder;
use std::sync::LazyLock;
use tracing::warn;

/// A rule before compilation.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub name: &'static str,
    pub pattern: &'static str,
    pub weight: f64,
}

const fn rule(name: &'static str, pattern: &'static str, weight: f64) -> RuleSpec {
    RuleSpec { name, pattern, weight }
}

#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: &'static str,
    pub weight: f64,
    regex: regex::Regex,
}

impl CompiledRule {
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// An ordered list of compiled rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile the specs in order, case-insensitively. A pattern that fails to
    /// compile is logged and skipped.
    pub fn compile(specs: &[RuleSpec]) -> Self {
        let rules = specs
            .iter()
            .filter_map(|spec| {
                RegexBuilder::new(spec.pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| warn!("[rules] Skipping invalid pattern '{}': {}", spec.name, e))
                    .ok()
                    .map(|regex| CompiledRule {
                        name: spec.name,
                        weight: spec.weight,
                        regex,
                    })
            })
            .collect();
        Self { rules }
    }

    /// Rules that match, in catalog order.
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a CompiledRule> + 'a {
        self.rules.iter().filter(move |r| r.is_match(text))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ============ Free-text analyzer ============

pub const ARTICLE_SUSPICIOUS: &[RuleSpec] = &[
    rule("Urgent language detected", r"breaking|urgent|alert", 0.2),
    rule("Sensational language detected", r"shocking|exposed|secret|hidden", 0.25),
    rule("Clickbait phrases detected", r"you won't believe|doctors hate|one weird trick", 0.4),
    rule("Conspiracy language detected", r"government doesn't want|big pharma|conspiracy", 0.3),
    rule("Excessive exclamation marks", r"!{2,}", 0.15),
    // Any run of five letters, either case
    rule("Excessive capitalization", r"[A-Z]{5,}", 0.1),
];

/// Weights are subtracted from the fake score.
pub const ARTICLE_CREDIBLE: &[RuleSpec] = &[
    rule("Source attribution found", r"according to|study shows|research indicates", 0.2),
    rule("Academic source referenced", r"published in|peer.?reviewed|journal", 0.25),
    rule("Data-driven language", r"data shows|statistics indicate|survey found", 0.15),
    rule("Official sources quoted", r"officials said|spokesperson|statement", 0.1),
];

// ============ Headline analyzer (0-100 scale) ============

pub const HEADLINE_FAKE: &[RuleSpec] = &[
    rule("Urgent language", r"breaking|urgent|alert", 15.0),
    rule("Sensational language", r"shocking|exposed|secret|hidden|revealed", 15.0),
    rule("Clickbait phrases", r"you won't believe|doctors hate|one weird trick", 15.0),
    rule("Conspiracy language", r"government doesn't want|conspiracy|cover.?up", 15.0),
    rule("Excessive emphasis", r"!{2,}|SHOCKING|BREAKING", 15.0),
    rule("Exaggerated claims", r"miracle|instant|amazing|incredible", 15.0),
];

pub const HEADLINE_CREDIBLE: &[RuleSpec] = &[
    rule("Source attribution", r"study|research|according to|officials", 10.0),
    rule("Data-driven language", r"report|data|survey|analysis", 10.0),
    rule("Official statements", r"says|announces|confirms|states", 10.0),
];

// ============ Feed annotator ============

pub const FEED_SUSPICIOUS_TITLE: &[RuleSpec] = &[
    rule("Sensational title", r"breaking|urgent|alert|shocking|exposed|secret|hidden|truth|conspiracy", 0.3),
    rule("Clickbait title", r"you won't believe|doctors hate|one weird trick|shocking truth", 0.3),
    rule("Conspiracy title", r"government doesn't want|big pharma|hidden agenda", 0.3),
    rule("Emphatic title", r"!{2,}|CAPITAL LETTERS|amazing discovery", 0.3),
];

pub const FEED_RELIABLE_SOURCES: &[&str] = &[
    "reuters",
    "associated press",
    "bbc",
    "cnn",
    "bloomberg",
    "wall street journal",
    "new york times",
    "washington post",
    "npr",
    "pbs",
    "abc news",
    "cbs news",
    "nbc news",
    "technews daily",
    "environmental science",
    "medical journal",
    "education world",
    "energy report",
    "financial times",
];

pub const FEED_FACTUAL_WORDS: &[&str] = &[
    "study",
    "research",
    "data",
    "according to",
    "reported",
    "official",
    "confirmed",
    "analysis",
];

pub const FEED_SENSATIONAL_WORDS: &[&str] = &[
    "incredible",
    "unbelievable",
    "miracle",
    "secret",
    "exposed",
    "revealed",
];

pub static ARTICLE_SUSPICIOUS_RULES: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(ARTICLE_SUSPICIOUS));
pub static ARTICLE_CREDIBLE_RULES: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(ARTICLE_CREDIBLE));
pub static HEADLINE_FAKE_RULES: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(HEADLINE_FAKE));
pub static HEADLINE_CREDIBLE_RULES: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(HEADLINE_CREDIBLE));
pub static FEED_TITLE_RULES: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(FEED_SUSPICIOUS_TITLE));
