// Phishing URL Checker
// Structural checks on a URL, combined into a 0-100 risk score

use std::sync::Arc;

use thiserror::Error;
use url::{Host, Url};

use crate::models::{CheckStatus, Level, PhishingCheck, PhishingReport};
use crate::services::noise::NoiseSource;

const BRAND_KEYWORDS: &[&str] = &[
    "paypal", "apple", "google", "microsoft", "amazon", "netflix", "facebook", "instagram", "bank",
];

const CREDENTIAL_KEYWORDS: &[&str] = &[
    "login", "signin", "verify", "account", "secure", "update", "bank", "password", "wallet",
];

const ABUSED_TLDS: &[&str] = &["tk", "ml", "ga", "cf", "gq", "xyz", "top", "zip"];
const SHORTENERS: &[&str] = &["bit.ly", "tinyurl.com", "goo.gl", "t.co", "is.gd", "ow.ly"];

const MAX_SUBDOMAIN_LABELS: usize = 3;
const MAX_URL_LENGTH: usize = 75;
const MAX_HOST_HYPHENS: usize = 3;

const FAIL_POINTS: f64 = 20.0;
const WARNING_POINTS: f64 = 8.0;
const PHISHING_SCORE: u32 = 70;
const MEDIUM_RISK_SCORE: u32 = 40;

#[derive(Error, Debug, PartialEq)]
pub enum PhishingError {
    #[error("Please provide a URL to check")]
    Empty,
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[derive(Clone)]
pub struct PhishingChecker {
    noise: Arc<dyn NoiseSource>,
}

impl PhishingChecker {
    pub fn new(noise: Arc<dyn NoiseSource>) -> Self {
        Self { noise }
    }

    pub fn check(&self, input: &str) -> Result<PhishingReport, PhishingError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(PhishingError::Empty);
        }

        let url = parse_lenient(input)?;
        let host = match url.host() {
            Some(host) => host,
            None => return Err(PhishingError::InvalidUrl(input.to_string())),
        };

        let checks = vec![
            check("Domain reputation", domain_reputation(&host)),
            check(
                "SSL certificate",
                if url.scheme() == "https" { CheckStatus::Pass } else { CheckStatus::Warning },
            ),
            check("URL structure", url_structure(input, &host)),
            check("Content analysis", content_analysis(&url)),
            check("Blacklist check", blacklist(&host)),
        ];

        let fails = count(&checks, CheckStatus::Fail);
        let warnings = count(&checks, CheckStatus::Warning);

        let raw = self.noise.range(10.0, 50.0).floor()
            + fails as f64 * FAIL_POINTS
            + warnings as f64 * WARNING_POINTS;
        let score = raw.clamp(0.0, 100.0) as u32;

        let is_phishing = (fails >= 1 && score >= PHISHING_SCORE) || fails >= 2;
        let risk_level = if is_phishing {
            Level::High
        } else if score >= MEDIUM_RISK_SCORE {
            Level::Medium
        } else {
            Level::Low
        };

        Ok(PhishingReport {
            url: input.to_string(),
            is_phishing,
            risk_level,
            score,
            checks,
        })
    }
}

fn check(name: &str, status: CheckStatus) -> PhishingCheck {
    PhishingCheck {
        name: name.to_string(),
        status,
    }
}

fn count(checks: &[PhishingCheck], status: CheckStatus) -> usize {
    checks.iter().filter(|c| c.status == status).count()
}

/// Accepts bare hosts by assuming `http://`.
fn parse_lenient(input: &str) -> Result<Url, PhishingError> {
    let candidate = if input.contains("://") {
        input.to_string()
    } else {
        format!("http://{}", input)
    };
    Url::parse(&candidate).map_err(|e| PhishingError::InvalidUrl(e.to_string()))
}

/// Last two labels of a domain.
fn registrable_domain(domain: &str) -> String {
    let labels: Vec<&str> = domain.split('.').collect();
    let start = labels.len().saturating_sub(2);
    labels[start..].join(".")
}

fn domain_reputation(host: &Host<&str>) -> CheckStatus {
    let domain = match host {
        Host::Domain(d) => d.to_lowercase(),
        Host::Ipv4(_) | Host::Ipv6(_) => return CheckStatus::Fail,
    };

    if domain.split('.').any(|label| label.starts_with("xn--")) {
        return CheckStatus::Fail;
    }

    let registrable = registrable_domain(&domain);
    let impersonates = BRAND_KEYWORDS
        .iter()
        .any(|brand| domain.contains(brand) && !registrable.starts_with(brand));
    if impersonates {
        CheckStatus::Fail
    } else {
        CheckStatus::Pass
    }
}

fn url_structure(input: &str, host: &Host<&str>) -> CheckStatus {
    let (labels, hyphens) = match host {
        Host::Domain(d) => (d.split('.').count(), d.matches('-').count()),
        _ => (0, 0),
    };
    let subdomains = labels.saturating_sub(2);

    if input.contains('@')
        || subdomains > MAX_SUBDOMAIN_LABELS
        || input.chars().count() > MAX_URL_LENGTH
        || hyphens > MAX_HOST_HYPHENS
    {
        CheckStatus::Fail
    } else {
        CheckStatus::Pass
    }
}

fn content_analysis(url: &Url) -> CheckStatus {
    let tail = format!("{}?{}", url.path(), url.query().unwrap_or("")).to_lowercase();
    if CREDENTIAL_KEYWORDS.iter().any(|k| tail.contains(k)) {
        CheckStatus::Warning
    } else {
        CheckStatus::Pass
    }
}

fn blacklist(host: &Host<&str>) -> CheckStatus {
    let Host::Domain(domain) = host else {
        return CheckStatus::Pass;
    };
    let domain = domain.to_lowercase();
    let tld = domain.rsplit('.').next().unwrap_or("");

    if ABUSED_TLDS.contains(&tld) || SHORTENERS.contains(&domain.as_str()) {
        CheckStatus::Fail
    } else {
        CheckStatus::Pass
    }
}
