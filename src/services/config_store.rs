// Configuration Storage Service
// Handles config file read/write, version backup and environment overrides

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_NEWS_URL: &str = "https://api.thenewsapi.com/v1/news";
pub const DEFAULT_DEEPFAKE_URL: &str = "http://127.0.0.1:8000/detect/";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_SIGN_IN_PATH: &str = "/sign-in";

const MAX_BACKUPS: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError + '_ {
    move |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub deepfake: DeepfakeConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerConfig::default(),
            news: NewsConfig::default(),
            deepfake: DeepfakeConfig::default(),
            scoring: ScoringConfig::default(),
            dashboard: DashboardConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsConfig {
    #[serde(default = "default_news_url")]
    pub base_url: String,
    /// Read from `NEWS_API_TOKEN` when unset. Requests go out without a token otherwise.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_news_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_strategy_delay")]
    pub strategy_delay_ms: u64,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_news_url(),
            api_token: None,
            timeout_secs: default_news_timeout(),
            strategy_delay_ms: default_strategy_delay(),
            default_limit: default_limit(),
        }
    }
}

impl NewsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn strategy_delay(&self) -> Duration {
        Duration::from_millis(self.strategy_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepfakeConfig {
    #[serde(default = "default_deepfake_url")]
    pub url: String,
    #[serde(default = "default_deepfake_timeout")]
    pub timeout_secs: u64,
    /// Request body cap for `/deepfake/detect`, covering every file in the upload.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for DeepfakeConfig {
    fn default() -> Self {
        Self {
            url: default_deepfake_url(),
            timeout_secs: default_deepfake_timeout(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Random perturbation on scores. Off gives reproducible output.
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { jitter: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    #[serde(default = "default_limit")]
    pub article_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
            article_limit: default_limit(),
        }
    }
}

impl DashboardConfig {
    /// Never shorter than one second.
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub session_tokens: Vec<String>,
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            session_tokens: Vec::new(),
            sign_in_path: default_sign_in_path(),
        }
    }
}

fn default_version() -> String { env!("CARGO_PKG_VERSION").to_string() }
fn default_bind() -> String { DEFAULT_BIND.to_string() }
fn default_news_url() -> String { DEFAULT_NEWS_URL.to_string() }
fn default_deepfake_url() -> String { DEFAULT_DEEPFAKE_URL.to_string() }
fn default_sign_in_path() -> String { DEFAULT_SIGN_IN_PATH.to_string() }
fn default_true() -> bool { true }
fn default_news_timeout() -> u64 { 12 }
fn default_deepfake_timeout() -> u64 { 60 }
fn default_max_upload_bytes() -> usize { 25 * 1024 * 1024 }
fn default_strategy_delay() -> u64 { 1000 }
fn default_limit() -> usize { 10 }
fn default_refresh_secs() -> u64 { 300 }

impl AppConfig {
    /// Apply `FALSIFY_BIND`, `NEWS_API_TOKEN`, `NEWS_API_URL` and `DEEPFAKE_API_URL`.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(bind) = get("FALSIFY_BIND") {
            self.server.bind = bind;
        }
        if let Some(token) = get("NEWS_API_TOKEN") {
            self.news.api_token = Some(token);
        }
        if let Some(url) = get("NEWS_API_URL") {
            self.news.base_url = url;
        }
        if let Some(url) = get("DEEPFAKE_API_URL") {
            self.deepfake.url = url;
        }
    }
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// `FALSIFY_CONFIG_DIR`, or `<config_dir>/falsify`.
    pub fn default_config_dir() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var("FALSIFY_CONFIG_DIR") {
            if !dir.trim().is_empty() {
                return Some(PathBuf::from(dir));
            }
        }
        dirs::config_dir().map(|p| p.join("falsify"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(io_error(&self.config_dir))
    }

    /// Load configuration from file
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file).map_err(io_error(&self.config_file))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load, falling back to defaults on any error.
    pub fn load_or_default(&self) -> AppConfig {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                warn!("[config] {}; using defaults", e);
                AppConfig::default()
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.ensure_dir()?;

        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_file, content).map_err(io_error(&self.config_file))?;
        info!("[config] Saved {}", self.config_file.display());
        Ok(())
    }

    /// Write the defaults when no config file exists yet.
    pub fn init_if_missing(&self) -> Result<bool, ConfigError> {
        if self.config_file.exists() {
            return Ok(false);
        }
        self.save(&AppConfig::default())?;
        Ok(true)
    }

    /// Load, modify and save.
    pub fn update<F>(&self, apply: F) -> Result<AppConfig, ConfigError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.load()?;
        apply(&mut config);
        self.save(&config)?;
        Ok(config)
    }

    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir).map_err(io_error(&backup_dir))?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S%.3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file).map_err(io_error(&backup_file))?;

        self.cleanup_old_backups(&backup_dir, MAX_BACKUPS)
    }

    /// Remove old backups, keeping only the most recent N
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(io_error(backup_dir))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Oldest first; the timestamped names sort chronologically
        entries.sort_by_key(|e| e.file_name());

        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}
