pub mod models;
pub mod services;
pub mod api;
pub mod logging;

use anyhow::Context;
use tracing::{info, warn};

use api::{build_router, AppState};
use services::config_store::{AppConfig, ConfigStore};

pub use logging::{init_logging, LogSettings};

/// Config file first (written with defaults on first run), then environment.
pub fn load_config() -> AppConfig {
    let mut config = match ConfigStore::default_config_dir() {
        Some(dir) => {
            let store = ConfigStore::new(dir);
            match store.init_if_missing() {
                Ok(true) => info!("[config] Wrote defaults to {}", store.config_file().display()),
                Ok(false) => {}
                Err(e) => warn!("[config] Could not write defaults: {}", e),
            }
            store.load_or_default()
        }
        None => {
            warn!("[config] No config directory on this platform, using defaults");
            AppConfig::default()
        }
    };
    config.apply_env_overrides();
    config
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => {
            warn!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await
        }
    }
}

/// Serve the HTTP API until Ctrl-C, with the dashboard refresh running
/// alongside.
pub async fn run() -> anyhow::Result<()> {
    init_logging(&LogSettings::from_env());

    let config = load_config();
    let bind = config.server.bind.clone();
    if config.auth.enabled && config.auth.session_tokens.is_empty() {
        warn!("[auth] No session tokens configured; protected routes will redirect to sign-in");
    }

    let state = AppState::from_config(config).context("building services")?;
    let refresh = state.refresh.clone();

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {}", bind))?;
    info!("Listening on http://{}", bind);

    refresh.start();
    let served = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(ctrl_c())
        .await
        .context("serving HTTP");
    refresh.stop().await;

    served
}
