// Periodic Dashboard Refresh
// Background fetch-and-enrich loop publishing the latest feed snapshot

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::models::{AiSummary, NewsResponse};
use crate::services::detection::ai_summary;
use crate::services::news_feed::NewsFeed;

/// The most recent refresh result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub refreshed_at: String,
    pub summary: AiSummary,
    pub feed: NewsResponse,
}

pub type SnapshotStore = Arc<RwLock<Option<DashboardSnapshot>>>;

struct RunningTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct PeriodicRefresh {
    feed: NewsFeed,
    period: Duration,
    limit: usize,
    snapshot: SnapshotStore,
    task: Mutex<Option<RunningTask>>,
}

impl PeriodicRefresh {
    pub fn new(feed: NewsFeed, period: Duration, limit: usize) -> Self {
        Self {
            feed,
            period,
            limit,
            snapshot: Arc::new(RwLock::new(None)),
            task: Mutex::new(None),
        }
    }

    pub fn snapshot_store(&self) -> SnapshotStore {
        self.snapshot.clone()
    }

    pub async fn latest(&self) -> Option<DashboardSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// Fetch once and publish the result.
    pub async fn refresh_once(&self) -> DashboardSnapshot {
        refresh(&self.feed, self.limit, &self.snapshot).await
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|t| !t.handle.is_finished()))
            .unwrap_or(false)
    }

    /// Spawn the loop. The first refresh runs immediately. Returns false when
    /// a loop is already running.
    pub fn start(&self) -> bool {
        let Ok(mut slot) = self.task.lock() else {
            warn!("[refresh] Task slot poisoned; not starting");
            return false;
        };
        if slot.as_ref().is_some_and(|t| !t.handle.is_finished()) {
            return false;
        }

        let token = CancellationToken::new();
        let child = token.clone();
        let feed = self.feed.clone();
        let snapshot = self.snapshot.clone();
        let period = self.period;
        let limit = self.limit;

        info!("[refresh] Starting dashboard refresh every {}s", period.as_secs());

        let handle = tokio::spawn(async move {
            let mut timer = interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = child.cancelled() => {
                        debug!("[refresh] Cancelled");
                        break;
                    }
                    _ = timer.tick() => {
                        refresh(&feed, limit, &snapshot).await;
                    }
                }
            }
        });

        *slot = Some(RunningTask { token, handle });
        true
    }

    /// Cancel the loop and wait for it to exit.
    pub async fn stop(&self) {
        let running = match self.task.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        if let Some(task) = running {
            task.token.cancel();
            if let Err(e) = task.handle.await {
                warn!("[refresh] Task ended abnormally: {}", e);
            }
            info!("[refresh] Stopped");
        }
    }

    pub async fn restart(&self) -> bool {
        self.stop().await;
        self.start()
    }
}

async fn refresh(feed: &NewsFeed, limit: usize, store: &SnapshotStore) -> DashboardSnapshot {
    let response = feed.load(limit).await;
    let snapshot = DashboardSnapshot {
        refreshed_at: Utc::now().to_rfc3339(),
        summary: ai_summary(&response.data),
        feed: response,
    };
    info!(
        "[refresh] Snapshot updated: {} articles ({:?})",
        snapshot.feed.total_results, snapshot.feed.ai_mode
    );
    *store.write().await = Some(snapshot.clone());
    snapshot
}
