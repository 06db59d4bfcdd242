// Logging
// One log file per run plus console output, with old files pruned in the background

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_PREFIX: &str = "falsify_";
const LOG_SUFFIX: &str = ".log";
const LOGS_TO_KEEP: usize = 30;

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Logging switches read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// `None` disables the file sink.
    pub dir: Option<PathBuf>,
    pub prune: bool,
}

fn truthy(value: Option<String>) -> bool {
    matches!(value.as_deref(), Some("1" | "true" | "TRUE"))
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `FALSIFY_DISABLE_FILE_LOG`, `FALSIFY_LOG_DIR`, `FALSIFY_DISABLE_LOG_CLEANUP`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let dir = if truthy(lookup("FALSIFY_DISABLE_FILE_LOG")) {
            None
        } else {
            Some(
                lookup("FALSIFY_LOG_DIR")
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(default_log_dir),
            )
        };

        Self {
            dir,
            prune: !truthy(lookup("FALSIFY_DISABLE_LOG_CLEANUP")),
        }
    }
}

fn default_log_dir() -> PathBuf {
    if cfg!(debug_assertions) {
        return PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("logs");
    }
    dirs::data_local_dir()
        .map(|d| d.join("falsify").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

pub fn log_file_name(stamp: &str) -> String {
    format!("{}{}{}", LOG_PREFIX, stamp, LOG_SUFFIX)
}

/// Install the global subscriber. Falls back to console only when the log
/// directory can't be created.
pub fn init_logging(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_target = settings.dir.as_ref().and_then(|dir| match fs::create_dir_all(dir) {
        Ok(()) => {
            let name = log_file_name(&chrono::Local::now().format("%Y%m%d_%H%M%S").to_string());
            Some((dir.clone(), name))
        }
        Err(e) => {
            eprintln!("Cannot create log dir {}: {}", dir.display(), e);
            None
        }
    });

    let file_layer = file_target.as_ref().map(|(dir, name)| {
        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
        let _ = FILE_GUARD.set(guard);
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!("=== Falsify {} ===", env!("CARGO_PKG_VERSION"));
    match file_target {
        Some((dir, name)) => {
            info!("Log file: {}", dir.join(&name).display());
            if settings.prune {
                std::thread::spawn(move || prune_logs(&dir, LOGS_TO_KEEP));
            }
        }
        None => info!("File logging off"),
    }
}

/// Remove all but the `keep` newest `falsify_*.log` files. Names carry a
/// sortable timestamp, so newest sorts last.
pub fn prune_logs(dir: &Path, keep: usize) -> usize {
    let Ok(read) = fs::read_dir(dir) else {
        return 0;
    };

    let mut logs: Vec<PathBuf> = read
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_PREFIX) && n.ends_with(LOG_SUFFIX))
        })
        .collect();

    if logs.len() <= keep {
        return 0;
    }
    logs.sort();

    let excess = logs.len() - keep;
    logs.iter()
        .take(excess)
        .filter(|path| fs::remove_file(path).is_ok())
        .count()
}
