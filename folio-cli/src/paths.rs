//! Where folio keeps its files.
//!
//! The settings database lives in the platform data directory and the logs
//! in the platform cache directory, both under `dev.folio.folio`.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const LATEST_LOG: &str = "latest.log";
const SETTINGS_DB: &str = "settings.db";

/// Archived logs kept besides `latest.log`.
const KEPT_LOGS: usize = 25;

/// Resolved per-user directories.
#[derive(Debug, Clone)]
pub struct AppDirs {
    data: PathBuf,
    cache: PathBuf,
}

impl AppDirs {
    /// `None` when the platform reports no home directory.
    pub fn locate() -> Option<Self> {
        let dirs = ProjectDirs::from("dev", "folio", "folio")?;
        Some(Self {
            data: dirs.data_dir().to_path_buf(),
            cache: dirs.cache_dir().to_path_buf(),
        })
    }

    pub fn settings_db(&self) -> PathBuf {
        self.data.join(SETTINGS_DB)
    }

    pub fn log_file(&self) -> PathBuf {
        self.cache.join(LATEST_LOG)
    }

    /// Archive the previous run's log and prune old archives.
    ///
    /// Must run before the new `latest.log` is created.
    pub fn rotate_logs(&self) {
        rotate_logs_in(&self.cache);
    }
}

fn rotate_logs_in(dir: &Path) {
    let latest = dir.join(LATEST_LOG);
    if latest.is_file() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&latest, dir.join(format!("{stamp}.log")));
    }
    prune_archived_logs(dir);
}

fn prune_archived_logs(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archived: Vec<(Option<std::time::SystemTime>, PathBuf)> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "log")
                && path.file_name().is_some_and(|name| name != LATEST_LOG)
        })
        .map(|path| (fs::metadata(&path).and_then(|m| m.modified()).ok(), path))
        .collect();

    if archived.len() <= KEPT_LOGS {
        return;
    }
    archived.sort();
    let excess = archived.len() - KEPT_LOGS;
    for (_, path) in archived.into_iter().take(excess) {
        let _ = fs::remove_file(path);
    }
}
