use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::github::types::RawPullRequest;

/// Default time a cached PR list stays fresh
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Get the platform-appropriate cache directory for pr-stats-card
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("pr-stats-card/records"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/pr-stats-card/records",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Remove a cache directory; a missing directory is not an error
pub fn clear_cache(cache_path: &Path) -> Result<()> {
    match std::fs::remove_dir_all(cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

#[derive(Serialize, Deserialize)]
struct CachedRecords {
    fetched_at: DateTime<Utc>,
    records: Vec<RawPullRequest>,
}

/// Per-user store of fetched PR records.
///
/// Lookups and writes never fail the caller: unreadable or stale entries are
/// misses and write errors are only logged. Disk access runs on the blocking
/// thread pool.
#[derive(Debug, Clone)]
pub struct PrCache {
    cache_path: PathBuf,
    ttl: Duration,
    enabled: bool,
}

impl PrCache {
    pub fn new(cache_path: PathBuf, ttl: Duration) -> Self {
        Self {
            cache_path,
            ttl,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            cache_path: get_cache_path(),
            ttl: DEFAULT_TTL,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logins are case-insensitive, so keys are too
    pub fn key(username: &str) -> String {
        format!("github_pr_stats:{}", username.to_lowercase())
    }

    pub async fn get(&self, username: &str) -> Option<Vec<RawPullRequest>> {
        if !self.enabled {
            return None;
        }

        let cache = self.clone();
        let username = username.to_string();
        match tokio::task::spawn_blocking(move || cache.read_entry(&username)).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Cache lookup task failed");
                None
            }
        }
    }

    pub async fn put(&self, username: &str, records: &[RawPullRequest]) {
        if !self.enabled {
            return;
        }

        let cache = self.clone();
        let username = username.to_string();
        let records = records.to_vec();
        if let Err(e) =
            tokio::task::spawn_blocking(move || cache.write_entry(&username, records)).await
        {
            tracing::warn!(error = %e, "Cache write task failed");
        }
    }

    fn read_entry(&self, username: &str) -> Option<Vec<RawPullRequest>> {
        let key = Self::key(username);
        let bytes = cacache::read_sync(&self.cache_path, &key).ok()?;
        let entry: CachedRecords = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(%key, error = %e, "Ignoring unreadable cache entry");
                return None;
            }
        };

        let age = Utc::now().signed_duration_since(entry.fetched_at);
        match age.to_std() {
            Ok(age) if age < self.ttl => Some(entry.records),
            _ => {
                tracing::debug!(%key, "Cache entry expired");
                None
            }
        }
    }

    fn write_entry(&self, username: &str, records: Vec<RawPullRequest>) {
        let key = Self::key(username);
        let entry = CachedRecords {
            fetched_at: Utc::now(),
            records,
        };
        let result = serde_json::to_vec(&entry)
            .context("Failed to serialize cache entry")
            .and_then(|bytes| {
                cacache::write_sync(&self.cache_path, &key, bytes)
                    .context("Failed to write cache entry")
            });

        if let Err(e) = result {
            tracing::warn!(%key, error = %e, "Could not cache pull requests");
        }
    }
}
