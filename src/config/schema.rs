use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::github::cache::DEFAULT_TTL;
use crate::params::RawParams;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub defaults: CardDefaults,
    pub cache: CacheSettings,
}

/// Card options applied beneath command-line flags
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CardDefaults {
    pub theme: Option<String>,
    pub mode: Option<String>,
    pub limit: Option<i64>,
    pub min_stars: Option<i64>,
    pub stats: Option<String>,
}

impl CardDefaults {
    pub fn to_params(&self) -> RawParams {
        RawParams {
            theme: self.theme.clone(),
            mode: self.mode.clone(),
            limit: self.limit,
            min_stars: self.min_stars,
            stats: self.stats.clone(),
            ..RawParams::default()
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    /// Freshness window, e.g. "30m" or "1h"
    pub ttl: Option<String>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: None,
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> anyhow::Result<Duration> {
        match &self.ttl {
            Some(ttl) => humantime::parse_duration(ttl)
                .map_err(|e| anyhow::anyhow!("Invalid cache ttl '{}': {}", ttl, e)),
            None => Ok(DEFAULT_TTL),
        }
    }
}
