//! Time-bounded cache of downloaded season archives.
//!
//! The cache is an ordinary value owned by the caller and handed to the run,
//! so its lifetime and expiry are explicit. Time is passed in rather than read
//! from the clock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::data::lvr::{ArchiveSource, env_secs};
use crate::domain::Season;
use crate::error::AppError;

pub const DEFAULT_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
struct Entry {
    fetched_at: DateTime<Utc>,
    bytes: Arc<[u8]>,
}

#[derive(Debug, Clone)]
pub struct ArchiveCache {
    ttl: Duration,
    entries: HashMap<Season, Entry>,
}

impl ArchiveCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// TTL from `LVR_CACHE_TTL_SECS` (default one hour).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let secs = env_secs("LVR_CACHE_TTL_SECS", DEFAULT_TTL_SECS)?;
        Ok(Self::new(ttl_from_secs(secs)?))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached bytes for `season`, if still fresh at `now`.
    pub fn get(&self, season: Season, now: DateTime<Utc>) -> Option<Arc<[u8]>> {
        self.entries
            .get(&season)
            .filter(|e| now - e.fetched_at < self.ttl)
            .map(|e| Arc::clone(&e.bytes))
    }

    /// Return fresh cached bytes or fetch (and cache) them. Stale entries for
    /// any season are dropped first. Failed fetches are not cached.
    pub fn get_or_fetch(
        &mut self,
        season: Season,
        now: DateTime<Utc>,
        source: &dyn ArchiveSource,
    ) -> Result<Arc<[u8]>, AppError> {
        self.evict_expired(now);
        if let Some(bytes) = self.get(season, now) {
            debug!(%season, "archive cache hit");
            return Ok(bytes);
        }

        debug!(%season, "archive cache miss");
        let bytes: Arc<[u8]> = Arc::from(source.fetch(season)?);
        self.entries.insert(
            season,
            Entry {
                fetched_at: now,
                bytes: Arc::clone(&bytes),
            },
        );
        Ok(bytes)
    }

    /// Drop every entry that is stale at `now`.
    pub fn evict_expired(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.entries.retain(|_, e| now - e.fetched_at < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn ttl_from_secs(secs: u64) -> Result<Duration, AppError> {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| AppError::input(format!("`LVR_CACHE_TTL_SECS` is out of range: {secs}")))
}
