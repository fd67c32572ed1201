//! Persistent cache for geocoding results
//!
//! Place names resolve to the same coordinates for a long time, so resolved
//! places are cached on disk with a TTL, keyed by the normalized query.
//! Forecast samples are deliberately never cached: every aggregation run
//! fetches fresh data.

use crate::models::ResolvedPlace;
use anyhow::{Result, anyhow};
use fjall::Keyspace;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::OnceCell;
use tokio::task;

static GLOBAL_CACHE: OnceCell<GeocodeCache> = OnceCell::const_new();

/// One cached geocoding result with its expiry instant
#[derive(Serialize, Deserialize)]
struct CachedPlace {
    place: ResolvedPlace,
    expires_at: u64, // Unix timestamp (seconds)
}

impl CachedPlace {
    fn is_fresh(&self, now: u64) -> bool {
        now < self.expires_at
    }
}

/// On-disk cache mapping normalized place queries to resolved coordinates
pub struct GeocodeCache {
    store: Keyspace,
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

impl GeocodeCache {
    /// Open (or create) a cache rooted at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let store = db.keyspace("geocode", fjall::KeyspaceCreateOptions::default)?;
        Ok(GeocodeCache { store })
    }

    /// Cache the resolved place for `query` with a time-to-live
    #[tracing::instrument(name = "cache_place", level = "debug", skip(self, place))]
    pub async fn put(&self, query: &str, place: &ResolvedPlace, ttl: Duration) -> Result<()> {
        let expires_at = unix_now()?
            .checked_add(ttl.as_secs())
            .ok_or(anyhow!("TTL overflow"))?;
        let entry = CachedPlace {
            place: place.clone(),
            expires_at,
        };
        let bytes = postcard::to_stdvec(&entry)?;

        let store = self.store.clone();
        let key = ResolvedPlace::cache_key(query).into_bytes();
        let _ = task::spawn_blocking(move || store.insert(key, bytes)).await?;
        Ok(())
    }

    /// Cached place for `query`, if present and still fresh. Expired entries
    /// are dropped on read.
    #[tracing::instrument(name = "lookup_place", level = "debug", skip(self))]
    pub async fn get(&self, query: &str) -> Result<Option<ResolvedPlace>> {
        let store = self.store.clone();
        let key = ResolvedPlace::cache_key(query).into_bytes();
        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || -> Result<Option<Vec<u8>>> {
                Ok(store.get(key)?.map(|v| v.to_vec()))
            })
            .await??;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("Query not cached");
            return Ok(None);
        };

        let entry: CachedPlace = postcard::from_bytes(&bytes)?;
        if entry.is_fresh(unix_now()?) {
            tracing::debug!("Cached place still fresh");
            Ok(Some(entry.place))
        } else {
            tracing::debug!("Cached place expired");
            self.remove(query).await?;
            Ok(None)
        }
    }

    /// Drop the cached place for `query`
    pub async fn remove(&self, query: &str) -> Result<()> {
        let store = self.store.clone();
        let key = ResolvedPlace::cache_key(query).into_bytes();
        let _ = task::spawn_blocking(move || store.remove(key)).await?;
        Ok(())
    }
}

/// Initializes the global geocode cache. Library callers that never call
/// this simply bypass caching.
pub fn init(path: impl AsRef<Path>) -> Result<()> {
    let cache = GeocodeCache::open(path)?;
    GLOBAL_CACHE
        .set(cache)
        .map_err(|_| anyhow!("Cache already initialized"))?;
    Ok(())
}

/// Cached place for `query`; `None` when the cache was never initialized,
/// the query is unknown, or the entry has expired.
pub async fn lookup(query: &str) -> Result<Option<ResolvedPlace>> {
    match GLOBAL_CACHE.get() {
        Some(cache) => cache.get(query).await,
        None => Ok(None),
    }
}

/// Cache a geocoding result; a no-op when the cache was never initialized.
pub async fn store(query: &str, place: &ResolvedPlace, ttl: Duration) -> Result<()> {
    match GLOBAL_CACHE.get() {
        Some(cache) => cache.put(query, place, ttl).await,
        None => Ok(()),
    }
}
