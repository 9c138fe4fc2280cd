//! Fingerprint cache for recommendation results.
//!
//! Identical requests are served from memory without calling the generator
//! again. Requests are keyed by a canonical fingerprint in which origin
//! coordinates are rounded to 4 decimal places (~11 m), so GPS jitter
//! between two otherwise identical requests still hits the same entry.
//!
//! Entries are never mutated in place. By default they live for the whole
//! process; `CacheConfig` can bound them by age or count.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{RecommendRequest, ValidatedTrip};

/// Cached result list for one fingerprint.
pub type TripList = Arc<Vec<ValidatedTrip>>;

/// Canonical cache key for a recommendation request.
///
/// Built from every field that distinguishes one request from another, so
/// distinct requests cannot share a key. The popularity bias only takes
/// part for Foodie requests, where it changes the answer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(request: &RecommendRequest) -> Self {
        let location = &request.location;
        let prefs = &request.preferences;

        let popularity = prefs
            .effective_popularity()
            .map_or("-", |bias| bias.as_str());

        // The label is written in quoted, escaped form so that no label
        // can imitate the fields that follow it.
        Self(format!(
            "{}|{}|{:?}|{}|{}|{}|{}",
            round_coordinate(location.latitude),
            round_coordinate(location.longitude),
            location.label.as_deref().unwrap_or(""),
            prefs.time_budget_hours,
            prefs.mood,
            prefs.travel_mode,
            popularity,
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Round a coordinate to 4 decimal places.
///
/// Goes through an integer count of 1e-4 degree steps so that tiny
/// negative values never print as `-0.0000`.
fn round_coordinate(degrees: f64) -> String {
    let steps = (degrees * 1e4).round() as i64;
    format!("{:.4}", steps as f64 / 1e4)
}

/// Configuration for the cache.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Evict entries this long after insertion. `None` keeps them forever.
    pub ttl: Option<Duration>,

    /// Maximum number of cached entries. `None` is unbounded.
    pub max_capacity: Option<u64>,
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }
}

/// Process-wide cache of validated recommendation lists.
///
/// Cheap to clone; clones share the same storage. All operations are
/// synchronized internally.
#[derive(Clone)]
pub struct TripCache {
    entries: MokaCache<Fingerprint, TripList>,
}

impl TripCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = MokaCache::builder();
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        if let Some(max_capacity) = config.max_capacity {
            builder = builder.max_capacity(max_capacity);
        }

        Self {
            entries: builder.build(),
        }
    }

    /// Get a cached result list.
    pub async fn get(&self, key: &Fingerprint) -> Option<TripList> {
        self.entries.get(key).await
    }

    /// Insert a result list, replacing any previous one for this key.
    pub async fn put(&self, key: Fingerprint, trips: TripList) {
        self.entries.insert(key, trips).await;
    }

    /// Return the cached list for `key`, or run `init` to produce it.
    ///
    /// Concurrent callers for the same missing key share one run of `init`.
    /// Errors are handed to every waiting caller and nothing is stored, so a
    /// later call starts afresh. The returned flag is true when the list
    /// came from the cache.
    pub async fn get_or_try_insert_with<F, E>(
        &self,
        key: Fingerprint,
        init: F,
    ) -> Result<(TripList, bool), Arc<E>>
    where
        F: Future<Output = Result<TripList, E>>,
        E: Send + Sync + 'static,
    {
        let entry = self.entries.entry(key).or_try_insert_with(init).await?;
        let hit = !entry.is_fresh();
        Ok((entry.into_value(), hit))
    }

    /// Number of cached entries.
    ///
    /// Approximate until pending maintenance has run; see [`Self::sync`].
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Apply pending insertions and evictions to the statistics.
    pub async fn sync(&self) {
        self.entries.run_pending_tasks().await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for TripCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
