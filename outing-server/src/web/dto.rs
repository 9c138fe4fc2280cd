//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::ValidatedTrip;
use crate::pipeline::Recommendation;

/// Response to a recommendation request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub trips: Vec<ValidatedTrip>,

    /// Whether the trips came from the cache
    pub cached: bool,

    /// Cache key the request mapped to
    pub fingerprint: String,

    pub generated_at: DateTime<Utc>,
}

impl RecommendResponse {
    /// Create from a pipeline result, stamped with the current time.
    pub fn from_recommendation(rec: Recommendation) -> Self {
        Self {
            trips: rec.trips.as_ref().clone(),
            cached: rec.cache_hit,
            fingerprint: rec.fingerprint.to_string(),
            generated_at: Utc::now(),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    /// Number of cached recommendation sets
    pub entries: u64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Whether the same request may succeed if sent again
    pub retryable: bool,
}
