//! Generator payload DTOs.
//!
//! These mirror the JSON the generator is asked to produce. Every field is
//! kept as a loose JSON value so that one badly typed field marks only that
//! field as defective instead of failing the whole record.

use serde::Deserialize;
use serde_json::Value;

/// Top-level generator payload: `{"trips": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TripsPayload {
    /// Absent or null is treated as no trips.
    #[serde(default)]
    pub trips: Option<Vec<Value>>,
}

/// One trip record as produced by the generator.
///
/// The generator's own `totalTimeMinutes` is not read; totals are
/// recomputed from the corrected travel time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrip {
    pub id: Option<Value>,

    /// Specific, searchable place name.
    pub name: Option<Value>,

    /// Category, e.g. "Speakeasy" or "Hidden Garden".
    #[serde(rename = "type")]
    pub category: Option<Value>,

    pub description: Option<Value>,

    /// Claimed one-way travel time in minutes.
    pub travel_time_minutes: Option<Value>,

    pub stay_time_minutes: Option<Value>,

    pub score: Option<Value>,

    pub itinerary: Option<Value>,

    /// Cited source or quality behind the recommendation.
    pub reason: Option<Value>,

    /// `{"lat": .., "lng": ..}` of the destination.
    pub coordinates: Option<Value>,
}
