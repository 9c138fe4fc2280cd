//! Outing candidates before and after validation.

use serde::Serialize;

use super::Coordinates;

/// An outing as proposed by the generator.
///
/// Produced only by the payload validator, so the fields are well-formed,
/// but the numbers are still the generator's unverified claims.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateTrip {
    pub id: String,
    pub name: String,

    #[serde(rename = "type")]
    pub category: String,

    pub description: String,

    /// Why the generator recommended this place.
    pub reason: String,

    /// One-way travel time claimed by the generator.
    pub reported_travel_time_minutes: f64,

    pub stay_time_minutes: f64,

    /// Relevance score, 0 to 100.
    pub score: f64,

    pub itinerary: Vec<String>,

    #[serde(rename = "coordinates")]
    pub destination: Coordinates,
}

/// A candidate whose travel time has been checked and corrected.
///
/// This is the only trip type handed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedTrip {
    #[serde(flatten)]
    pub candidate: CandidateTrip,

    /// Trusted one-way travel time, in whole minutes.
    pub corrected_travel_time_minutes: u32,

    /// Two one-way legs plus the stay, in whole minutes.
    pub total_time_minutes: u32,

    /// Straight-line distance from the origin; 0 when the origin is unknown.
    pub distance_km: f64,
}

impl ValidatedTrip {
    /// Combine a candidate with its corrected one-way travel time.
    pub fn new(candidate: CandidateTrip, corrected_minutes: f64, distance_km: f64) -> Self {
        let total = 2.0 * corrected_minutes + candidate.stay_time_minutes;
        Self {
            corrected_travel_time_minutes: round_minutes(corrected_minutes),
            total_time_minutes: round_minutes(total),
            distance_km,
            candidate,
        }
    }

    pub fn id(&self) -> &str {
        &self.candidate.id
    }
}

/// Round a non-negative minute count to the nearest whole minute.
fn round_minutes(minutes: f64) -> u32 {
    minutes.max(0.0).round() as u32
}
