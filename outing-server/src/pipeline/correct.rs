//! Reconciling the generator's travel times with the physics baseline.

use crate::domain::{CandidateTrip, Location, TravelMode, ValidatedTrip};
use crate::physics::{baseline_minutes, distance_km};

use super::config::CorrectionPolicy;

impl CorrectionPolicy {
    /// Trusted one-way minutes given a reported time and a baseline.
    ///
    /// Reports far below the baseline are replaced by it. Anything else is
    /// kept, since the generator may know about traffic or terrain the
    /// model cannot see, but never allowed below `floor_ratio` of it.
    pub fn correct(&self, reported_mins: f64, baseline_mins: f64) -> f64 {
        if reported_mins < self.implausible_ratio * baseline_mins {
            baseline_mins
        } else {
            reported_mins.max(self.floor_ratio * baseline_mins)
        }
    }
}

/// Measure and correct a single candidate.
///
/// With an unknown origin nothing can be measured: the distance is 0 and
/// the reported travel time is taken as-is.
pub fn correct_candidate(
    candidate: CandidateTrip,
    origin: &Location,
    mode: TravelMode,
    policy: &CorrectionPolicy,
) -> ValidatedTrip {
    let Some(origin) = origin.coordinates() else {
        let reported = candidate.reported_travel_time_minutes;
        return ValidatedTrip::new(candidate, reported, 0.0);
    };

    let distance = distance_km(origin, candidate.destination);
    let baseline = baseline_minutes(distance, mode);
    let corrected = policy.correct(candidate.reported_travel_time_minutes, baseline);

    ValidatedTrip::new(candidate, corrected, distance)
}
