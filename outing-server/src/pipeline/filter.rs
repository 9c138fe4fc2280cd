//! Rejecting candidates that break the user's constraints.

use crate::domain::{Preferences, ValidatedTrip};
use crate::physics::ModeProfile;

use super::config::FilterPolicy;

impl FilterPolicy {
    /// Longest acceptable corrected one-way travel time, in minutes.
    pub fn max_allowed_travel_mins(&self, prefs: &Preferences) -> u32 {
        let one_way = (prefs.time_budget_minutes() * self.travel_budget_fraction).floor();
        // The cast saturates for huge budgets, so the sum must too.
        (one_way.max(0.0) as u32).saturating_add(self.grace_mins)
    }

    /// Whether a corrected trip fits the user's constraints.
    ///
    /// Without known origin coordinates there is nothing to measure
    /// against, so every trip is accepted. Otherwise the travel-time and
    /// distance limits are independent hard cutoffs.
    pub fn accept(
        &self,
        trip: &ValidatedTrip,
        prefs: &Preferences,
        has_known_origin: bool,
    ) -> bool {
        if !has_known_origin {
            return true;
        }

        let max_distance_km = ModeProfile::for_mode(prefs.travel_mode).max_distance_km;

        trip.corrected_travel_time_minutes <= self.max_allowed_travel_mins(prefs)
            && trip.distance_km <= max_distance_km
    }
}
