//! Per-mode travel-time baseline.

use crate::domain::TravelMode;

/// Tuned constants for one travel mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeProfile {
    /// Average door-to-door speed in km/h.
    pub speed_kmh: f64,

    /// Ratio of road distance to straight-line distance.
    pub route_factor: f64,

    /// Fixed time for parking, waiting, or unlocking, in minutes.
    pub overhead_mins: f64,

    /// Candidates further than this from the origin are rejected.
    pub max_distance_km: f64,

    /// Search radius stated to the generator.
    pub search_radius_km: f64,
}

impl ModeProfile {
    const WALK: ModeProfile = ModeProfile {
        speed_kmh: 4.5,
        route_factor: 1.20,
        overhead_mins: 0.0,
        max_distance_km: 8.0,
        search_radius_km: 3.0,
    };

    const BIKE: ModeProfile = ModeProfile {
        speed_kmh: 28.0,
        route_factor: 1.25,
        overhead_mins: 2.0,
        max_distance_km: 8.0,
        search_radius_km: 8.0,
    };

    const TRANSIT: ModeProfile = ModeProfile {
        speed_kmh: 18.0,
        route_factor: 1.50,
        overhead_mins: 12.0,
        max_distance_km: 8.0,
        search_radius_km: 15.0,
    };

    const CAR: ModeProfile = ModeProfile {
        speed_kmh: 22.0,
        route_factor: 1.40,
        overhead_mins: 8.0,
        max_distance_km: 15.0,
        search_radius_km: 15.0,
    };

    /// The profile for a travel mode.
    pub const fn for_mode(mode: TravelMode) -> &'static ModeProfile {
        match mode {
            TravelMode::Walk => &Self::WALK,
            TravelMode::Bike => &Self::BIKE,
            TravelMode::Transit => &Self::TRANSIT,
            TravelMode::Car => &Self::CAR,
        }
    }

    /// Unrounded one-way minutes to cover `distance_km` in this mode.
    pub fn travel_minutes(&self, distance_km: f64) -> f64 {
        (distance_km * self.route_factor / self.speed_kmh) * 60.0 + self.overhead_mins
    }
}

/// Physics-model one-way travel time, rounded to the nearest minute.
///
/// # Examples
///
/// ```
/// use outing_server::domain::TravelMode;
/// use outing_server::physics::baseline_minutes;
///
/// // 5 km on foot: 5 * 1.2 / 4.5 hours.
/// assert_eq!(baseline_minutes(5.0, TravelMode::Walk), 80.0);
/// ```
pub fn baseline_minutes(distance_km: f64, mode: TravelMode) -> f64 {
    ModeProfile::for_mode(mode).travel_minutes(distance_km).round()
}
