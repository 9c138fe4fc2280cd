//! Physical sanity model for travel-time claims.
//!
//! The generator has no road or traffic data, so its travel times are
//! checked against a straight-line distance and a per-mode speed model.

mod distance;
mod estimate;

pub use distance::{EARTH_RADIUS_KM, distance_km};
pub use estimate::{ModeProfile, baseline_minutes};
