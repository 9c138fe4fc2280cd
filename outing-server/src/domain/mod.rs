//! Domain types for outing recommendations.
//!
//! Request types (`Location`, `Preferences`) validate themselves before any
//! work is done. Trip types separate the generator's untrusted claims
//! (`CandidateTrip`) from the corrected values handed back to callers
//! (`ValidatedTrip`).

mod error;
mod location;
mod preferences;
mod request;
mod trip;

pub use error::DomainError;
pub use location::{Coordinates, Location};
pub use preferences::{Mood, PopularityBias, Preferences, TravelMode};
pub use request::RecommendRequest;
pub use trip::{CandidateTrip, ValidatedTrip};

#[cfg(test)]
pub(crate) use trip::fixtures;
