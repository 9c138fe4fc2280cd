//! A complete recommendation request.

use serde::{Deserialize, Serialize};

use super::{DomainError, Location, Preferences};

/// Everything the pipeline needs to produce recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub location: Location,
    pub preferences: Preferences,
}

impl RecommendRequest {
    pub fn new(location: Location, preferences: Preferences) -> Self {
        Self {
            location,
            preferences,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.location.validate()?;
        self.preferences.validate()
    }
}
