//! What kind of outing the user wants.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// The category of outing requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Foodie,
    Nature,
    Culture,
    Active,
    Chilled,
    Quirky,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Foodie => "Foodie",
            Mood::Nature => "Nature",
            Mood::Culture => "Culture",
            Mood::Active => "Active",
            Mood::Chilled => "Chilled",
            Mood::Quirky => "Quirky",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the user will get to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelMode {
    Car,
    Bike,
    Walk,
    #[serde(alias = "Public Transport")]
    Transit,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Car,
        TravelMode::Bike,
        TravelMode::Walk,
        TravelMode::Transit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Car => "Car",
            TravelMode::Bike => "Bike",
            TravelMode::Walk => "Walk",
            TravelMode::Transit => "Transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a Foodie wants well-known places or hidden gems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopularityBias {
    Popular,
    Hidden,
}

impl PopularityBias {
    pub fn as_str(&self) -> &'static str {
        match self {
            PopularityBias::Popular => "popular",
            PopularityBias::Hidden => "hidden",
        }
    }
}

impl fmt::Display for PopularityBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User preferences for a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Total time available for the outing, in hours.
    #[serde(alias = "timeAvailable")]
    pub time_budget_hours: f64,

    pub mood: Mood,

    #[serde(alias = "travelMethod")]
    pub travel_mode: TravelMode,

    /// Only meaningful for [`Mood::Foodie`].
    #[serde(default, alias = "popularity", skip_serializing_if = "Option::is_none")]
    pub popularity_bias: Option<PopularityBias>,
}

impl Preferences {
    pub fn new(time_budget_hours: f64, mood: Mood, travel_mode: TravelMode) -> Self {
        Self {
            time_budget_hours,
            mood,
            travel_mode,
            popularity_bias: None,
        }
    }

    pub fn with_popularity(mut self, bias: PopularityBias) -> Self {
        self.popularity_bias = Some(bias);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.time_budget_hours.is_finite() || self.time_budget_hours <= 0.0 {
            return Err(DomainError::InvalidTimeBudget);
        }
        Ok(())
    }

    /// The popularity bias that actually applies to this request.
    ///
    /// Foodie requests default to hidden gems when no bias was given; every
    /// other mood ignores the bias entirely.
    pub fn effective_popularity(&self) -> Option<PopularityBias> {
        match self.mood {
            Mood::Foodie => Some(self.popularity_bias.unwrap_or(PopularityBias::Hidden)),
            _ => None,
        }
    }

    /// The time budget in minutes.
    pub fn time_budget_minutes(&self) -> f64 {
        self.time_budget_hours * 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_time_budget() {
        assert!(Preferences::new(2.5, Mood::Chilled, TravelMode::Car).validate().is_ok());
        assert_eq!(
            Preferences::new(0.0, Mood::Chilled, TravelMode::Car).validate(),
            Err(DomainError::InvalidTimeBudget)
        );
        assert!(Preferences::new(-1.0, Mood::Chilled, TravelMode::Car).validate().is_err());
        assert!(Preferences::new(f64::INFINITY, Mood::Chilled, TravelMode::Car)
            .validate()
            .is_err());
    }

    #[test]
    fn popularity_only_applies_to_foodie() {
        let prefs = Preferences::new(2.0, Mood::Nature, TravelMode::Walk)
            .with_popularity(PopularityBias::Popular);
        assert_eq!(prefs.effective_popularity(), None);

        let foodie = Preferences::new(2.0, Mood::Foodie, TravelMode::Walk);
        assert_eq!(foodie.effective_popularity(), Some(PopularityBias::Hidden));

        let popular = foodie.with_popularity(PopularityBias::Popular);
        assert_eq!(popular.effective_popularity(), Some(PopularityBias::Popular));
    }

    #[test]
    fn deserializes_wire_names() {
        let prefs: Preferences = serde_json::from_str(
            r#"{"timeAvailable": 2.5, "mood": "Foodie", "travelMethod": "Public Transport", "popularity": "popular"}"#,
        )
        .unwrap();
        assert_eq!(prefs.time_budget_hours, 2.5);
        assert_eq!(prefs.travel_mode, TravelMode::Transit);
        assert_eq!(prefs.popularity_bias, Some(PopularityBias::Popular));

        let prefs: Preferences = serde_json::from_str(
            r#"{"timeBudgetHours": 1.0, "mood": "Quirky", "travelMode": "Bike"}"#,
        )
        .unwrap();
        assert_eq!(prefs.travel_mode, TravelMode::Bike);
        assert_eq!(prefs.popularity_bias, None);
    }

    #[test]
    fn display_names() {
        assert_eq!(TravelMode::Transit.to_string(), "Transit");
        assert_eq!(Mood::Chilled.to_string(), "Chilled");
        assert_eq!(PopularityBias::Hidden.to_string(), "hidden");
    }
}
