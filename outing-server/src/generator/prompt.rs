//! Prompt construction for language-model generators.

use std::fmt::Write;

use serde_json::{Value, json};

use crate::domain::{Location, Mood, PopularityBias, RecommendRequest};
use crate::physics::ModeProfile;

/// Default number of trips asked for per request.
pub const DEFAULT_TRIP_COUNT: usize = 6;

/// Label the geolocation layer uses when reverse geocoding found nothing.
const GENERIC_LABEL: &str = "Current Location";

/// How the origin is described to the generator.
pub fn describe_location(location: &Location) -> String {
    match (&location.label, location.has_known_coordinates()) {
        (Some(label), false) => label.clone(),
        (Some(label), true) => format!(
            "{label} (Lat: {}, Lng: {})",
            location.latitude, location.longitude
        ),
        (None, _) => format!("Lat: {}, Lng: {}", location.latitude, location.longitude),
    }
}

/// Whether the request asks for well-known food spots.
fn wants_popular_food(request: &RecommendRequest) -> bool {
    request.preferences.effective_popularity() == Some(PopularityBias::Popular)
}

/// Neighbourhood community to mine for tips, e.g. `r/Koramangala`.
fn community_reference(location: &Location) -> String {
    match location.label.as_deref() {
        Some(label) if label != GENERIC_LABEL => {
            let compact: String = label.split_whitespace().collect();
            format!("r/{compact}")
        }
        _ => "local city subreddits".to_string(),
    }
}

/// System instruction matching the request's strategy.
pub fn system_instruction(request: &RecommendRequest) -> &'static str {
    if wants_popular_food(request) {
        "You are a local foodie guide who knows all the most popular, must-visit, \
         and top-rated restaurants."
    } else {
        "You are the ultimate local insider. You ignore generic top-10 lists and \
         instead draw on local forums, old blogs and neighbourhood word of mouth to \
         find the best underrated spots. You care about quality and authenticity \
         and avoid tourist traps."
    }
}

/// Build the user prompt for a request.
pub fn build_prompt(request: &RecommendRequest, trip_count: usize) -> String {
    let location = &request.location;
    let prefs = &request.preferences;
    let origin = describe_location(location);
    let radius = ModeProfile::for_mode(prefs.travel_mode).search_radius_km;

    let mut prompt = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(prompt, "User context:");
    let _ = writeln!(prompt, "- Start location: {origin}");
    let _ = writeln!(
        prompt,
        "- Available time: {} hours ({} minutes)",
        prefs.time_budget_hours,
        prefs.time_budget_minutes()
    );
    let _ = writeln!(prompt, "- Mood: {}", prefs.mood);
    if prefs.mood == Mood::Foodie {
        let style = if wants_popular_food(request) {
            "Popular / famous / viral"
        } else {
            "Hidden gems / hole-in-the-wall"
        };
        let _ = writeln!(prompt, "- Dining style: {style}");
    }
    let _ = writeln!(prompt, "- Travel method: {}", prefs.travel_mode);
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "TASK:");
    let _ = writeln!(
        prompt,
        "Generate {trip_count} distinct micro-trip recommendations."
    );
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "RULES:");
    let _ = writeln!(
        prompt,
        "1. Searchable names: format every name as \"[Place Name], [Neighbourhood], [City]\"."
    );
    let _ = writeln!(
        prompt,
        "2. Geographic lock: every place MUST be within {radius}km of {origin}."
    );
    let _ = writeln!(
        prompt,
        "3. Real places only: permanent businesses or landmarks that exist today."
    );
    let _ = writeln!(
        prompt,
        "4. Coordinates: give the destination latitude and longitude as a cross-check."
    );
    let _ = writeln!(prompt);

    if wants_popular_food(request) {
        let _ = writeln!(prompt, "STRATEGY: popular and iconic food spots.");
        let _ = writeln!(
            prompt,
            "Suggest well-reviewed institutions, iconic local dishes and viral food spots."
        );
        let _ = writeln!(prompt, "Mix: 4 popular or iconic, 2 local favourites.");
    } else {
        let _ = writeln!(prompt, "STRATEGY: the best underrated places.");
        let _ = writeln!(
            prompt,
            "Draw on local blogs, {} hidden-gem threads and curated guides.",
            community_reference(location)
        );
        let _ = writeln!(
            prompt,
            "Prefer places with a very high rating but few reviews. Never suggest a place \
             that is unknown only because it is average."
        );
        let _ = writeln!(
            prompt,
            "Mix: 3 hidden gems, 2 popular staples, 1 wildcard that fits the {} mood.",
            prefs.mood
        );
    }
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "Estimate one-way travel time realistically for the travel method.");
    let _ = write!(
        prompt,
        "Return strictly JSON matching the schema. Use specific, searchable names."
    );

    prompt
}

/// JSON schema the generator's response must follow.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "trips": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "name": {
                            "type": "STRING",
                            "description": "Specific, searchable name of the place"
                        },
                        "type": { "type": "STRING", "description": "Category" },
                        "description": { "type": "STRING" },
                        "travelTimeMinutes": {
                            "type": "NUMBER",
                            "description": "Realistic one-way travel time in minutes"
                        },
                        "stayTimeMinutes": { "type": "NUMBER" },
                        "totalTimeMinutes": { "type": "NUMBER" },
                        "score": {
                            "type": "NUMBER",
                            "description": "Relevance score from 1-100"
                        },
                        "itinerary": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "reason": { "type": "STRING" },
                        "coordinates": {
                            "type": "OBJECT",
                            "properties": {
                                "lat": { "type": "NUMBER" },
                                "lng": { "type": "NUMBER" }
                            },
                            "required": ["lat", "lng"]
                        }
                    },
                    "required": [
                        "id", "name", "type", "description", "travelTimeMinutes",
                        "stayTimeMinutes", "totalTimeMinutes", "score", "itinerary",
                        "reason", "coordinates"
                    ]
                }
            }
        },
        "required": ["trips"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Preferences, TravelMode};

    fn request(location: Location, prefs: Preferences) -> RecommendRequest {
        RecommendRequest::new(location, prefs)
    }

    #[test]
    fn describes_each_kind_of_location() {
        assert_eq!(describe_location(&Location::from_label("Paris")), "Paris");
        assert_eq!(
            describe_location(&Location::new(12.5, 77.25, Some("Koramangala".into()))),
            "Koramangala (Lat: 12.5, Lng: 77.25)"
        );
        assert_eq!(
            describe_location(&Location::new(12.5, 77.25, None)),
            "Lat: 12.5, Lng: 77.25"
        );
    }

    #[test]
    fn prompt_states_radius_and_count() {
        let req = request(
            Location::new(12.9716, 77.5946, Some("Koramangala".into())),
            Preferences::new(2.5, Mood::Chilled, TravelMode::Walk),
        );
        let prompt = build_prompt(&req, 6);

        assert!(prompt.contains("Generate 6 distinct"));
        assert!(prompt.contains("within 3km of Koramangala"));
        assert!(prompt.contains("2.5 hours (150 minutes)"));
        assert!(prompt.contains("r/Koramangala"));
        assert!(!prompt.contains("Dining style"));
    }

    #[test]
    fn popular_foodie_strategy() {
        let req = request(
            Location::from_label("New York"),
            Preferences::new(2.0, Mood::Foodie, TravelMode::Transit)
                .with_popularity(PopularityBias::Popular),
        );
        let prompt = build_prompt(&req, 4);

        assert!(prompt.contains("Dining style: Popular"));
        assert!(prompt.contains("popular and iconic"));
        assert!(prompt.contains("within 15km"));
        assert!(system_instruction(&req).contains("foodie guide"));
    }

    #[test]
    fn hidden_foodie_strategy() {
        let req = request(
            Location::from_label("New York"),
            Preferences::new(2.0, Mood::Foodie, TravelMode::Bike),
        );
        let prompt = build_prompt(&req, 6);

        assert!(prompt.contains("Dining style: Hidden gems"));
        assert!(prompt.contains("r/NewYork"));
        assert!(system_instruction(&req).contains("local insider"));
    }

    #[test]
    fn generic_label_is_not_a_community() {
        let loc = Location::new(1.0, 2.0, Some("Current Location".into()));
        assert_eq!(community_reference(&loc), "local city subreddits");
        assert_eq!(
            community_reference(&Location::new(1.0, 2.0, None)),
            "local city subreddits"
        );
    }

    #[test]
    fn schema_requires_coordinates() {
        let schema = response_schema();
        let required = &schema["properties"]["trips"]["items"]["required"];
        assert!(required.as_array().unwrap().contains(&json!("coordinates")));
    }
}
