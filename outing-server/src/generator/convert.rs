//! Validation of generator payloads into candidate trips.
//!
//! The payload is untrusted. A response that is not a JSON object with a
//! `trips` array is rejected outright; within it, each record is checked
//! independently and either becomes a [`CandidateTrip`] or yields the list
//! of fields that were missing or unusable.

use std::fmt;

use serde_json::Value;

use crate::domain::{CandidateTrip, Coordinates};

use super::types::{RawTrip, TripsPayload};

/// Longest travel or stay time accepted from the generator (one week).
const MAX_REPORTED_MINUTES: f64 = 7.0 * 24.0 * 60.0;

/// The response as a whole could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// Not valid JSON, or not shaped like `{"trips": [...]}`
    #[error("malformed generator payload: {0}")]
    Malformed(String),
}

/// A single problem with one field of a trip record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefect {
    pub field: &'static str,
    pub problem: &'static str,
}

impl FieldDefect {
    fn new(field: &'static str, problem: &'static str) -> Self {
        Self { field, problem }
    }
}

impl fmt::Display for FieldDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Outcome of validating one trip record.
pub type CandidateResult = Result<CandidateTrip, Vec<FieldDefect>>;

/// Parse a raw generator payload into per-record validation results.
///
/// Record order is preserved.
pub fn parse_payload(raw: &str) -> Result<Vec<CandidateResult>, PayloadError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| PayloadError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(PayloadError::Malformed("expected a JSON object".to_string()));
    }
    let payload: TripsPayload =
        serde_json::from_value(value).map_err(|e| PayloadError::Malformed(e.to_string()))?;

    Ok(payload
        .trips
        .unwrap_or_default()
        .into_iter()
        .map(validate_record)
        .collect())
}

/// Validate a single record.
pub fn validate_record(record: Value) -> CandidateResult {
    if !record.is_object() {
        return Err(vec![FieldDefect::new("record", "not an object")]);
    }
    let raw: RawTrip = match serde_json::from_value(record) {
        Ok(raw) => raw,
        Err(_) => return Err(vec![FieldDefect::new("record", "not a trip record")]),
    };
    convert_raw_trip(raw)
}

/// Convert a raw record, collecting every defect rather than stopping at the first.
fn convert_raw_trip(raw: RawTrip) -> CandidateResult {
    let mut defects = Vec::new();

    let id = required(&mut defects, "id", id_field(raw.id.as_ref()));
    let name = required(&mut defects, "name", non_empty_string(raw.name.as_ref()));
    let travel = required(
        &mut defects,
        "travelTimeMinutes",
        non_negative(raw.travel_time_minutes.as_ref()),
    );
    let stay = required(
        &mut defects,
        "stayTimeMinutes",
        non_negative(raw.stay_time_minutes.as_ref()),
    );
    let destination = coordinates(&mut defects, raw.coordinates.as_ref());

    let score = match raw.score.as_ref() {
        None | Some(Value::Null) => Some(0.0),
        Some(v) => match v.as_f64() {
            Some(s) if (0.0..=100.0).contains(&s) => Some(s),
            Some(_) => {
                defects.push(FieldDefect::new("score", "outside 0-100"));
                None
            }
            None => {
                defects.push(FieldDefect::new("score", "not a number"));
                None
            }
        },
    };

    let itinerary = match raw.itinerary.as_ref() {
        None | Some(Value::Null) => Some(Vec::new()),
        Some(Value::Array(steps)) => {
            let steps: Option<Vec<String>> = steps
                .iter()
                .map(|s| s.as_str().map(str::to_string))
                .collect();
            if steps.is_none() {
                defects.push(FieldDefect::new("itinerary", "steps must be strings"));
            }
            steps
        }
        Some(_) => {
            defects.push(FieldDefect::new("itinerary", "not a list"));
            None
        }
    };

    match (id, name, travel, stay, destination, score, itinerary) {
        (
            Some(id),
            Some(name),
            Some(travel),
            Some(stay),
            Some(destination),
            Some(score),
            Some(itinerary),
        ) => Ok(CandidateTrip {
            id,
            name,
            category: optional_string(raw.category.as_ref()),
            description: optional_string(raw.description.as_ref()),
            reason: optional_string(raw.reason.as_ref()),
            reported_travel_time_minutes: travel,
            stay_time_minutes: stay,
            score,
            itinerary,
            destination,
        }),
        _ => Err(defects),
    }
}

fn required<T>(
    defects: &mut Vec<FieldDefect>,
    field: &'static str,
    value: Result<T, &'static str>,
) -> Option<T> {
    value.map_err(|problem| defects.push(FieldDefect::new(field, problem))).ok()
}

/// Ids are usually strings but numeric ids are accepted.
fn id_field(value: Option<&Value>) -> Result<String, &'static str> {
    match value {
        None | Some(Value::Null) => Err("missing"),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err("empty"),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err("not a string"),
    }
}

fn non_empty_string(value: Option<&Value>) -> Result<String, &'static str> {
    match value {
        None | Some(Value::Null) => Err("missing"),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err("empty"),
        Some(_) => Err("not a string"),
    }
}

fn finite_number(value: Option<&Value>) -> Result<f64, &'static str> {
    match value {
        None | Some(Value::Null) => Err("missing"),
        Some(v) => v.as_f64().filter(|n| n.is_finite()).ok_or("not a number"),
    }
}

fn non_negative(value: Option<&Value>) -> Result<f64, &'static str> {
    let n = finite_number(value)?;
    if n < 0.0 {
        return Err("negative");
    }
    if n > MAX_REPORTED_MINUTES {
        return Err("too large");
    }
    Ok(n)
}

fn optional_string(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn coordinates(defects: &mut Vec<FieldDefect>, value: Option<&Value>) -> Option<Coordinates> {
    let obj = match value {
        None | Some(Value::Null) => {
            defects.push(FieldDefect::new("coordinates", "missing"));
            return None;
        }
        Some(Value::Object(obj)) => obj,
        Some(_) => {
            defects.push(FieldDefect::new("coordinates", "not an object"));
            return None;
        }
    };

    let lat = required(defects, "coordinates.lat", finite_number(obj.get("lat")));
    let lng = required(defects, "coordinates.lng", finite_number(obj.get("lng")));
    let lat = lat.filter(|lat| {
        let ok = (-90.0..=90.0).contains(lat);
        if !ok {
            defects.push(FieldDefect::new("coordinates.lat", "out of range"));
        }
        ok
    });
    let lng = lng.filter(|lng| {
        let ok = (-180.0..=180.0).contains(lng);
        if !ok {
            defects.push(FieldDefect::new("coordinates.lng", "out of range"));
        }
        ok
    });

    Some(Coordinates::new(lat?, lng?))
}
