//! Request orchestration: cache, generate, correct, filter.
//!
//! Each request runs
//! `fingerprint → cache lookup → (hit: done) | (miss: generate → correct → filter → store)`.
//! Generation is the only fallible and slow step. Its failures are returned
//! to the caller and never cached, so a retry starts afresh.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::{Fingerprint, TripCache, TripList};
use crate::domain::{CandidateTrip, DomainError, RecommendRequest, ValidatedTrip};
use crate::generator::{PayloadError, TripGenerator, parse_payload};

use super::config::PipelineConfig;
use super::correct::correct_candidate;

/// Error from the recommendation pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    /// The request itself is invalid
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    /// The generator errored or timed out
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// The generator's response could not be parsed at the top level
    #[error("malformed generator response: {0}")]
    MalformedResponse(String),
}

impl PipelineError {
    /// Whether sending the same request again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            PipelineError::InvalidRequest(_) => false,
            PipelineError::GenerationFailed(_) | PipelineError::MalformedResponse(_) => true,
        }
    }
}

impl From<PayloadError> for PipelineError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Malformed(message) => PipelineError::MalformedResponse(message),
        }
    }
}

/// Result of a recommendation request.
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// Accepted trips, in the order the generator produced them.
    pub trips: TripList,

    /// Whether the result was served from the cache.
    pub cache_hit: bool,

    /// Cache key the request mapped to.
    pub fingerprint: Fingerprint,
}

/// The recommendation pipeline.
///
/// Owns its generator, cache and policies; cheap to share behind an `Arc`.
pub struct Pipeline {
    generator: Arc<dyn TripGenerator>,
    cache: TripCache,
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline.
    pub fn new(
        generator: Arc<dyn TripGenerator>,
        cache: TripCache,
        config: PipelineConfig,
    ) -> Self {
        Self {
            generator,
            cache,
            config,
        }
    }

    pub fn cache(&self) -> &TripCache {
        &self.cache
    }

    /// Produce validated recommendations for a request.
    ///
    /// Concurrent calls with the same fingerprint share a single generation.
    pub async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<Recommendation, PipelineError> {
        request.validate()?;

        let fingerprint = Fingerprint::new(request);

        let (trips, cache_hit) = self
            .cache
            .get_or_try_insert_with(fingerprint.clone(), self.generate_validated(request))
            .await
            .map_err(Arc::unwrap_or_clone)?;

        if cache_hit {
            debug!(%fingerprint, trips = trips.len(), "serving recommendations from cache");
        }

        Ok(Recommendation {
            trips,
            cache_hit,
            fingerprint,
        })
    }

    /// Cache-miss path: call the generator and validate what comes back.
    async fn generate_validated(
        &self,
        request: &RecommendRequest,
    ) -> Result<TripList, PipelineError> {
        let timeout = self.config.generation_timeout();

        let raw = match tokio::time::timeout(timeout, self.generator.generate(request)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                warn!(error = %e, "trip generation failed");
                return Err(PipelineError::GenerationFailed(e.to_string()));
            }
            Err(_) => {
                warn!(timeout_secs = timeout.as_secs(), "trip generation timed out");
                return Err(PipelineError::GenerationFailed(format!(
                    "timed out after {}s",
                    timeout.as_secs()
                )));
            }
        };

        let records = parse_payload(&raw).map_err(|e| {
            warn!(error = %e, "generator response could not be parsed");
            PipelineError::from(e)
        })?;

        let received = records.len();
        let candidates: Vec<CandidateTrip> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match record {
                Ok(candidate) => Some(candidate),
                Err(defects) => {
                    let defects: Vec<String> = defects.iter().map(ToString::to_string).collect();
                    warn!(index, defects = %defects.join(", "), "dropping malformed candidate");
                    None
                }
            })
            .collect();

        let trips = self.validate_candidates(candidates, request);

        info!(received, kept = trips.len(), "generated recommendations");

        Ok(Arc::new(trips))
    }

    /// Correct every candidate's travel time, then drop those that break
    /// the request's distance or time limits. Order is preserved.
    pub fn validate_candidates(
        &self,
        candidates: Vec<CandidateTrip>,
        request: &RecommendRequest,
    ) -> Vec<ValidatedTrip> {
        let origin = &request.location;
        let prefs = &request.preferences;
        let has_known_origin = origin.has_known_coordinates();

        let corrected: Vec<ValidatedTrip> = candidates
            .into_iter()
            .map(|c| correct_candidate(c, origin, prefs.travel_mode, &self.config.correction))
            .collect();

        corrected
            .into_iter()
            .filter(|trip| {
                let accepted = self.config.filter.accept(trip, prefs, has_known_origin);
                if !accepted {
                    debug!(
                        id = trip.id(),
                        distance_km = trip.distance_km,
                        travel_mins = trip.corrected_travel_time_minutes,
                        "rejecting candidate outside limits"
                    );
                }
                accepted
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::fixtures::candidate;
    use crate::domain::{Coordinates, Location, Mood, Preferences, TravelMode};
    use crate::generator::{FixtureGenerator, GeneratorError};
    use crate::physics::EARTH_RADIUS_KM;

    fn koramangala() -> Location {
        Location::new(12.9716, 77.5946, Some("Koramangala".into()))
    }

    fn north_of(origin: &Location, km: f64) -> Coordinates {
        let dlat = (km / EARTH_RADIUS_KM).to_degrees();
        Coordinates::new(origin.latitude + dlat, origin.longitude)
    }

    fn record(id: &str, at: Coordinates, travel: f64, stay: f64) -> Value {
        json!({
            "id": id,
            "name": format!("{id}, Koramangala, Bangalore"),
            "type": "Cafe",
            "description": "Somewhere to sit.",
            "travelTimeMinutes": travel,
            "stayTimeMinutes": stay,
            "totalTimeMinutes": travel * 2.0 + stay,
            "score": 75,
            "itinerary": ["Arrive", "Leave"],
            "reason": "Quiet",
            "coordinates": { "lat": at.lat, "lng": at.lng }
        })
    }

    fn payload(records: Vec<Value>) -> String {
        json!({ "trips": records }).to_string()
    }

    /// Two good candidates (one too far for a car) and one without coordinates.
    fn car_payload() -> String {
        let origin = koramangala();
        let mut broken = record("broken", north_of(&origin, 1.0), 10.0, 30.0);
        if let Some(obj) = broken.as_object_mut() {
            obj.remove("coordinates");
        }
        payload(vec![
            record("near", north_of(&origin, 2.0), 20.0, 60.0),
            record("far", north_of(&origin, 20.0), 15.0, 60.0),
            broken,
        ])
    }

    fn car_request() -> RecommendRequest {
        RecommendRequest::new(
            koramangala(),
            Preferences::new(2.5, Mood::Chilled, TravelMode::Car),
        )
    }

    fn pipeline(generator: Arc<dyn TripGenerator>) -> Pipeline {
        Pipeline::new(generator, TripCache::default(), PipelineConfig::default())
    }

    /// Fails on its first call, then serves the payload.
    struct FlakyGenerator {
        inner: FixtureGenerator,
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl TripGenerator for FlakyGenerator {
        async fn generate(&self, request: &RecommendRequest) -> Result<String, GeneratorError> {
            if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(GeneratorError::RateLimited);
            }
            self.inner.generate(request).await
        }
    }

    /// Sleeps before serving the payload.
    struct SlowGenerator {
        inner: FixtureGenerator,
        delay: Duration,
    }

    #[async_trait]
    impl TripGenerator for SlowGenerator {
        async fn generate(&self, request: &RecommendRequest) -> Result<String, GeneratorError> {
            tokio::time::sleep(self.delay).await;
            self.inner.generate(request).await
        }
    }

    #[tokio::test]
    async fn filters_far_and_drops_malformed() {
        let pipeline = pipeline(Arc::new(FixtureGenerator::new(car_payload())));

        let rec = pipeline.recommend(&car_request()).await.unwrap();

        assert!(!rec.cache_hit);
        assert_eq!(rec.trips.len(), 1);
        let trip = &rec.trips[0];
        assert_eq!(trip.id(), "near");
        assert_eq!(trip.corrected_travel_time_minutes, 20);
        assert_eq!(trip.total_time_minutes, 100);
        assert!((trip.distance_km - 2.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn second_identical_request_is_served_from_cache() {
        let generator = FixtureGenerator::new(car_payload());
        let pipeline = pipeline(Arc::new(generator.clone()));

        let first = pipeline.recommend(&car_request()).await.unwrap();
        let second = pipeline.recommend(&car_request()).await.unwrap();

        assert!(!first.cache_hit);
        assert!(second.cache_hit);
        assert_eq!(first.trips, second.trips);
        assert_eq!(first.fingerprint, second.fingerprint);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn gps_jitter_shares_the_cache_entry() {
        let generator = FixtureGenerator::new(car_payload());
        let pipeline = pipeline(Arc::new(generator.clone()));

        let mut jittered = car_request();
        jittered.location.latitude += 0.000_01;

        pipeline.recommend(&car_request()).await.unwrap();
        let rec = pipeline.recommend(&jittered).await.unwrap();

        assert!(rec.cache_hit);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn different_mode_is_a_different_entry() {
        let generator = FixtureGenerator::new(car_payload());
        let pipeline = pipeline(Arc::new(generator.clone()));

        let mut by_bike = car_request();
        by_bike.preferences.travel_mode = TravelMode::Bike;

        pipeline.recommend(&car_request()).await.unwrap();
        let rec = pipeline.recommend(&by_bike).await.unwrap();

        assert!(!rec.cache_hit);
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn walking_time_is_corrected_to_baseline() {
        let origin = koramangala();
        let raw = payload(vec![record("walk", north_of(&origin, 5.0), 3.0, 45.0)]);
        let pipeline = pipeline(Arc::new(FixtureGenerator::new(raw)));
        let request =
            RecommendRequest::new(origin, Preferences::new(6.0, Mood::Chilled, TravelMode::Walk));

        let rec = pipeline.recommend(&request).await.unwrap();

        assert_eq!(rec.trips.len(), 1);
        assert_eq!(rec.trips[0].corrected_travel_time_minutes, 80);
        assert_eq!(rec.trips[0].total_time_minutes, 205);
        assert_eq!(rec.trips[0].candidate.reported_travel_time_minutes, 3.0);
    }

    #[tokio::test]
    async fn unknown_origin_accepts_everything_well_formed() {
        let far_away = Coordinates::new(48.8566, 2.3522);
        let mut broken = record("broken", far_away, 10.0, 30.0);
        if let Some(obj) = broken.as_object_mut() {
            obj.remove("id");
        }
        let raw = payload(vec![
            record("louvre", far_away, 25.0, 120.0),
            broken,
            record("marais", Coordinates::new(10.0, 10.0), 7.0, 60.0),
        ]);
        let pipeline = pipeline(Arc::new(FixtureGenerator::new(raw)));
        let request = RecommendRequest::new(
            Location::from_label("Paris"),
            Preferences::new(1.0, Mood::Culture, TravelMode::Walk),
        );

        let rec = pipeline.recommend(&request).await.unwrap();

        let ids: Vec<&str> = rec.trips.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["louvre", "marais"]);
        assert_eq!(rec.trips[0].corrected_travel_time_minutes, 25);
        assert_eq!(rec.trips[0].total_time_minutes, 170);
        assert!(rec.trips.iter().all(|t| t.distance_km == 0.0));
    }

    #[tokio::test]
    async fn huge_time_budget_keeps_nearby_trips() {
        let origin = koramangala();
        let raw = payload(vec![record("close", north_of(&origin, 1.0), 10.0, 30.0)]);
        let pipeline = pipeline(Arc::new(FixtureGenerator::new(raw)));
        let request =
            RecommendRequest::new(origin, Preferences::new(1e9, Mood::Chilled, TravelMode::Car));

        let rec = pipeline.recommend(&request).await.unwrap();

        let ids: Vec<&str> = rec.trips.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["close"]);
    }

    #[tokio::test]
    async fn absurd_stay_time_drops_the_candidate() {
        let origin = koramangala();
        let raw = payload(vec![
            record("endless", north_of(&origin, 1.0), 10.0, 1e12),
            record("normal", north_of(&origin, 1.5), 10.0, 60.0),
        ]);
        let pipeline = pipeline(Arc::new(FixtureGenerator::new(raw)));

        let rec = pipeline.recommend(&car_request()).await.unwrap();

        let ids: Vec<&str> = rec.trips.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["normal"]);
    }

    #[tokio::test]
    async fn missing_trips_key_is_an_empty_result() {
        let pipeline = pipeline(Arc::new(FixtureGenerator::new("{}")));

        let rec = pipeline.recommend(&car_request()).await.unwrap();

        assert!(rec.trips.is_empty());
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_generator() {
        let generator = FixtureGenerator::new(car_payload());
        let pipeline = pipeline(Arc::new(generator.clone()));

        let mut request = car_request();
        request.preferences.time_budget_hours = 0.0;

        let err = pipeline.recommend(&request).await.unwrap_err();

        assert!(matches!(err, PipelineError::InvalidRequest(_)));
        assert!(!err.is_retryable());
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_response_is_not_cached() {
        let generator = FixtureGenerator::new("Sorry, I can't help with that.");
        let pipeline = pipeline(Arc::new(generator.clone()));

        let first = pipeline.recommend(&car_request()).await.unwrap_err();
        let second = pipeline.recommend(&car_request()).await.unwrap_err();

        assert!(matches!(first, PipelineError::MalformedResponse(_)));
        assert!(first.is_retryable());
        assert!(matches!(second, PipelineError::MalformedResponse(_)));
        assert_eq!(generator.call_count(), 2);
    }

    #[tokio::test]
    async fn failure_is_not_cached_and_retry_succeeds() {
        let pipeline = pipeline(Arc::new(FlakyGenerator {
            inner: FixtureGenerator::new(car_payload()),
            attempts: AtomicUsize::new(0),
        }));

        let err = pipeline.recommend(&car_request()).await.unwrap_err();
        assert!(matches!(err, PipelineError::GenerationFailed(_)));
        assert!(err.is_retryable());

        pipeline.cache().sync().await;
        assert_eq!(pipeline.cache().entry_count(), 0);

        let rec = pipeline.recommend(&car_request()).await.unwrap();
        assert!(!rec.cache_hit);
        assert_eq!(rec.trips.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_generator_times_out() {
        let generator = FixtureGenerator::new(car_payload());
        let pipeline = Pipeline::new(
            Arc::new(SlowGenerator {
                inner: generator.clone(),
                delay: Duration::from_secs(3600),
            }),
            TripCache::default(),
            PipelineConfig::default().with_generation_timeout(1),
        );

        let err = pipeline.recommend(&car_request()).await.unwrap_err();

        match err {
            PipelineError::GenerationFailed(message) => assert!(message.contains("timed out")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_identical_requests_generate_once() {
        let generator = FixtureGenerator::new(car_payload());
        let pipeline = pipeline(Arc::new(SlowGenerator {
            inner: generator.clone(),
            delay: Duration::from_millis(200),
        }));
        let request = car_request();

        let results =
            futures::future::join_all((0..5).map(|_| pipeline.recommend(&request))).await;

        assert_eq!(generator.call_count(), 1);
        let recs: Vec<Recommendation> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(recs.iter().filter(|r| !r.cache_hit).count(), 1);
        assert!(recs.iter().all(|r| r.trips == recs[0].trips));
    }

    #[test]
    fn validation_preserves_order() {
        let origin = koramangala();
        let pipeline = pipeline(Arc::new(FixtureGenerator::new("{}")));
        let request = car_request();
        let candidates = vec![
            candidate("b", origin.latitude + 0.01, origin.longitude, 10.0, 30.0),
            candidate("a", origin.latitude + 0.02, origin.longitude, 10.0, 30.0),
        ];

        let trips = pipeline.validate_candidates(candidates, &request);

        let ids: Vec<&str> = trips.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
