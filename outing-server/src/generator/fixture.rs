//! Fixture generator for running without API access.
//!
//! Serves one fixed payload for every request, as if it were a live
//! generator response.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::RecommendRequest;

use super::TripGenerator;
use super::error::GeneratorError;

/// Generator that returns a pre-loaded payload.
///
/// Useful for development and tests without generator credentials. Counts
/// its invocations so callers can check when the generator was bypassed.
#[derive(Debug, Clone)]
pub struct FixtureGenerator {
    payload: Arc<str>,
    calls: Arc<AtomicUsize>,
}

impl FixtureGenerator {
    /// Serve the given payload text.
    pub fn new(payload: impl Into<String>) -> Self {
        let payload: String = payload.into();
        Self {
            payload: Arc::from(payload),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load the payload from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GeneratorError> {
        let path = path.as_ref();
        let payload = std::fs::read_to_string(path).map_err(|e| {
            GeneratorError::NotConfigured(format!("failed to read fixture {path:?}: {e}"))
        })?;
        Ok(Self::new(payload))
    }

    /// Number of times `generate` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TripGenerator for FixtureGenerator {
    async fn generate(&self, _request: &RecommendRequest) -> Result<String, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.payload.to_string())
    }
}
