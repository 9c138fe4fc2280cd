//! Trip generators.
//!
//! A generator proposes candidate outings for a request. It is an external
//! collaborator: it may fail, return unparsable text, or return physically
//! impossible numbers. This module provides the seam the pipeline calls
//! through, the schema its output is validated against, and two
//! implementations:
//!
//! - [`GeminiGenerator`] calls the Gemini API with a structured prompt
//! - [`FixtureGenerator`] serves a fixed payload for offline use

mod convert;
mod error;
mod fixture;
mod gemini;
pub mod prompt;
mod types;

use async_trait::async_trait;

use crate::domain::RecommendRequest;

pub use convert::{CandidateResult, FieldDefect, PayloadError, parse_payload};
pub use error::GeneratorError;
pub use fixture::FixtureGenerator;
pub use gemini::{GeminiConfig, GeminiGenerator};

/// Source of candidate trips.
///
/// Returns the raw payload text, expected to be JSON of the form
/// `{"trips": [...]}`. Nothing about it is trusted until validated.
#[async_trait]
pub trait TripGenerator: Send + Sync {
    async fn generate(&self, request: &RecommendRequest) -> Result<String, GeneratorError>;
}
