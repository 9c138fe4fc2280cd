//! The recommendation pipeline.
//!
//! Turns a request into validated trips: a cache in front of the
//! generator, then travel-time correction and constraint filtering of
//! everything the generator proposes.

mod config;
mod correct;
mod filter;
mod orchestrator;

pub use config::{CorrectionPolicy, FilterPolicy, PipelineConfig};
pub use orchestrator::{Pipeline, PipelineError, Recommendation};
