//! Tuning parameters for the validation pipeline.

use std::time::Duration;

/// When to override the generator's travel time.
///
/// The ratios are empirical tuning choices, not derived constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionPolicy {
    /// Reported times below this fraction of the baseline imply an
    /// impossible average speed and are replaced by the baseline.
    pub implausible_ratio: f64,

    /// Plausible reported times are raised to at least this fraction
    /// of the baseline.
    pub floor_ratio: f64,
}

impl CorrectionPolicy {
    pub fn new(implausible_ratio: f64, floor_ratio: f64) -> Self {
        Self {
            implausible_ratio,
            floor_ratio,
        }
    }
}

impl Default for CorrectionPolicy {
    fn default() -> Self {
        Self {
            implausible_ratio: 0.6,
            floor_ratio: 0.8,
        }
    }
}

/// How much of the budget may be spent getting there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPolicy {
    /// Fraction of the total time budget allowed for one-way travel.
    pub travel_budget_fraction: f64,

    /// Extra minutes tolerated on top of the one-way allowance.
    pub grace_mins: u32,
}

impl FilterPolicy {
    pub fn new(travel_budget_fraction: f64, grace_mins: u32) -> Self {
        Self {
            travel_budget_fraction,
            grace_mins,
        }
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            travel_budget_fraction: 0.25,
            grace_mins: 15,
        }
    }
}

/// Configuration for the recommendation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub correction: CorrectionPolicy,

    pub filter: FilterPolicy,

    /// Upper bound on a single generator call (seconds).
    pub generation_timeout_secs: u64,
}

impl PipelineConfig {
    pub fn new(
        correction: CorrectionPolicy,
        filter: FilterPolicy,
        generation_timeout_secs: u64,
    ) -> Self {
        Self {
            correction,
            filter,
            generation_timeout_secs,
        }
    }

    /// Set the generator timeout.
    pub fn with_generation_timeout(mut self, secs: u64) -> Self {
        self.generation_timeout_secs = secs;
        self
    }

    /// Returns the generator timeout as a Duration.
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            correction: CorrectionPolicy::default(),
            filter: FilterPolicy::default(),
            generation_timeout_secs: 45,
        }
    }
}
