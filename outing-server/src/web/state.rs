//! Application state for the web layer.

use std::sync::Arc;

use crate::pipeline::Pipeline;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Recommendation pipeline, including its cache
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
