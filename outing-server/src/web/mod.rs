//! Web layer for the outing recommender.
//!
//! Provides a JSON endpoint for recommendations plus cache inspection.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
