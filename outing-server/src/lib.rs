//! Outing recommender server.
//!
//! Asks a generator for nearby micro-trips, checks every claimed travel
//! time against a physics baseline, drops what cannot fit the user's
//! time and distance limits, and caches the result per request shape.

pub mod cache;
pub mod domain;
pub mod generator;
pub mod physics;
pub mod pipeline;
pub mod web;
