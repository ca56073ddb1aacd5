//! HTTP adapter for the rating engine
//!
//! The service is a thin boundary: deserialize requests into the core data
//! model, validate shape, run the pure engine, serialize the result back out.
//! No business logic lives here.

pub mod app;

pub use app::{create_router, AppState};
