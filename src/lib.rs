//! Rally Rating - skill rating and win probability engine
//!
//! This crate computes and updates Gaussian skill ratings for 2v2 matches of
//! a points-based racket sport, and estimates win probabilities both before a
//! match and live from the current score.

pub mod config;
pub mod error;
pub mod forecast;
pub mod rating;
pub mod service;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use forecast::{live_probability, MatchWinSolver};
pub use rating::RatingEngine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
