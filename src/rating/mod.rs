//! Gaussian skill model and the bounded rating update engine

pub mod engine;
pub mod gaussian;

// Re-export commonly used items
pub use engine::RatingEngine;
pub use gaussian::{skill_gap_probability, std_normal_cdf, win_probability};
