//! Live match-win forecasting
//!
//! The live path blends a skill-based per-point probability with score
//! dynamics, solves the race-to-target recursion for a fixed per-point
//! probability, and smooths the result with Beta-distributed uncertainty
//! over the per-point probability itself. Independent of the rating update
//! path; the two never call each other.

pub mod blender;
pub mod score_model;
pub mod solver;

// Re-export commonly used items
pub use blender::{live_probability, smoothed_match_probability};
pub use score_model::{blended_point_probability, score_lead_probability};
pub use solver::{match_win_probability, MatchWinSolver};
