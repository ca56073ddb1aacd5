//! Live win-probability parameters

use crate::error::{RatingError, Result};
use crate::types::MatchFormat;
use serde::{Deserialize, Serialize};

/// Upper bound for the race target; the solver recursion depth grows with
/// the target, so an unbounded request-supplied value could exhaust the stack
pub const MAX_TARGET: u32 = 1_000;

/// Upper bound for the Monte Carlo sample count per request
pub const MAX_SAMPLES: usize = 10_000;

/// Parameters of the live (in-match) win probability estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveParams {
    /// Weight of the skill-based per-point probability in the blend;
    /// the remainder is driven by current score dynamics
    pub w_mu: f64,
    /// Beta concentration; lower values widen the spread of sampled
    /// per-point probabilities
    pub phi: f64,
    /// Monte Carlo sample count
    pub n_samples: usize,
    /// Points needed to win a game
    pub target: u32,
    /// Required winning margin
    pub win_by: u32,
}

impl Default for LiveParams {
    fn default() -> Self {
        Self {
            w_mu: 0.2,
            phi: 5.0,
            n_samples: 300,
            target: 11,
            win_by: 2,
        }
    }
}

impl LiveParams {
    pub fn format(&self) -> MatchFormat {
        MatchFormat {
            target: self.target,
            win_by: self.win_by,
        }
    }

    /// Validate parameter values
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.w_mu) {
            return Err(RatingError::ConfigurationError {
                message: "w_mu must lie in [0, 1]".to_string(),
            }
            .into());
        }
        if self.phi <= 0.0 || !self.phi.is_finite() {
            return Err(RatingError::ConfigurationError {
                message: "phi must be positive and finite".to_string(),
            }
            .into());
        }
        if self.n_samples == 0 || self.n_samples > MAX_SAMPLES {
            return Err(RatingError::ConfigurationError {
                message: format!("n_samples must lie in [1, {}]", MAX_SAMPLES),
            }
            .into());
        }
        if self.target == 0 || self.target > MAX_TARGET {
            return Err(RatingError::ConfigurationError {
                message: format!("target must lie in [1, {}]", MAX_TARGET),
            }
            .into());
        }
        if self.win_by == 0 {
            return Err(RatingError::ConfigurationError {
                message: "win_by must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
