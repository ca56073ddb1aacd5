//! Rating update engine parameters

use crate::error::{RatingError, Result};
use crate::types::{DEFAULT_MAX_RATING, SIGMA_FLOOR};
use serde::{Deserialize, Serialize};

/// Parameters of the bounded, taper-and-credit-weighted rating update
///
/// Requests may carry a partial `params` object; any field not supplied
/// falls back to the default below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateParams {
    /// Performance-noise scale, folded into the pre-match probability
    /// inside the update path only
    pub beta: f64,
    /// Base uncertainty decay per match
    pub tau: f64,
    /// Base step size for the team-level delta
    #[serde(rename = "K")]
    pub k: f64,
    /// Weight of inverse-variance vs strength-based credit
    pub lambda_uncertainty: f64,
    /// Softmax temperature for the strength share over mu
    pub softmax_temp: f64,
    /// Rating ceiling
    #[serde(rename = "MAX_R")]
    pub max_r: f64,
    /// Taper exponent for gains near the ceiling
    #[serde(rename = "GAMMA_POS")]
    pub gamma_pos: f64,
    /// Taper exponent for losses near zero
    #[serde(rename = "GAMMA_NEG")]
    pub gamma_neg: f64,
    /// Lower bound for sigma after decay
    pub sigma_floor: f64,
}

impl Default for UpdateParams {
    fn default() -> Self {
        Self {
            beta: 4.1667,
            tau: 0.05,
            k: 2.5,
            lambda_uncertainty: 0.6,
            softmax_temp: 5.0,
            max_r: DEFAULT_MAX_RATING,
            gamma_pos: 2.0,
            gamma_neg: 1.0,
            sigma_floor: SIGMA_FLOOR,
        }
    }
}

impl UpdateParams {
    /// Create conservative parameters (smaller, slower rating changes)
    pub fn conservative() -> Self {
        Self {
            k: 1.5,
            tau: 0.03,
            ..Self::default()
        }
    }

    /// Create aggressive parameters (faster rating changes)
    pub fn aggressive() -> Self {
        Self {
            k: 4.0,
            tau: 0.08,
            ..Self::default()
        }
    }

    /// Validate parameter values
    pub fn validate(&self) -> Result<()> {
        if self.beta < 0.0 || !self.beta.is_finite() {
            return Err(RatingError::ConfigurationError {
                message: "beta must be non-negative and finite".to_string(),
            }
            .into());
        }
        if self.tau < 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "tau must be non-negative".to_string(),
            }
            .into());
        }
        if self.k <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "K must be positive".to_string(),
            }
            .into());
        }
        if !(0.0..=1.0).contains(&self.lambda_uncertainty) {
            return Err(RatingError::ConfigurationError {
                message: "lambda_uncertainty must lie in [0, 1]".to_string(),
            }
            .into());
        }
        if self.softmax_temp <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "softmax_temp must be positive".to_string(),
            }
            .into());
        }
        if self.max_r <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "MAX_R must be positive".to_string(),
            }
            .into());
        }
        if self.gamma_pos < 0.0 || self.gamma_neg < 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "taper exponents must be non-negative".to_string(),
            }
            .into());
        }
        if self.sigma_floor <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "sigma_floor must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
