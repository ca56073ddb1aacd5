//! Standard normal CDF and skill-gap probabilities
//!
//! Every place a skill gap must become a probability funnels through the
//! functions here.

use statrs::function::erf::erf;
use std::f64::consts::SQRT_2;

/// Argument magnitude beyond which the CDF is saturated to exactly 0 or 1
const SATURATION_BOUND: f64 = 8.0;

/// Standard normal cumulative distribution function
///
/// `Φ(t) = 0.5·(1 + erf(t/√2))`. Saturates for large `|t|` instead of
/// relying on erf behavior in the far tails.
pub fn std_normal_cdf(t: f64) -> f64 {
    if t >= SATURATION_BOUND {
        return 1.0;
    }
    if t <= -SATURATION_BOUND {
        return 0.0;
    }
    0.5 * (1.0 + erf(t / SQRT_2))
}

/// Probability that a side with skill gap `delta_mu` wins, given the total
/// variance of the matchup
///
/// Zero variance is the degenerate-certainty case: the higher mean wins
/// outright, equal means are a defined 0.5 tie.
pub fn win_probability(delta_mu: f64, variance: f64) -> f64 {
    if variance <= 0.0 {
        return if delta_mu > 0.0 {
            1.0
        } else if delta_mu < 0.0 {
            0.0
        } else {
            0.5
        };
    }
    std_normal_cdf(delta_mu / (2.0 * variance).sqrt())
}

/// Probability that side A wins the next single point based purely on skill
pub fn skill_gap_probability(mu_a: f64, sigma_a: f64, mu_b: f64, sigma_b: f64) -> f64 {
    win_probability(mu_a - mu_b, sigma_a.powi(2) + sigma_b.powi(2))
}
