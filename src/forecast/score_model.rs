//! In-game score model and the blended per-point probability

use crate::rating::gaussian::skill_gap_probability;
use crate::types::MatchScore;

/// Probability that side A wins based purely on the current score
///
/// A bounded, saturating curve in `(0.25, 0.75)`: the signed lead is scaled
/// by the points remaining, so an early lead means little and a late lead a
/// lot. Exactly 0.5 at any tied score.
pub fn score_lead_probability(score: MatchScore, target: u32) -> f64 {
    let lead = score.score_a as f64 - score.score_b as f64;
    let rem_a = target.saturating_sub(score.score_a);
    let rem_b = target.saturating_sub(score.score_b);
    // Floor at 1 point remaining so a finished game still divides cleanly
    let remaining = (rem_a + rem_b).max(1) as f64;
    0.5 + 0.25 * (lead / (0.6 * remaining)).tanh()
}

/// Live per-point win probability: mostly score dynamics with a modest
/// skill-based correction
pub fn blended_point_probability(
    mu_a: f64,
    sigma_a: f64,
    mu_b: f64,
    sigma_b: f64,
    score: MatchScore,
    target: u32,
    w_mu: f64,
) -> f64 {
    let skill = skill_gap_probability(mu_a, sigma_a, mu_b, sigma_b);
    let dynamics = score_lead_probability(score, target);
    w_mu * skill + (1.0 - w_mu) * dynamics
}
