//! Beta-distributed uncertainty blending over the per-point probability
//!
//! The blended per-point probability is treated as the mean of a Beta
//! distribution whose concentration reflects how much the model trusts it.
//! Averaging the match solver over sampled per-point probabilities smooths
//! the live estimate toward 0.5 when uncertainty is wide. The random source
//! is injected by the caller so results are reproducible under test.

use crate::config::LiveParams;
use crate::error::{RatingError, Result};
use crate::forecast::score_model::blended_point_probability;
use crate::forecast::solver::MatchWinSolver;
use crate::types::{LiveProbabilityResult, MatchScore, PlayerRating, DEFAULT_MAX_RATING};
use crate::utils::mean;
use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Beta;
use tracing::trace;

/// Floor for the Beta shape parameters, avoiding a degenerate distribution
const MIN_SHAPE: f64 = 1e-6;

/// Monte Carlo estimate of the match-win probability under Beta uncertainty
/// about the per-point probability
///
/// Each sample gets its own solver (and memo table); the solves are
/// independent of one another.
pub fn smoothed_match_probability<R: Rng + ?Sized>(
    p_blend: f64,
    score: MatchScore,
    params: &LiveParams,
    rng: &mut R,
) -> Result<f64> {
    params.validate()?;

    let alpha = (p_blend * params.phi).max(MIN_SHAPE);
    let beta = ((1.0 - p_blend) * params.phi).max(MIN_SHAPE);
    let distribution = Beta::new(alpha, beta).map_err(|e| RatingError::ConfigurationError {
        message: format!("invalid Beta shape ({alpha}, {beta}): {e}"),
    })?;

    let format = params.format();
    let mut samples = Vec::with_capacity(params.n_samples);
    for _ in 0..params.n_samples {
        let p_point = distribution.sample(rng);
        let mut solver = MatchWinSolver::new(p_point, format);
        samples.push(solver.solve(score.score_a, score.score_b));
    }
    let estimate = mean(&samples);

    trace!(p_blend, alpha, beta, estimate, "smoothed match probability");
    Ok(estimate)
}

/// Live win probability from current ratings and score
///
/// Pure with respect to the ratings: nothing is mutated, only a probability
/// comes back.
pub fn live_probability<R: Rng + ?Sized>(
    side_a: &PlayerRating,
    side_b: &PlayerRating,
    score: MatchScore,
    params: &LiveParams,
    rng: &mut R,
) -> Result<LiveProbabilityResult> {
    side_a.validate(DEFAULT_MAX_RATING)?;
    side_b.validate(DEFAULT_MAX_RATING)?;
    params.validate()?;

    let p_blend = blended_point_probability(
        side_a.mu,
        side_a.sigma,
        side_b.mu,
        side_b.sigma,
        score,
        params.target,
        params.w_mu,
    );
    let p_a = smoothed_match_probability(p_blend, score, params, rng)?;

    Ok(LiveProbabilityResult {
        p_a,
        p_b: 1.0 - p_a,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::solver::match_win_probability;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(score_a: u32, score_b: u32) -> MatchScore {
        MatchScore { score_a, score_b }
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let params = LiveParams::default();
        let a = PlayerRating::new(55.0, 8.0);
        let b = PlayerRating::new(50.0, 8.0);

        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        let first = live_probability(&a, &b, at(6, 4), &params, &mut rng1).unwrap();
        let second = live_probability(&a, &b, at(6, 4), &params, &mut rng2).unwrap();
        assert_eq!(first.p_a, second.p_a);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let params = LiveParams::default();
        let a = PlayerRating::new(60.0, 10.0);
        let b = PlayerRating::new(45.0, 12.0);
        let mut rng = StdRng::seed_from_u64(7);
        let result = live_probability(&a, &b, at(3, 8), &params, &mut rng).unwrap();
        assert!((result.p_a + result.p_b - 1.0).abs() < 1e-12);
        assert!(result.p_a >= 0.0 && result.p_a <= 1.0);
    }

    #[test]
    fn test_high_concentration_converges_to_fixed_p() {
        // As phi grows the Beta variance vanishes and the smoothed estimate
        // approaches the solver at p_blend itself
        let mut params = LiveParams::default();
        params.phi = 1e9;
        params.n_samples = 200;

        let p_blend = 0.62;
        let score = at(5, 5);
        let mut rng = StdRng::seed_from_u64(11);
        let smoothed = smoothed_match_probability(p_blend, score, &params, &mut rng).unwrap();
        let fixed = match_win_probability(p_blend, score, params.format());
        assert!((smoothed - fixed).abs() < 1e-2);
    }

    #[test]
    fn test_wide_uncertainty_pulls_toward_half() {
        let score = at(8, 4);
        let p_blend = 0.75;

        let mut narrow = LiveParams::default();
        narrow.phi = 500.0;
        let mut wide = LiveParams::default();
        wide.phi = 0.5;

        let mut rng = StdRng::seed_from_u64(3);
        let p_narrow = smoothed_match_probability(p_blend, score, &narrow, &mut rng).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let p_wide = smoothed_match_probability(p_blend, score, &wide, &mut rng).unwrap();

        assert!((p_wide - 0.5).abs() < (p_narrow - 0.5).abs());
    }

    #[test]
    fn test_rejects_invalid_player() {
        let params = LiveParams::default();
        let bad = PlayerRating::new(50.0, 0.0);
        let good = PlayerRating::new(50.0, 10.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(live_probability(&bad, &good, at(0, 0), &params, &mut rng).is_err());
    }

    #[test]
    fn test_extreme_blend_keeps_valid_shape() {
        // A p_blend of 0 or 1 floors the matching shape parameter instead of
        // producing a degenerate Beta
        let params = LiveParams::default();
        let mut rng = StdRng::seed_from_u64(5);
        let low = smoothed_match_probability(0.0, at(0, 0), &params, &mut rng).unwrap();
        let high = smoothed_match_probability(1.0, at(0, 0), &params, &mut rng).unwrap();
        assert!(low < 0.1);
        assert!(high > 0.9);
    }
}
