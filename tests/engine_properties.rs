//! Property-based tests for the rating engine and forecasting pipeline

use proptest::prelude::*;
use rally_rating::config::{LiveParams, UpdateParams};
use rally_rating::forecast::solver::match_win_probability;
use rally_rating::forecast::{live_probability, score_lead_probability};
use rally_rating::rating::{std_normal_cdf, RatingEngine};
use rally_rating::types::{MatchFormat, MatchScore, PlayerRating, Team};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn player_strategy() -> impl Strategy<Value = PlayerRating> {
    (0.0..=100.0f64, 1.0..=30.0f64).prop_map(|(mu, sigma)| PlayerRating::new(mu, sigma))
}

fn team_strategy() -> impl Strategy<Value = Team> {
    (player_strategy(), player_strategy()).prop_map(|(a, b)| Team::new(a, b))
}

fn score_strategy() -> impl Strategy<Value = MatchScore> {
    (0u32..=13, 0u32..=13).prop_map(|(score_a, score_b)| MatchScore { score_a, score_b })
}

proptest! {
    #[test]
    fn cdf_symmetry_holds(t in -8.0..=8.0f64) {
        let sum = std_normal_cdf(t) + std_normal_cdf(-t);
        prop_assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn score_model_stays_in_open_bounds(score in score_strategy()) {
        let p = score_lead_probability(score, 11);
        prop_assert!(p > 0.25 && p < 0.75);
    }

    #[test]
    fn solver_symmetry_law(p in 0.0..=1.0f64, a in 0u32..=11, b in 0u32..=11) {
        let format = MatchFormat::default();
        let forward = match_win_probability(p, MatchScore { score_a: a, score_b: b }, format);
        let mirrored = match_win_probability(1.0 - p, MatchScore { score_a: b, score_b: a }, format);
        prop_assert!((forward + mirrored - 1.0).abs() < 1e-9);
        prop_assert!((0.0..=1.0).contains(&forward));
    }

    #[test]
    fn update_invariants_hold(
        team_a in team_strategy(),
        team_b in team_strategy(),
        score in score_strategy(),
    ) {
        let engine = RatingEngine::new(UpdateParams::default()).unwrap();
        let result = engine.update_ratings(&team_a, &team_b, score).unwrap();

        // Probabilities are complementary
        prop_assert!((result.p_win_a + result.p_win_b - 1.0).abs() < 1e-12);

        // Normalized weights sum to 1 per team
        let sum_a: f64 = result.explain.weights.team_a.iter().sum();
        let sum_b: f64 = result.explain.weights.team_b.iter().sum();
        prop_assert!((sum_a - 1.0).abs() < 1e-9);
        prop_assert!((sum_b - 1.0).abs() < 1e-9);

        // Updated ratings stay bounded, uncertainty never increases
        for (before, after) in team_a
            .players()
            .iter()
            .chain(team_b.players())
            .zip(result.team_a_new.players().iter().chain(result.team_b_new.players()))
        {
            prop_assert!(after.mu >= 0.0 && after.mu <= 100.0);
            prop_assert!(after.sigma <= before.sigma + 1e-12);
            prop_assert!(after.sigma >= 1.0);
        }

        // One match shrinks sigma by at most 20%
        prop_assert!(result.explain.sigma_shrink_multiplier >= 0.80);
        prop_assert!((0.0..=1.0).contains(&result.explain.surprise));
    }

    #[test]
    fn explain_trace_reproduces_the_update(
        team_a in team_strategy(),
        team_b in team_strategy(),
        score in score_strategy(),
    ) {
        let engine = RatingEngine::new(UpdateParams::default()).unwrap();
        let result = engine.update_ratings(&team_a, &team_b, score).unwrap();
        let explain = &result.explain;

        // Raw deltas are exactly the team delta split by the reported weights
        for i in 0..2 {
            let expected_a = explain.delta_team_a * explain.weights.team_a[i];
            prop_assert!((explain.per_player.team_a[i].raw_delta - expected_a).abs() < 1e-12);

            let expected_b = explain.delta_team_b * explain.weights.team_b[i];
            prop_assert!((explain.per_player.team_b[i].raw_delta - expected_b).abs() < 1e-12);
        }

        // New ratings follow from mu_before plus the reported tapered delta
        for (delta, after) in explain
            .per_player
            .team_a
            .iter()
            .zip(result.team_a_new.players())
        {
            let expected = (delta.mu_before + delta.tapered_delta).clamp(0.0, 100.0);
            prop_assert!((after.mu - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn seeded_live_probability_is_bit_reproducible(
        seed in any::<u64>(),
        score in score_strategy(),
    ) {
        let mut params = LiveParams::default();
        params.n_samples = 50;
        let a = PlayerRating::new(58.0, 9.0);
        let b = PlayerRating::new(47.0, 11.0);

        let first = live_probability(&a, &b, score, &params, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let second = live_probability(&a, &b, score, &params, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        prop_assert_eq!(first.p_a, second.p_a);
        prop_assert!((first.p_a + first.p_b - 1.0).abs() < 1e-12);
    }
}

#[test]
fn even_shutout_regression() {
    // Two identical 50/10 teams, 11-0: pre-match 0.5, team delta exactly
    // K * 0.5 * 2 = 2.5, split evenly, tapered equally.
    let engine = RatingEngine::new(UpdateParams::default()).unwrap();
    let team = Team::new(PlayerRating::new(50.0, 10.0), PlayerRating::new(50.0, 10.0));
    let score = MatchScore::new(11, 0).unwrap();
    let result = engine.update_ratings(&team, &team, score).unwrap();

    assert!((result.p_win_a - 0.5).abs() < 1e-12);
    assert!((result.explain.delta_team_a - 2.5).abs() < 1e-12);

    let raw_sum: f64 = result
        .explain
        .per_player
        .team_a
        .iter()
        .map(|d| d.raw_delta)
        .sum();
    assert!((raw_sum - 2.5).abs() < 1e-12);

    let per = &result.explain.per_player.team_a;
    assert!((per[0].tapered_delta - per[1].tapered_delta).abs() < 1e-12);
}

#[test]
fn deuce_state_matches_closed_form() {
    for p in [0.3, 0.5, 0.7] {
        let q = 1.0 - p;
        let expected = p * p / (p * p + q * q);
        let solved = match_win_probability(
            p,
            MatchScore {
                score_a: 10,
                score_b: 10,
            },
            MatchFormat::default(),
        );
        assert!((solved - expected).abs() < 1e-12);
    }
}
