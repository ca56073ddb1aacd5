//! Bounded, taper-and-credit-weighted rating update engine
//!
//! The engine aggregates each doubles team into a team-level skill estimate,
//! predicts the match outcome, turns the observed result into a margin-scaled
//! team delta, splits that delta across teammates via a credit/blame rule,
//! tapers it near the rating bounds, and decays uncertainty. Inputs are never
//! mutated; callers decide whether to commit the returned copies.

use crate::config::UpdateParams;
use crate::error::Result;
use crate::rating::gaussian::win_probability;
use crate::types::{
    MatchScore, PerTeam, PlayerDelta, PlayerRating, PreMatchProbability, RatingUpdateResult, Team,
    UpdateExplain,
};
use crate::utils::clamp;
use tracing::debug;

/// Scale of the margin multiplier, fixed to the standard 11-point game length
const MARGIN_SCALE: f64 = 11.0;

/// Floor for the sigma shrink multiplier; one match shrinks sigma by at most 20%
const SHRINK_FLOOR: f64 = 0.80;

/// Guard against division by a vanishing sigma or temperature
const EPS: f64 = 1e-6;

/// Rating update engine with validated parameters
#[derive(Debug, Clone)]
pub struct RatingEngine {
    params: UpdateParams,
}

impl RatingEngine {
    /// Create a new engine, validating the parameters up front
    pub fn new(params: UpdateParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &UpdateParams {
        &self.params
    }

    /// Pre-match win probability from ratings alone, without the
    /// performance-noise term
    ///
    /// The update path folds `beta` into its own pre-match estimate; this
    /// endpoint deliberately does not. The two formulas are kept distinct.
    pub fn pre_match_probability(
        &self,
        team_a: &Team,
        team_b: &Team,
    ) -> Result<PreMatchProbability> {
        team_a.validate(self.params.max_r)?;
        team_b.validate(self.params.max_r)?;

        let variance = team_a.rms_sigma().powi(2) + team_b.rms_sigma().powi(2);
        let p_team_a = win_probability(team_a.mean_mu() - team_b.mean_mu(), variance);

        Ok(PreMatchProbability {
            p_team_a,
            p_team_b: 1.0 - p_team_a,
        })
    }

    /// Update both teams' ratings from a finished match
    ///
    /// All validation happens before any computation; either the full update
    /// succeeds or no rating changes at all.
    pub fn update_ratings(
        &self,
        team_a: &Team,
        team_b: &Team,
        score: MatchScore,
    ) -> Result<RatingUpdateResult> {
        team_a.validate(self.params.max_r)?;
        team_b.validate(self.params.max_r)?;

        // Team aggregates feed the expectation only; the split below works on
        // the individual players.
        let variance = self.params.beta.powi(2)
            + team_a.rms_sigma().powi(2)
            + team_b.rms_sigma().powi(2);
        let p_win_a = win_probability(team_a.mean_mu() - team_b.mean_mu(), variance);

        let a_won = score.side_a_won();
        let actual_a = if a_won { 1.0 } else { 0.0 };
        let margin_mult = 1.0 + score.margin() as f64 / MARGIN_SCALE;
        let delta_team_a = self.params.k * (actual_a - p_win_a) * margin_mult;
        let delta_team_b = -delta_team_a;

        let split_a = self.split_weights(team_a, a_won);
        let split_b = self.split_weights(team_b, !a_won);

        // An upset shrinks uncertainty faster, bounded by the 20% floor
        let surprise = (actual_a - p_win_a).abs();
        let shrink = (1.0 - self.params.tau * (1.0 + 0.5 * surprise)).max(SHRINK_FLOOR);

        debug!(
            p_win_a,
            delta_team_a, surprise, shrink, "computed team-level update"
        );

        let (team_a_new, deltas_a) = self.apply_to_team(team_a, delta_team_a, &split_a.weights, shrink);
        let (team_b_new, deltas_b) = self.apply_to_team(team_b, delta_team_b, &split_b.weights, shrink);

        Ok(RatingUpdateResult {
            p_win_a,
            p_win_b: 1.0 - p_win_a,
            team_a_new,
            team_b_new,
            explain: UpdateExplain {
                delta_team_a,
                delta_team_b,
                weights: PerTeam {
                    team_a: split_a.weights,
                    team_b: split_b.weights,
                },
                uncertainty_weights: PerTeam {
                    team_a: split_a.uncertainty,
                    team_b: split_b.uncertainty,
                },
                strength_shares: PerTeam {
                    team_a: split_a.strength,
                    team_b: split_b.strength,
                },
                surprise,
                sigma_shrink_multiplier: shrink,
                per_player: PerTeam {
                    team_a: deltas_a,
                    team_b: deltas_b,
                },
            },
        })
    }

    /// Credit/blame split for one team
    ///
    /// Inverse-variance weights anchor the split toward more certain players;
    /// the softmax strength share skews credit to the weaker teammate on a
    /// win and blame to the stronger teammate on a loss.
    fn split_weights(&self, team: &Team, team_won: bool) -> SplitWeights {
        let players = team.players();

        let inv_vars = [
            1.0 / players[0].sigma.max(EPS).powi(2),
            1.0 / players[1].sigma.max(EPS).powi(2),
        ];
        let inv_sum = inv_vars[0] + inv_vars[1];
        let uncertainty = [inv_vars[0] / inv_sum, inv_vars[1] / inv_sum];

        let temp = self.params.softmax_temp.max(EPS);
        let exps = [
            (players[0].mu / temp).exp(),
            (players[1].mu / temp).exp(),
        ];
        let exp_sum = exps[0] + exps[1];
        let strength = [exps[0] / exp_sum, exps[1] / exp_sum];

        let lambda = self.params.lambda_uncertainty;
        let mut raw = [0.0; 2];
        for i in 0..2 {
            let strength_term = if team_won {
                1.0 - strength[i]
            } else {
                strength[i]
            };
            raw[i] = lambda * uncertainty[i] + (1.0 - lambda) * strength_term;
        }

        let total = raw[0] + raw[1];
        let weights = if total > 0.0 {
            [raw[0] / total, raw[1] / total]
        } else {
            [0.5, 0.5]
        };

        SplitWeights {
            weights,
            uncertainty,
            strength,
        }
    }

    /// Taper a raw delta so ratings approach their bounds asymptotically
    ///
    /// Gains shrink to zero as mu approaches the ceiling; losses shrink to
    /// zero as mu approaches zero and bite hardest near the ceiling.
    fn apply_taper(&self, mu: f64, delta: f64) -> f64 {
        if delta >= 0.0 {
            let headroom = clamp((self.params.max_r - mu) / self.params.max_r, 0.0, 1.0);
            delta * headroom.powf(self.params.gamma_pos)
        } else {
            let altitude = clamp(mu / self.params.max_r, 0.0, 1.0);
            delta * altitude.powf(self.params.gamma_neg)
        }
    }

    /// Produce the updated copy of one team plus its explain slice
    fn apply_to_team(
        &self,
        team: &Team,
        team_delta: f64,
        weights: &[f64; 2],
        shrink: f64,
    ) -> (Team, [PlayerDelta; 2]) {
        let players = team.players();
        let mut updated: [PlayerRating; 2] = players.clone();
        let mut trace = [PlayerDelta {
            mu_before: 0.0,
            raw_delta: 0.0,
            tapered_delta: 0.0,
        }; 2];

        for i in 0..2 {
            let raw = team_delta * weights[i];
            let tapered = self.apply_taper(players[i].mu, raw);
            updated[i].mu = clamp(players[i].mu + tapered, 0.0, self.params.max_r);
            updated[i].sigma = (players[i].sigma * shrink).max(self.params.sigma_floor);
            trace[i] = PlayerDelta {
                mu_before: players[i].mu,
                raw_delta: raw,
                tapered_delta: tapered,
            };
        }

        (Team::new(updated[0].clone(), updated[1].clone()), trace)
    }
}

struct SplitWeights {
    weights: [f64; 2],
    uncertainty: [f64; 2],
    strength: [f64; 2],
}
