//! Common types used throughout the rating service

use crate::error::RatingError;
use serde::{Deserialize, Serialize};

/// Rating ceiling applied when no explicit configuration is given
pub const DEFAULT_MAX_RATING: f64 = 100.0;

/// Lower bound for a player's uncertainty after updates
pub const SIGMA_FLOOR: f64 = 1.0;

/// Skill estimate for a single player
///
/// `mu` is the mean of the assumed skill distribution, `sigma` its standard
/// deviation. Both are validated at the engine boundary before any
/// computation touches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    /// Optional display name, echoed back untouched in results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mu: f64,
    pub sigma: f64,
}

impl PlayerRating {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self {
            name: None,
            mu,
            sigma,
        }
    }

    /// Validate the player state against the configured rating ceiling
    pub fn validate(&self, max_rating: f64) -> Result<(), RatingError> {
        if !self.mu.is_finite() {
            return Err(RatingError::InvalidPlayerState {
                reason: format!("mu must be finite, got {}", self.mu),
            });
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(RatingError::InvalidPlayerState {
                reason: format!("sigma must be a positive finite number, got {}", self.sigma),
            });
        }
        if self.mu < 0.0 || self.mu > max_rating {
            return Err(RatingError::InvalidPlayerState {
                reason: format!("mu must lie in [0, {}], got {}", max_rating, self.mu),
            });
        }
        Ok(())
    }
}

impl Default for PlayerRating {
    fn default() -> Self {
        Self::new(50.0, 10.0)
    }
}

/// A doubles team of exactly two players
///
/// Slot order only matters for reporting: credit and blame are computed per
/// slot, never per identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PlayerRating>", into = "Vec<PlayerRating>")]
pub struct Team {
    players: [PlayerRating; 2],
}

impl Team {
    pub fn new(first: PlayerRating, second: PlayerRating) -> Self {
        Self {
            players: [first, second],
        }
    }

    pub fn players(&self) -> &[PlayerRating; 2] {
        &self.players
    }

    /// Team skill estimate: mean of the two players' mu
    pub fn mean_mu(&self) -> f64 {
        (self.players[0].mu + self.players[1].mu) / 2.0
    }

    /// Team uncertainty: root-mean-square of the two players' sigma
    pub fn rms_sigma(&self) -> f64 {
        ((self.players[0].sigma.powi(2) + self.players[1].sigma.powi(2)) / 2.0).sqrt()
    }

    /// Validate both players against the configured rating ceiling
    pub fn validate(&self, max_rating: f64) -> Result<(), RatingError> {
        for player in &self.players {
            player.validate(max_rating)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<PlayerRating>> for Team {
    type Error = RatingError;

    fn try_from(players: Vec<PlayerRating>) -> Result<Self, Self::Error> {
        let found = players.len();
        let players: [PlayerRating; 2] = players
            .try_into()
            .map_err(|_| RatingError::InvalidTeamSize { found })?;
        Ok(Self { players })
    }
}

impl From<Team> for Vec<PlayerRating> {
    fn from(team: Team) -> Self {
        team.players.to_vec()
    }
}

/// Final score of a completed match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    #[serde(rename = "scoreA")]
    pub score_a: u32,
    #[serde(rename = "scoreB")]
    pub score_b: u32,
}

impl MatchScore {
    /// Build a score from untrusted integers, rejecting anything outside [0, u32::MAX]
    pub fn new(score_a: i64, score_b: i64) -> Result<Self, RatingError> {
        let convert = |value: i64, side: &str| {
            u32::try_from(value).map_err(|_| RatingError::InvalidScore {
                reason: format!("score for {} must lie in [0, {}], got {}", side, u32::MAX, value),
            })
        };
        Ok(Self {
            score_a: convert(score_a, "teamA")?,
            score_b: convert(score_b, "teamB")?,
        })
    }

    pub fn margin(&self) -> u32 {
        self.score_a.abs_diff(self.score_b)
    }

    /// Side A won; a tied final score counts as a loss for A
    pub fn side_a_won(&self) -> bool {
        self.score_a > self.score_b
    }
}

/// Match format parameters: points needed to win and the required margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFormat {
    pub target: u32,
    pub win_by: u32,
}

impl Default for MatchFormat {
    fn default() -> Self {
        Self {
            target: 11,
            win_by: 2,
        }
    }
}

/// A pair of values reported per team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerTeam<T> {
    #[serde(rename = "teamA")]
    pub team_a: T,
    #[serde(rename = "teamB")]
    pub team_b: T,
}

/// Per-player slice of the explain trace
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerDelta {
    /// Rating before the update was applied
    pub mu_before: f64,
    /// Share of the team delta assigned to this slot
    pub raw_delta: f64,
    /// Raw delta after the bounded-growth taper
    pub tapered_delta: f64,
}

/// Immutable record of every intermediate quantity of a rating update
///
/// Each weight and delta is reproducible from this trace alone, which is what
/// the regression tests key on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExplain {
    #[serde(rename = "delta_teamA")]
    pub delta_team_a: f64,
    #[serde(rename = "delta_teamB")]
    pub delta_team_b: f64,
    /// Final normalized credit/blame weights, summing to 1 per team
    pub weights: PerTeam<[f64; 2]>,
    /// Inverse-variance weights, summing to 1 per team
    pub uncertainty_weights: PerTeam<[f64; 2]>,
    /// Softmax strength shares over mu, summing to 1 per team
    pub strength_shares: PerTeam<[f64; 2]>,
    /// |actual - predicted| outcome deviation in [0, 1]
    pub surprise: f64,
    /// Multiplier applied to every player's sigma, at most 20% shrink
    pub sigma_shrink_multiplier: f64,
    pub per_player: PerTeam<[PlayerDelta; 2]>,
}

/// Result of a full rating update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdateResult {
    #[serde(rename = "p_win_A")]
    pub p_win_a: f64,
    #[serde(rename = "p_win_B")]
    pub p_win_b: f64,
    #[serde(rename = "teamA_new")]
    pub team_a_new: Team,
    #[serde(rename = "teamB_new")]
    pub team_b_new: Team,
    pub explain: UpdateExplain,
}

/// Pre-match win probability for both teams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreMatchProbability {
    #[serde(rename = "p_teamA")]
    pub p_team_a: f64,
    #[serde(rename = "p_teamB")]
    pub p_team_b: f64,
}

/// Live win probability derived from ratings and the current score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveProbabilityResult {
    pub p_a: f64,
    pub p_b: f64,
}
