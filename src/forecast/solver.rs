//! Recursive match-win probability for a fixed per-point probability
//!
//! Models the match as a race to `target` points with a `win_by` margin. The
//! recursion terminates through the deuce closed form once both sides are one
//! point from qualifying, so the reachable state space is O(target²). The
//! memo table is scoped to one solver instance for one fixed `p`; reusing it
//! across different `p` values would silently return wrong probabilities.

use crate::types::{MatchFormat, MatchScore};
use crate::utils::clamp01;
use std::collections::HashMap;

/// Single-use solver for one fixed per-point probability
#[derive(Debug)]
pub struct MatchWinSolver {
    p: f64,
    format: MatchFormat,
    memo: HashMap<(u32, u32), f64>,
}

impl MatchWinSolver {
    pub fn new(p: f64, format: MatchFormat) -> Self {
        Self {
            p: clamp01(p),
            format,
            memo: HashMap::new(),
        }
    }

    /// Probability that side A wins the match from score (a, b)
    pub fn solve(&mut self, a: u32, b: u32) -> f64 {
        let target = self.format.target;
        let win_by = self.format.win_by;

        if a >= target && a.saturating_sub(b) >= win_by {
            return 1.0;
        }
        if b >= target && b.saturating_sub(a) >= win_by {
            return 0.0;
        }

        // Deuce boundary: both sides one point from qualifying turns the
        // remainder into a pure margin race with a closed form.
        if a + 1 >= target && b + 1 >= target {
            return self.deuce_probability();
        }

        if let Some(&cached) = self.memo.get(&(a, b)) {
            return cached;
        }

        let p = self.p;
        let result = p * self.solve(a + 1, b) + (1.0 - p) * self.solve(a, b + 1);
        self.memo.insert((a, b), result);
        result
    }

    /// Closed form for the margin race: `p² / (p² + (1-p)²)`
    fn deuce_probability(&self) -> f64 {
        let p = self.p;
        let q = 1.0 - p;
        let denom = p * p + q * q;
        if denom == 0.0 {
            // Unreachable for real p in [0, 1]; resolve by the favored side
            return if p > 0.5 { 1.0 } else { 0.0 };
        }
        (p * p) / denom
    }
}

/// Convenience wrapper: one solve with a fresh memo table
pub fn match_win_probability(p: f64, score: MatchScore, format: MatchFormat) -> f64 {
    MatchWinSolver::new(p, format).solve(score.score_a, score.score_b)
}
