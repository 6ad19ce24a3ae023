//! Read-only game state consulted while rendering.
//!
//! Rendering needs two answers from the running game: whether a challenge
//! has been completed (to unlock hidden gain columns) and how sacrifice
//! points translate into the ant multiplier. The [`GameQueries`] trait
//! abstracts both so the core never reaches into a global game object.

use std::collections::BTreeMap;

/// Upper bound on the ant sacrifice multiplier.
const MULTIPLIER_CAP: f64 = 1e300;

/// Queries against the live game state.
pub trait GameQueries {
    /// How many times `challenge` has been completed.
    fn challenge_completions(&self, challenge: u32) -> u32;

    /// The ant multiplier granted by `points` sacrifice points.
    fn ant_sacrifice_multiplier(&self, points: f64) -> f64;
}

/// The multiplier curve before any upgrade bonuses:
/// `(1 + p/5000)^2 * (1 + 0.2 * log10(1 + p))`, capped at `1e300`.
pub fn base_ant_sacrifice_multiplier(points: f64) -> f64 {
    let points = if points.is_finite() {
        points.max(0.0)
    } else {
        0.0
    };
    let multiplier = (1.0 + points / 5000.0).powi(2) * 0.2f64.mul_add((1.0 + points).log10(), 1.0);
    multiplier.min(MULTIPLIER_CAP)
}

/// A fixed snapshot of game state.
///
/// Used by the CLI and the tests; an embedding game implements
/// [`GameQueries`] over its own state instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticGameState {
    completions: BTreeMap<u32, u32>,
}

impl StaticGameState {
    /// A state with no challenges completed.
    pub const fn new() -> Self {
        Self {
            completions: BTreeMap::new(),
        }
    }

    /// Set the completion count of `challenge`.
    pub fn set_completions(&mut self, challenge: u32, count: u32) {
        self.completions.insert(challenge, count);
    }

    /// Record one more completion of `challenge`. Returns the new count.
    pub fn complete_challenge(&mut self, challenge: u32) -> u32 {
        let count = self.completions.entry(challenge).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }
}

impl FromIterator<(u32, u32)> for StaticGameState {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self {
            completions: iter.into_iter().collect(),
        }
    }
}

impl GameQueries for StaticGameState {
    fn challenge_completions(&self, challenge: u32) -> u32 {
        self.completions.get(&challenge).copied().unwrap_or(0)
    }

    fn ant_sacrifice_multiplier(&self, points: f64) -> f64 {
        base_ant_sacrifice_multiplier(points)
    }
}
