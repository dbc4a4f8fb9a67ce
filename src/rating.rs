//! Elo rating update for finished games.
//!
//! The core only reports outcomes; the identity service owns the ratings and
//! calls this once per finished game and player.

use serde::{Deserialize, Serialize};

/// Rating parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingConfig {
    /// Maximum points gained or lost in one game.
    pub k_factor: f64,
    /// Ratings never drop below this.
    pub floor: i32,
    /// Rating of a new player.
    pub initial: i32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            floor: 100,
            initial: 1200,
        }
    }
}

impl RatingConfig {
    /// Create a new config with a custom K-factor.
    pub fn with_k_factor(mut self, k: f64) -> Self {
        self.k_factor = k;
        self
    }

    /// Create a new config with a custom rating floor.
    pub fn with_floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }
}

/// Expected score of `rating` against `opponent`.
#[must_use]
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(f64::from(opponent - rating) / 400.0))
}

/// New rating after scoring `score` (1 win, 0.5 draw, 0 loss) against `opponent`.
#[must_use]
pub fn elo_update(rating: i32, opponent: i32, score: f64, config: &RatingConfig) -> i32 {
    let delta = config.k_factor * (score - expected_score(rating, opponent));
    let updated = (f64::from(rating) + delta).round() as i32;
    updated.max(config.floor)
}
