//! Budget recommendation policy configuration.

use serde::{Deserialize, Serialize};

/// Policy constants for the coin-milestone reward recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Whether coin milestones trigger a recommendation at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Coin balance at which a recommendation fires.
    #[serde(default = "default_coin_threshold")]
    pub coin_threshold: i64,
    /// Fraction of salary withheld as a safety reserve.
    #[serde(default = "default_reserve_ratio")]
    pub reserve_ratio: f64,
    /// Minimum disposable amount before any treat is suggested.
    #[serde(default = "default_min_fun_amount")]
    pub min_fun_amount: f64,
    /// Maximum treat items in one recommendation.
    #[serde(default = "default_max_treats")]
    pub max_treats: usize,
    /// Hobbies suggested alongside a treat.
    #[serde(default = "default_max_relax_with_treat")]
    pub max_relax_with_treat: usize,
    /// Use the user's own hobby list when the recommendation endpoint has none.
    #[serde(default)]
    pub hobby_fallback_to_catalog: bool,
    /// Re-check the coin milestone every N seconds. Unset means startup only.
    #[serde(default)]
    pub milestone_check_interval_seconds: Option<u64>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            coin_threshold: default_coin_threshold(),
            reserve_ratio: default_reserve_ratio(),
            min_fun_amount: default_min_fun_amount(),
            max_treats: default_max_treats(),
            max_relax_with_treat: default_max_relax_with_treat(),
            hobby_fallback_to_catalog: false,
            milestone_check_interval_seconds: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_coin_threshold() -> i64 {
    500
}

fn default_reserve_ratio() -> f64 {
    0.30
}

fn default_min_fun_amount() -> f64 {
    50.0
}

fn default_max_treats() -> usize {
    3
}

fn default_max_relax_with_treat() -> usize {
    2
}
