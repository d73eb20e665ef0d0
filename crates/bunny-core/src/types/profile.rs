//! User profile snapshot.

use serde::{Deserialize, Serialize};

/// Progress and financial snapshot returned by `GET profile/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Current coin balance.
    #[serde(default)]
    pub coins: i64,
    /// Current level.
    #[serde(default = "default_level")]
    pub level: i64,
    /// Experience points towards the next level.
    #[serde(default)]
    pub xp: i64,
    /// Monthly income, when the user has provided one.
    #[serde(default, deserialize_with = "super::amount::optional")]
    pub salary_amount: Option<f64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            coins: 0,
            level: default_level(),
            xp: 0,
            salary_amount: None,
        }
    }
}

fn default_level() -> i64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_profile() {
        let profile: Profile = serde_json::from_str(r#"{"coins": 620}"#).expect("deserialize");
        assert_eq!(profile.coins, 620);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.salary_amount, None);
    }

    #[test]
    fn test_decimal_salary() {
        let profile: Profile =
            serde_json::from_str(r#"{"coins": 10, "salary_amount": "1500.00"}"#)
                .expect("deserialize");
        assert_eq!(profile.salary_amount, Some(1500.0));
    }
}
