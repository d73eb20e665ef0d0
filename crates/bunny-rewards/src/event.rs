//! Reward events and their presentation timings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Auto-dismiss time for XP and coin gains.
pub const GAIN_DISMISS: Duration = Duration::from_millis(2200);
/// Auto-dismiss time for level-ups.
pub const LEVEL_UP_DISMISS: Duration = Duration::from_millis(4500);
/// Auto-dismiss time for badges.
pub const BADGE_DISMISS: Duration = Duration::from_millis(5000);
/// Auto-dismiss time for the generic reward modal.
pub const DEFAULT_DISMISS: Duration = Duration::from_millis(3000);

/// A discrete unit of celebratory feedback queued for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RewardEvent {
    /// Experience points gained
    Xp {
        /// Points gained.
        amount: i64,
        /// What earned them.
        source: Option<String>,
    },
    /// Coins gained
    Coins {
        /// Coins gained.
        amount: i64,
        /// What earned them.
        source: Option<String>,
    },
    /// A new level was reached
    LevelUp {
        /// The level just reached.
        new_level: i64,
    },
    /// A badge was earned
    Badge {
        /// Badge title.
        title: String,
        /// Badge description.
        description: Option<String>,
    },
    /// Any other reward shown in the generic modal
    Custom {
        /// Reward name.
        name: String,
        /// Reward description.
        description: Option<String>,
    },
}

impl RewardEvent {
    /// How long the event stays visible unless closed earlier.
    pub fn dismiss_after(&self) -> Duration {
        match self {
            Self::Xp { .. } | Self::Coins { .. } => GAIN_DISMISS,
            Self::LevelUp { .. } => LEVEL_UP_DISMISS,
            Self::Badge { .. } => BADGE_DISMISS,
            Self::Custom { .. } => DEFAULT_DISMISS,
        }
    }

    /// Short variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Xp { .. } => "xp",
            Self::Coins { .. } => "coins",
            Self::LevelUp { .. } => "level_up",
            Self::Badge { .. } => "badge",
            Self::Custom { .. } => "custom",
        }
    }

    /// Headline shown to the user.
    pub fn title(&self) -> String {
        match self {
            Self::Xp { amount, .. } => format!("+{amount} XP"),
            Self::Coins { amount, .. } => format!("+{amount} Coins"),
            Self::LevelUp { new_level } => format!("Level {new_level}!"),
            Self::Badge { title, .. } => title.clone(),
            Self::Custom { name, .. } => name.clone(),
        }
    }

    /// Secondary line, if any.
    pub fn subtitle(&self) -> Option<&str> {
        match self {
            Self::Xp { source, .. } | Self::Coins { source, .. } => source.as_deref(),
            Self::LevelUp { .. } => None,
            Self::Badge { description, .. } | Self::Custom { description, .. } => {
                description.as_deref()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dismiss_durations() {
        let xp = RewardEvent::Xp {
            amount: 50,
            source: None,
        };
        let coins = RewardEvent::Coins {
            amount: 10,
            source: None,
        };
        let level = RewardEvent::LevelUp { new_level: 3 };
        let badge = RewardEvent::Badge {
            title: "Task Master".into(),
            description: None,
        };
        let custom = RewardEvent::Custom {
            name: "Bunny's Smart Reward".into(),
            description: None,
        };
        assert_eq!(xp.dismiss_after(), Duration::from_millis(2200));
        assert_eq!(coins.dismiss_after(), Duration::from_millis(2200));
        assert_eq!(level.dismiss_after(), Duration::from_millis(4500));
        assert_eq!(badge.dismiss_after(), Duration::from_millis(5000));
        assert_eq!(custom.dismiss_after(), Duration::from_millis(3000));
    }

    #[test]
    fn test_titles() {
        let xp = RewardEvent::Xp {
            amount: 50,
            source: Some("Laundry".into()),
        };
        assert_eq!(xp.title(), "+50 XP");
        assert_eq!(xp.subtitle(), Some("Laundry"));
        assert_eq!(RewardEvent::LevelUp { new_level: 7 }.title(), "Level 7!");
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_value(RewardEvent::LevelUp { new_level: 4 }).expect("serialize");
        assert_eq!(json["type"], "level_up");
        assert_eq!(json["new_level"], 4);
    }
}
