//! Notification kinds.

use serde::{Deserialize, Serialize};

/// Notification kinds emitted by the BunnySteps backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    /// A task was moved to done
    TaskComplete,
    /// The user reached a new level
    LevelUp,
    /// A badge was awarded
    BadgeEarned,
    /// The weekly no-impulsive-buys bonus
    WeeklyDiscipline,
    /// Generic reminder
    Reminder,
    /// A reminder came due
    ReminderDue,
    /// Anything this engine does not know about
    Other(String),
}

impl NotificationKind {
    /// Parse from string
    pub fn from_str_value(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "task_complete" => Self::TaskComplete,
            "level_up" => Self::LevelUp,
            "badge_earned" => Self::BadgeEarned,
            "weekly_discipline" => Self::WeeklyDiscipline,
            "reminder" => Self::Reminder,
            "reminder_due" => Self::ReminderDue,
            other => Self::Other(other.to_string()),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &str {
        match self {
            Self::TaskComplete => "task_complete",
            Self::LevelUp => "level_up",
            Self::BadgeEarned => "badge_earned",
            Self::WeeklyDiscipline => "weekly_discipline",
            Self::Reminder => "reminder",
            Self::ReminderDue => "reminder_due",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Whether notifications of this kind turn into reward presentations
    pub fn is_reward_eligible(&self) -> bool {
        matches!(
            self,
            Self::TaskComplete | Self::LevelUp | Self::BadgeEarned | Self::WeeklyDiscipline
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!(
            NotificationKind::from_str_value("task_complete"),
            NotificationKind::TaskComplete
        );
        assert_eq!(
            NotificationKind::from_str_value("Weekly_Discipline"),
            NotificationKind::WeeklyDiscipline
        );
        assert_eq!(
            NotificationKind::from_str_value("friend_request"),
            NotificationKind::Other("friend_request".into())
        );
    }

    #[test]
    fn test_eligibility() {
        assert!(NotificationKind::LevelUp.is_reward_eligible());
        assert!(NotificationKind::BadgeEarned.is_reward_eligible());
        assert!(!NotificationKind::ReminderDue.is_reward_eligible());
        assert!(!NotificationKind::Other("x".into()).is_reward_eligible());
    }
}
