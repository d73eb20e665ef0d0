//! Turns notification records into reward events.

use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use tracing;

use bunny_core::types::{NotificationId, NotificationRecord};

use crate::event::RewardEvent;
use crate::queue::state::ScheduledReward;

use super::dedup::ProcessedIds;
use super::kind::NotificationKind;

/// XP granted for a completed task.
pub const TASK_XP: i64 = 50;
/// Coins granted for a completed task.
pub const TASK_COINS: i64 = 10;
/// Delay between the XP and coin presentations of one task.
pub const COIN_STAGGER: Duration = Duration::from_millis(800);
/// Level assumed when a level-up notification carries no number.
pub const DEFAULT_LEVEL: i64 = 2;

const TASK_COIN_SOURCE: &str = "Task completed!";

/// Output of one classification pass.
#[derive(Debug, Default)]
pub struct Classification {
    /// Rewards to enqueue, in presentation order
    pub rewards: Vec<ScheduledReward>,
    /// Notifications claimed in this pass; each should be marked read
    pub acknowledge: Vec<NotificationId>,
}

impl Classification {
    /// Whether this pass produced nothing
    pub fn is_empty(&self) -> bool {
        self.acknowledge.is_empty()
    }
}

/// Classifies notifications and guarantees each id yields rewards at most once.
#[derive(Debug)]
pub struct RewardClassifier {
    /// Ids already converted
    processed: Arc<ProcessedIds>,
    /// `Level <N>`, case-insensitive
    level_pattern: Regex,
}

impl RewardClassifier {
    /// Create a classifier over a (possibly pre-seeded) processed-id set.
    pub fn new(processed: Arc<ProcessedIds>) -> Self {
        Self {
            processed,
            level_pattern: Regex::new(r"(?i)level\s*(\d+)").expect("static regex is valid"),
        }
    }

    /// The processed-id set this classifier claims into.
    pub fn processed(&self) -> &Arc<ProcessedIds> {
        &self.processed
    }

    /// Classify a batch of records, preserving their order.
    ///
    /// Read, ineligible, and already processed records are skipped. Each
    /// surviving id is claimed before its rewards are built.
    pub fn classify(&self, records: &[NotificationRecord]) -> Classification {
        let mut out = Classification::default();

        for record in records {
            if record.is_read {
                continue;
            }

            let kind = NotificationKind::from_str_value(&record.kind);
            if !kind.is_reward_eligible() {
                continue;
            }

            if !self.processed.claim(record.id) {
                tracing::trace!("Notification {} already processed", record.id);
                continue;
            }

            tracing::debug!(
                "Classifying notification {} ({})",
                record.id,
                kind.as_str()
            );
            out.acknowledge.push(record.id);
            self.push_rewards(&kind, record, &mut out.rewards);
        }

        out
    }

    fn push_rewards(
        &self,
        kind: &NotificationKind,
        record: &NotificationRecord,
        rewards: &mut Vec<ScheduledReward>,
    ) {
        match kind {
            NotificationKind::TaskComplete => {
                rewards.push(ScheduledReward::immediate(RewardEvent::Xp {
                    amount: TASK_XP,
                    source: Some(record.title.clone()),
                }));
                rewards.push(ScheduledReward::delayed(
                    RewardEvent::Coins {
                        amount: TASK_COINS,
                        source: Some(TASK_COIN_SOURCE.to_string()),
                    },
                    COIN_STAGGER,
                ));
            }
            NotificationKind::LevelUp => {
                rewards.push(ScheduledReward::immediate(RewardEvent::LevelUp {
                    new_level: self.parse_level(record),
                }));
            }
            NotificationKind::BadgeEarned | NotificationKind::WeeklyDiscipline => {
                let description = Some(record.message.clone()).filter(|m| !m.trim().is_empty());
                rewards.push(ScheduledReward::immediate(RewardEvent::Badge {
                    title: record.title.clone(),
                    description,
                }));
            }
            NotificationKind::Reminder
            | NotificationKind::ReminderDue
            | NotificationKind::Other(_) => {}
        }
    }

    /// Extract the level from the message, then the title; default otherwise.
    pub fn parse_level(&self, record: &NotificationRecord) -> i64 {
        [record.message.as_str(), record.title.as_str()]
            .into_iter()
            .find_map(|text| {
                self.level_pattern
                    .captures(text)
                    .and_then(|caps| caps.get(1))
                    .and_then(|m| m.as_str().parse::<i64>().ok())
            })
            .unwrap_or(DEFAULT_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: i64, kind: &str, title: &str, message: &str) -> NotificationRecord {
        NotificationRecord {
            id: NotificationId(id),
            kind: kind.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            created_at: Utc::now(),
            is_read: false,
        }
    }

    fn classifier() -> RewardClassifier {
        RewardClassifier::new(Arc::new(ProcessedIds::new()))
    }

    #[test]
    fn test_task_complete_emits_xp_then_staggered_coins() {
        let c = classifier();
        let out = c.classify(&[record(1, "task_complete", "Laundry", "done")]);

        assert_eq!(out.acknowledge, vec![NotificationId(1)]);
        assert_eq!(out.rewards.len(), 2);
        assert_eq!(
            out.rewards[0].event,
            RewardEvent::Xp {
                amount: 50,
                source: Some("Laundry".into())
            }
        );
        assert_eq!(out.rewards[0].requested_delay, Duration::ZERO);
        assert_eq!(
            out.rewards[1].event,
            RewardEvent::Coins {
                amount: 10,
                source: Some("Task completed!".into())
            }
        );
        assert_eq!(out.rewards[1].requested_delay, Duration::from_millis(800));
        assert_ne!(out.rewards[0].id, out.rewards[1].id);
    }

    #[test]
    fn test_level_up_parses_number() {
        let c = classifier();
        let out = c.classify(&[record(2, "level_up", "Level up!", "You reached Level 7!")]);
        assert_eq!(out.rewards[0].event, RewardEvent::LevelUp { new_level: 7 });
    }

    #[test]
    fn test_level_up_defaults_without_digits() {
        let c = classifier();
        let out = c.classify(&[record(3, "level_up", "Level up!", "Congrats!")]);
        assert_eq!(out.rewards[0].event, RewardEvent::LevelUp { new_level: 2 });
    }

    #[test]
    fn test_level_up_falls_back_to_title() {
        let c = classifier();
        let out = c.classify(&[record(4, "level_up", "LEVEL 12 reached", "Keep going")]);
        assert_eq!(out.rewards[0].event, RewardEvent::LevelUp { new_level: 12 });
    }

    #[test]
    fn test_badge_and_weekly_discipline() {
        let c = classifier();
        let out = c.classify(&[
            record(5, "badge_earned", "Task Master", "Completed 3 tasks in one day"),
            record(6, "weekly_discipline", "Discipline Bunny", ""),
        ]);
        assert_eq!(
            out.rewards[0].event,
            RewardEvent::Badge {
                title: "Task Master".into(),
                description: Some("Completed 3 tasks in one day".into())
            }
        );
        assert_eq!(
            out.rewards[1].event,
            RewardEvent::Badge {
                title: "Discipline Bunny".into(),
                description: None
            }
        );
    }

    #[test]
    fn test_skips_read_and_ineligible() {
        let c = classifier();
        let mut read = record(7, "task_complete", "Dishes", "");
        read.is_read = true;
        let out = c.classify(&[read, record(8, "reminder_due", "Dentist", "")]);
        assert!(out.is_empty());
        assert!(out.rewards.is_empty());
        assert!(c.processed().is_empty());
    }

    #[test]
    fn test_same_id_across_polls_yields_once() {
        let c = classifier();
        let batch = [record(9, "badge_earned", "Productive Bunny", "")];
        assert_eq!(c.classify(&batch).rewards.len(), 1);
        assert!(c.classify(&batch).rewards.is_empty());
        assert!(c.classify(&batch).acknowledge.is_empty());
    }

    #[test]
    fn test_duplicate_within_one_batch() {
        let c = classifier();
        let out = c.classify(&[
            record(10, "level_up", "", "Level 3"),
            record(10, "level_up", "", "Level 3"),
        ]);
        assert_eq!(out.rewards.len(), 1);
    }

    #[test]
    fn test_preserves_server_order() {
        let c = classifier();
        let out = c.classify(&[
            record(20, "badge_earned", "B", ""),
            record(11, "level_up", "", "Level 5"),
        ]);
        assert_eq!(out.acknowledge, vec![NotificationId(20), NotificationId(11)]);
        assert_eq!(out.rewards[0].event.kind(), "badge");
        assert_eq!(out.rewards[1].event.kind(), "level_up");
    }
}
