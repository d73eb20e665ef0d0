//! Notification polling, reward classification, deduplication, and
//! persistence of the processed-id set.

pub mod classifier;
pub mod dedup;
pub mod kind;
pub mod persistence;
pub mod poller;

pub use classifier::{Classification, RewardClassifier};
pub use dedup::ProcessedIds;
pub use kind::NotificationKind;
pub use poller::NotificationPoller;
