//! Collaborator traits consumed by the reward engine and implemented by
//! the API client (or by in-memory fakes in tests).

pub mod source;

pub use source::{NotificationSource, RewardDataSource};
