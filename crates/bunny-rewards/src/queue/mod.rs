//! Single-slot reward presentation queue.

pub mod scheduler;
pub mod state;

pub use scheduler::{RewardScheduler, SchedulerHandle};
pub use state::{PresentationState, QueueSnapshot, ScheduledReward};
