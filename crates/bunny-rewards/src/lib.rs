//! # bunny-rewards
//!
//! Reward dispatch engine for Bunny Rewards. Provides:
//!
//! - Notification polling with a fail-soft source adapter
//! - Reward classification with once-per-id deduplication
//! - A single-slot presentation queue with per-event auto-dismiss
//! - Budget-constrained treat/hobby recommendations on coin milestones
//! - The presenter contract driven by the queue

pub mod event;
pub mod notification;
pub mod presentation;
pub mod queue;
pub mod recommendation;
pub mod session;

pub use event::RewardEvent;
pub use notification::classifier::RewardClassifier;
pub use presentation::contract::{DismissReason, PresentedReward, RewardPresenter};
pub use queue::scheduler::{RewardScheduler, SchedulerHandle};
pub use recommendation::engine::{Recommendation, RecommendationEngine};
pub use session::RewardSession;
