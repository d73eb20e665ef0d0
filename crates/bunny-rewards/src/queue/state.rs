//! Queue entries and presentation state.

use std::time::Duration;

use bunny_core::types::RewardId;

use crate::event::RewardEvent;
use crate::presentation::contract::PresentedReward;

/// A reward waiting in the presentation queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReward {
    /// Identifier handed to the presenter
    pub id: RewardId,
    /// What to show
    pub event: RewardEvent,
    /// Minimum time between enqueue and presentation
    pub requested_delay: Duration,
}

impl ScheduledReward {
    /// Schedule an event for immediate presentation.
    pub fn immediate(event: RewardEvent) -> Self {
        Self::delayed(event, Duration::ZERO)
    }

    /// Schedule an event that becomes eligible after `delay`.
    pub fn delayed(event: RewardEvent, delay: Duration) -> Self {
        Self {
            id: RewardId::new(),
            event,
            requested_delay: delay,
        }
    }
}

/// What the presentation slot currently holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PresentationState {
    /// Nothing on screen
    #[default]
    Idle,
    /// One reward on screen
    Showing(PresentedReward),
}

impl PresentationState {
    /// Id of the reward on screen, if any.
    pub fn showing_id(&self) -> Option<RewardId> {
        match self {
            Self::Idle => None,
            Self::Showing(reward) => Some(reward.id),
        }
    }
}

/// Point-in-time view of the queue, published after every transition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueueSnapshot {
    /// Presentation slot
    pub state: PresentationState,
    /// Entries not yet shown, in enqueue order
    pub waiting: Vec<ScheduledReward>,
    /// Total rewards presented since the scheduler started
    pub presented: u64,
}

impl QueueSnapshot {
    /// Nothing showing and nothing waiting.
    pub fn is_drained(&self) -> bool {
        matches!(self.state, PresentationState::Idle) && self.waiting.is_empty()
    }
}
