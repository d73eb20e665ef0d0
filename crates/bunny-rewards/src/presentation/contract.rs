//! Presenter trait and the values passed across it.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use bunny_core::types::RewardId;

use crate::event::RewardEvent;

/// Why a reward left the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// The presenter reported a user dismissal
    Manual,
    /// The auto-dismiss timer elapsed
    Timeout,
    /// The owning session stopped
    Stopped,
}

impl DismissReason {
    /// Convert to string
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Timeout => "timeout",
            Self::Stopped => "stopped",
        }
    }
}

/// A reward currently handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedReward {
    /// Pass back to `SchedulerHandle::close` on manual dismissal
    pub id: RewardId,
    /// What to render
    pub event: RewardEvent,
    /// When the queue will dismiss it on its own
    pub dismiss_after: Duration,
}

impl PresentedReward {
    /// Build from an event, using the event's auto-dismiss duration.
    pub fn new(id: RewardId, event: RewardEvent) -> Self {
        let dismiss_after = event.dismiss_after();
        Self {
            id,
            event,
            dismiss_after,
        }
    }

    /// Headline shown to the user.
    pub fn title(&self) -> String {
        self.event.title()
    }

    /// Secondary line, if any.
    pub fn subtitle(&self) -> Option<&str> {
        self.event.subtitle()
    }
}

/// Renders rewards on behalf of the queue.
///
/// The queue calls `show` when a reward takes the slot and `hide` when it
/// leaves. Implementations must return promptly and must not await the
/// scheduler from inside these calls; report manual dismissals through
/// `SchedulerHandle::close` from the UI side instead.
#[async_trait]
pub trait RewardPresenter: Send + Sync + std::fmt::Debug + 'static {
    /// A reward took the presentation slot.
    async fn show(&self, reward: &PresentedReward);

    /// The reward left the slot.
    async fn hide(&self, id: RewardId, reason: DismissReason);
}
