//! Presenter that forwards queue transitions over a channel.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing;

use bunny_core::types::RewardId;

use super::contract::{DismissReason, PresentedReward, RewardPresenter};

/// A transition of the presentation slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationUpdate {
    /// A reward is now visible
    Shown(PresentedReward),
    /// A reward was removed
    Hidden {
        /// Which reward
        id: RewardId,
        /// Why it left
        reason: DismissReason,
    },
}

/// Forwards every transition to an unbounded receiver, so the queue never
/// waits on the consumer.
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    tx: mpsc::UnboundedSender<PresentationUpdate>,
}

impl ChannelPresenter {
    /// Create a presenter and the receiver a host UI reads from.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PresentationUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, update: PresentationUpdate) {
        if self.tx.send(update).is_err() {
            tracing::trace!("Presentation receiver dropped; update discarded");
        }
    }
}

#[async_trait]
impl RewardPresenter for ChannelPresenter {
    async fn show(&self, reward: &PresentedReward) {
        self.forward(PresentationUpdate::Shown(reward.clone()));
    }

    async fn hide(&self, id: RewardId, reason: DismissReason) {
        self.forward(PresentationUpdate::Hidden { id, reason });
    }
}
