//! Presenter that only logs, for headless runs.

use async_trait::async_trait;
use tracing;

use bunny_core::types::RewardId;

use super::contract::{DismissReason, PresentedReward, RewardPresenter};

/// Writes every transition to the tracing subscriber.
#[derive(Debug, Clone, Default)]
pub struct LoggingPresenter;

#[async_trait]
impl RewardPresenter for LoggingPresenter {
    async fn show(&self, reward: &PresentedReward) {
        tracing::info!(
            reward_id = %reward.id,
            kind = reward.event.kind(),
            dismiss_after_ms = reward.dismiss_after.as_millis() as u64,
            "Reward: {}{}",
            reward.title(),
            reward
                .subtitle()
                .map(|s| format!(" ({s})"))
                .unwrap_or_default()
        );
    }

    async fn hide(&self, id: RewardId, reason: DismissReason) {
        tracing::debug!(reward_id = %id, reason = reason.as_str(), "Reward dismissed");
    }
}
