//! Reward scheduler: one owned task that serializes presentations.
//!
//! The loop owns the whole queue and exactly one timer (the next deadline),
//! so promotion has a single authority. Callers talk to it through a
//! cloneable [`SchedulerHandle`].

use std::collections::VecDeque;
use std::future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing;

use bunny_core::config::SchedulerConfig;
use bunny_core::error::AppError;
use bunny_core::result::AppResult;
use bunny_core::types::RewardId;

use crate::event::RewardEvent;
use crate::presentation::contract::{DismissReason, PresentedReward, RewardPresenter};

use super::state::{PresentationState, QueueSnapshot, ScheduledReward};

/// Eligibility horizon for delays too large to represent as an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Requests accepted by the scheduler loop.
#[derive(Debug)]
enum Command {
    /// Append a reward; acked once the queue snapshot reflects it
    Enqueue(ScheduledReward, oneshot::Sender<()>),
    /// The presenter dismissed a reward
    Close(RewardId),
}

/// A waiting entry with its eligibility instant.
#[derive(Debug)]
struct Waiting {
    reward: ScheduledReward,
    eligible_at: Instant,
}

/// Cloneable handle for enqueueing, closing, and observing rewards.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    tx: mpsc::Sender<Command>,
    snapshot: watch::Receiver<QueueSnapshot>,
    cancel: CancellationToken,
}

impl SchedulerHandle {
    /// Queue an already scheduled reward.
    pub async fn enqueue(&self, reward: ScheduledReward) -> AppResult<RewardId> {
        let id = reward.id;
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(Command::Enqueue(reward, ack_tx))
            .await
            .map_err(|_| AppError::service_unavailable("Reward scheduler has stopped"))?;
        ack_rx
            .await
            .map_err(|_| AppError::service_unavailable("Reward scheduler has stopped"))?;
        Ok(id)
    }

    /// Request a reward presentation after `delay`.
    pub async fn show_reward(
        &self,
        event: RewardEvent,
        delay: Duration,
    ) -> AppResult<RewardId> {
        self.enqueue(ScheduledReward::delayed(event, delay)).await
    }

    /// Report that the presenter dismissed a reward.
    ///
    /// Ignored unless `id` is the reward currently showing.
    pub async fn close(&self, id: RewardId) -> AppResult<()> {
        self.tx
            .send(Command::Close(id))
            .await
            .map_err(|_| AppError::service_unavailable("Reward scheduler has stopped"))
    }

    /// Stop the loop. The reward showing is hidden and waiting ones are dropped.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the loop was told to stop.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Current queue state.
    pub fn snapshot(&self) -> QueueSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Wait until nothing is showing and nothing is waiting.
    ///
    /// Returns immediately if the scheduler has stopped.
    pub async fn wait_until_drained(&self) {
        let mut rx = self.snapshot.clone();
        let _ = rx.wait_for(QueueSnapshot::is_drained).await;
    }
}

/// The scheduler loop state.
pub struct RewardScheduler {
    /// Command inbox
    rx: mpsc::Receiver<Command>,
    /// Where rewards are shown
    presenter: Arc<dyn RewardPresenter>,
    /// Pause between a close and the next promotion
    settle_gap: Duration,
    /// Entries not yet shown, in enqueue order
    waiting: VecDeque<Waiting>,
    /// Presentation slot
    state: PresentationState,
    /// Auto-dismiss deadline of the reward showing
    dismiss_at: Option<Instant>,
    /// No promotion before this instant
    settle_until: Option<Instant>,
    /// Count of presentations so far
    presented: u64,
    /// Published snapshots
    snapshot_tx: watch::Sender<QueueSnapshot>,
}

impl std::fmt::Debug for RewardScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewardScheduler")
            .field("waiting", &self.waiting.len())
            .field("state", &self.state)
            .finish()
    }
}

impl RewardScheduler {
    /// Spawn the scheduler loop. It runs until `cancel` fires or every
    /// handle is dropped.
    pub fn spawn(
        config: &SchedulerConfig,
        presenter: Arc<dyn RewardPresenter>,
        cancel: CancellationToken,
    ) -> (SchedulerHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(config.command_buffer.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(QueueSnapshot::default());

        let scheduler = Self {
            rx,
            presenter,
            settle_gap: Duration::from_millis(config.settle_gap_ms),
            waiting: VecDeque::new(),
            state: PresentationState::Idle,
            dismiss_at: None,
            settle_until: None,
            presented: 0,
            snapshot_tx,
        };

        let task = tokio::spawn(scheduler.run(cancel.clone()));
        let handle = SchedulerHandle {
            tx,
            snapshot: snapshot_rx,
            cancel,
        };
        (handle, task)
    }

    async fn run(mut self, cancel: CancellationToken) {
        tracing::debug!(
            "Reward scheduler started (settle_gap={}ms)",
            self.settle_gap.as_millis()
        );

        loop {
            self.try_promote().await;
            self.publish();

            let deadline = self.next_deadline();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                cmd = self.rx.recv() => match cmd {
                    Some(cmd) => self.handle(cmd).await,
                    None => break,
                },
                _ = sleep_until(deadline) => self.on_deadline().await,
            }
        }

        self.shutdown().await;
    }

    async fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Enqueue(reward, ack) => {
                tracing::debug!(
                    "Enqueued reward {} ({}, delay={}ms)",
                    reward.id,
                    reward.event.kind(),
                    reward.requested_delay.as_millis()
                );
                let eligible_at = eligible_at(Instant::now(), reward.requested_delay);
                self.waiting.push_back(Waiting {
                    reward,
                    eligible_at,
                });
                self.publish();
                let _ = ack.send(());
            }
            Command::Close(id) => {
                if self.state.showing_id() == Some(id) {
                    self.close_current(DismissReason::Manual).await;
                } else {
                    tracing::trace!("Ignoring close for reward {} (not showing)", id);
                }
            }
        }
    }

    async fn on_deadline(&mut self) {
        if self.dismiss_at.is_some_and(|at| Instant::now() >= at) {
            self.close_current(DismissReason::Timeout).await;
        }
    }

    /// Show the earliest-enqueued eligible entry if the slot is free.
    async fn try_promote(&mut self) {
        if !matches!(self.state, PresentationState::Idle) {
            return;
        }

        let now = Instant::now();
        if self.settle_until.is_some_and(|until| now < until) {
            return;
        }

        let Some(pos) = self.waiting.iter().position(|w| w.eligible_at <= now) else {
            return;
        };
        let Some(next) = self.waiting.remove(pos) else {
            return;
        };

        let reward = PresentedReward::new(next.reward.id, next.reward.event);
        self.dismiss_at = Some(now + reward.dismiss_after);
        self.settle_until = None;
        self.presented += 1;
        self.state = PresentationState::Showing(reward.clone());

        tracing::info!(
            "Showing reward {} ({}), {} waiting",
            reward.id,
            reward.event.kind(),
            self.waiting.len()
        );
        self.presenter.show(&reward).await;
    }

    async fn close_current(&mut self, reason: DismissReason) {
        let PresentationState::Showing(reward) = std::mem::take(&mut self.state) else {
            return;
        };
        self.dismiss_at = None;
        self.settle_until = Some(Instant::now() + self.settle_gap);

        tracing::debug!("Closed reward {} ({})", reward.id, reason.as_str());
        self.presenter.hide(reward.id, reason).await;
    }

    /// The one instant the loop needs to wake at, if any.
    fn next_deadline(&self) -> Option<Instant> {
        if let Some(dismiss_at) = self.dismiss_at {
            return Some(dismiss_at);
        }

        let earliest = self.waiting.iter().map(|w| w.eligible_at).min()?;
        Some(match self.settle_until {
            Some(until) => earliest.max(until),
            None => earliest,
        })
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(QueueSnapshot {
            state: self.state.clone(),
            waiting: self.waiting.iter().map(|w| w.reward.clone()).collect(),
            presented: self.presented,
        });
    }

    async fn shutdown(&mut self) {
        if !self.waiting.is_empty() {
            tracing::info!(
                "Reward scheduler stopping, dropping {} waiting rewards",
                self.waiting.len()
            );
            self.waiting.clear();
        }
        if let PresentationState::Showing(reward) = std::mem::take(&mut self.state) {
            self.presenter.hide(reward.id, DismissReason::Stopped).await;
        }
        self.dismiss_at = None;
        self.publish();
        tracing::debug!("Reward scheduler stopped");
    }
}

/// `now + delay`, clamped so oversized delays park the entry instead of overflowing.
fn eligible_at(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay)
        .unwrap_or_else(|| now + FAR_FUTURE)
        .min(now + FAR_FUTURE)
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending::<()>().await,
    }
}
