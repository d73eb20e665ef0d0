//! Session-scoped reward engine that ties together all subsystems.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing;

use bunny_core::config::AppConfig;
use bunny_core::result::AppResult;
use bunny_core::traits::{NotificationSource, RewardDataSource};
use bunny_core::types::{RecommendationHint, RewardId};

use crate::event::RewardEvent;
use crate::notification::classifier::RewardClassifier;
use crate::notification::dedup::ProcessedIds;
use crate::notification::persistence::ProcessedIdStore;
use crate::notification::poller::NotificationPoller;
use crate::presentation::contract::RewardPresenter;
use crate::queue::scheduler::{RewardScheduler, SchedulerHandle};
use crate::recommendation::engine::{Recommendation, RecommendationEngine, RecommendationInput};
use crate::recommendation::formatter::{MILESTONE_FALLBACK_MESSAGE, SMART_REWARD_NAME};

/// Shared state reachable from the background loops.
#[derive(Debug)]
struct SessionInner {
    /// Fail-soft notification fetcher
    poller: NotificationPoller,
    /// Notification to reward conversion
    classifier: RewardClassifier,
    /// Optional on-disk processed-id mirror
    store: Option<ProcessedIdStore>,
    /// Presentation queue
    scheduler: SchedulerHandle,
    /// Budget policy
    engine: RecommendationEngine,
    /// Profile, budget, and hobby data
    data: Arc<dyn RewardDataSource>,
    /// Milestone re-check period, if any
    milestone_interval: Option<Duration>,
    /// Level from the last profile fetch; 0 until the first one
    last_level: AtomicI64,
}

/// One user's reward dispatch session.
///
/// Constructed once per signed-in session and passed by reference to
/// whichever layer needs to enqueue or observe rewards.
#[derive(Debug)]
pub struct RewardSession {
    inner: Arc<SessionInner>,
    /// Stops the scheduler and the background loops
    cancel: CancellationToken,
    /// Scheduler and loop tasks, joined on stop
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl RewardSession {
    /// Build the session and start its scheduler.
    ///
    /// Fails only when a configured processed-id state file cannot be read.
    pub async fn start(
        config: &AppConfig,
        notifications: Arc<dyn NotificationSource>,
        data: Arc<dyn RewardDataSource>,
        presenter: Arc<dyn RewardPresenter>,
    ) -> AppResult<Self> {
        let store = config
            .notifications
            .processed_state_file
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(ProcessedIdStore::new);

        let processed = match &store {
            Some(store) => store.load().await?,
            None => ProcessedIds::new(),
        };

        let cancel = CancellationToken::new();
        let (scheduler, scheduler_task) =
            RewardScheduler::spawn(&config.scheduler, presenter, cancel.child_token());

        let inner = SessionInner {
            poller: NotificationPoller::new(
                notifications,
                Duration::from_secs(config.notifications.poll_interval_seconds),
            ),
            classifier: RewardClassifier::new(Arc::new(processed)),
            store,
            scheduler,
            engine: RecommendationEngine::new(config.recommendation.clone()),
            data,
            milestone_interval: config
                .recommendation
                .milestone_check_interval_seconds
                .filter(|s| *s > 0)
                .map(Duration::from_secs),
            last_level: AtomicI64::new(0),
        };

        tracing::info!(
            "Reward session started (poll_interval={}s, persisted_dedup={})",
            config.notifications.poll_interval_seconds,
            inner.store.is_some()
        );

        Ok(Self {
            inner: Arc::new(inner),
            cancel,
            tasks: Mutex::new(vec![scheduler_task]),
        })
    }

    /// Start the notification poll loop and the milestone check.
    ///
    /// The poll loop runs once immediately and then on the poll interval.
    /// The milestone check runs once, then on its interval when configured.
    pub fn spawn_background(&self) {
        let poll_task = {
            let inner = Arc::clone(&self.inner);
            let cancel = self.cancel.clone();
            tokio::spawn(async move { inner.poll_loop(cancel).await })
        };

        let milestone_task = {
            let inner = Arc::clone(&self.inner);
            let cancel = self.cancel.clone();
            tokio::spawn(async move { inner.milestone_loop(cancel).await })
        };

        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.push(poll_task);
        tasks.push(milestone_task);
    }

    /// Poll, classify, acknowledge, and enqueue once.
    ///
    /// Returns the number of rewards enqueued.
    pub async fn poll_now(&self) -> usize {
        self.inner.poll_once().await
    }

    /// Run the coin milestone check against a freshly fetched profile.
    ///
    /// A level higher than the one seen on the previous fetch enqueues a
    /// level-up reward first. Enqueues the smart reward and returns the
    /// recommendation when the milestone is reached.
    pub async fn check_milestone(&self) -> Option<Recommendation> {
        self.inner.check_milestone().await
    }

    /// Request a reward presentation, e.g. for an action confirmed locally.
    pub async fn show_reward(&self, event: RewardEvent, delay: Duration) -> AppResult<RewardId> {
        self.inner.scheduler.show_reward(event, delay).await
    }

    /// Handle to the presentation queue.
    pub fn scheduler(&self) -> &SchedulerHandle {
        &self.inner.scheduler
    }

    /// Mark every notification read on the backend. Fire-and-forget.
    pub fn mark_all_read(&self) {
        self.inner.poller.acknowledge_all();
    }

    /// Number of notification ids that already produced rewards.
    pub fn processed_count(&self) -> usize {
        self.inner.classifier.processed().len()
    }

    /// Whether `stop` was called.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop the loops and the scheduler, dropping pending rewards.
    ///
    /// Safe to call more than once.
    pub async fn stop(&self) {
        if !self.cancel.is_cancelled() {
            tracing::info!("Stopping reward session");
        }
        self.cancel.cancel();

        let tasks: Vec<JoinHandle<()>> = {
            let mut guard = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
            guard.drain(..).collect()
        };

        for task in tasks {
            if let Err(e) = task.await {
                tracing::warn!("Reward session task ended abnormally: {}", e);
            }
        }
    }
}

impl SessionInner {
    async fn poll_loop(&self, cancel: CancellationToken) {
        let mut ticker = time::interval(self.poller.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
            }
        }

        tracing::debug!("Notification poll loop stopped");
    }

    async fn milestone_loop(&self, cancel: CancellationToken) {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = self.check_milestone() => {}
        }

        let Some(period) = self.milestone_interval else {
            return;
        };

        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.check_milestone().await;
                }
            }
        }
    }

    async fn poll_once(&self) -> usize {
        let records = self.poller.poll().await;
        if records.is_empty() {
            return 0;
        }

        let classification = self.classifier.classify(&records);
        if classification.is_empty() {
            return 0;
        }

        for id in &classification.acknowledge {
            self.poller.acknowledge(*id);
        }
        self.persist_processed().await;

        let mut enqueued = 0;
        for reward in classification.rewards {
            match self.scheduler.enqueue(reward).await {
                Ok(_) => enqueued += 1,
                Err(e) => {
                    tracing::warn!("Dropping reward, scheduler unavailable: {}", e);
                    break;
                }
            }
        }

        tracing::debug!(
            "Poll claimed {} notifications, enqueued {} rewards",
            classification.acknowledge.len(),
            enqueued
        );
        enqueued
    }

    async fn persist_processed(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save(self.classifier.processed()).await {
            tracing::warn!(
                "Failed to persist processed ids to '{}': {}",
                store.path().display(),
                e
            );
        }
    }

    /// Celebrate a level increase seen between two profile fetches.
    ///
    /// The first fetch only seeds the level.
    async fn track_level(&self, level: i64) {
        let previous = self.last_level.swap(level, Ordering::SeqCst);
        if previous == 0 || level <= previous {
            return;
        }

        tracing::info!("Profile level rose from {} to {}", previous, level);
        let event = RewardEvent::LevelUp { new_level: level };
        if let Err(e) = self.scheduler.show_reward(event, Duration::ZERO).await {
            tracing::warn!("Could not enqueue level-up reward: {}", e);
        }
    }

    async fn check_milestone(&self) -> Option<Recommendation> {
        let profile = match self.data.fetch_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Profile fetch failed, skipping milestone check: {}", e);
                return None;
            }
        };

        self.track_level(profile.level).await;

        if !self.engine.is_triggered(&profile) {
            tracing::debug!(
                "No reward milestone (coins={}, threshold={})",
                profile.coins,
                self.engine.config().coin_threshold
            );
            return None;
        }

        let (expenses, shopping_items, hint) = tokio::join!(
            self.data.fetch_expenses(),
            self.data.fetch_shopping_items(),
            self.data.fetch_recommendation_hint(),
        );

        let expenses = expenses.unwrap_or_else(|e| {
            tracing::warn!("Expense fetch failed, assuming none: {}", e);
            Vec::new()
        });
        let shopping_items = shopping_items.unwrap_or_else(|e| {
            tracing::warn!("Shopping list fetch failed, assuming empty: {}", e);
            Vec::new()
        });
        let hint = hint.unwrap_or_else(|e| {
            tracing::warn!("Recommendation hint unavailable: {}", e);
            RecommendationHint::default()
        });

        tracing::debug!(
            "Milestone reached: {}",
            hint.message.as_deref().unwrap_or(MILESTONE_FALLBACK_MESSAGE)
        );

        let mut hobbies = hint.relax_with;
        if hobbies.is_empty() && self.engine.config().hobby_fallback_to_catalog {
            hobbies = self.data.fetch_hobbies().await.unwrap_or_else(|e| {
                tracing::warn!("Hobby fetch failed: {}", e);
                Vec::new()
            });
        }

        let recommendation = self.engine.recommend(&RecommendationInput {
            salary: profile.salary_amount,
            expenses,
            shopping_items,
            hobbies,
        });

        let event = RewardEvent::Custom {
            name: SMART_REWARD_NAME.to_string(),
            description: Some(recommendation.message.clone()),
        };
        if let Err(e) = self.scheduler.show_reward(event, Duration::ZERO).await {
            tracing::warn!("Could not enqueue milestone reward: {}", e);
        }

        tracing::info!(
            "Milestone recommendation: {} treats, {} hobbies",
            recommendation.treat_items.len(),
            recommendation.relax_items.len()
        );
        Some(recommendation)
    }
}
