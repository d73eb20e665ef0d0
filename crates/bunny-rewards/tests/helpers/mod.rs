//! Shared test helpers for session integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;

use bunny_core::config::AppConfig;
use bunny_core::error::AppError;
use bunny_core::result::AppResult;
use bunny_core::traits::{NotificationSource, RewardDataSource};
use bunny_core::types::{
    Expense, HobbySummary, NotificationId, NotificationRecord, Profile, RecommendationHint,
    ShoppingItem,
};
use bunny_rewards::RewardSession;
use bunny_rewards::presentation::{ChannelPresenter, PresentationUpdate, PresentedReward};

/// In-memory stand-in for the backend API.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub notifications: Mutex<Vec<NotificationRecord>>,
    pub marked_read: Mutex<Vec<NotificationId>>,
    pub mark_all_calls: Mutex<usize>,
    pub profile: Mutex<Profile>,
    pub expenses: Mutex<Vec<Expense>>,
    pub shopping_items: Mutex<Vec<ShoppingItem>>,
    pub hobbies: Mutex<Vec<HobbySummary>>,
    pub hint: Mutex<Option<RecommendationHint>>,
    pub offline: Mutex<bool>,
}

impl FakeApi {
    pub fn push_notification(&self, id: i64, kind: &str, title: &str, message: &str) {
        self.notifications.lock().unwrap().push(NotificationRecord {
            id: NotificationId(id),
            kind: kind.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            created_at: Utc::now(),
            is_read: false,
        });
    }

    pub fn set_profile(&self, coins: i64, salary: Option<f64>) {
        *self.profile.lock().unwrap() = Profile {
            coins,
            salary_amount: salary,
            ..Default::default()
        };
    }

    pub fn set_level(&self, level: i64) {
        self.profile.lock().unwrap().level = level;
    }

    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    pub fn marked_read(&self) -> Vec<NotificationId> {
        self.marked_read.lock().unwrap().clone()
    }

    fn check_online(&self) -> AppResult<()> {
        if *self.offline.lock().unwrap() {
            return Err(AppError::external_service("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationSource for FakeApi {
    async fn fetch_notifications(&self) -> AppResult<Vec<NotificationRecord>> {
        self.check_online()?;
        Ok(self.notifications.lock().unwrap().clone())
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<()> {
        self.check_online()?;
        self.marked_read.lock().unwrap().push(id);
        Ok(())
    }

    async fn mark_all_read(&self) -> AppResult<()> {
        self.check_online()?;
        *self.mark_all_calls.lock().unwrap() += 1;
        Ok(())
    }
}

#[async_trait]
impl RewardDataSource for FakeApi {
    async fn fetch_profile(&self) -> AppResult<Profile> {
        self.check_online()?;
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn fetch_expenses(&self) -> AppResult<Vec<Expense>> {
        self.check_online()?;
        Ok(self.expenses.lock().unwrap().clone())
    }

    async fn fetch_shopping_items(&self) -> AppResult<Vec<ShoppingItem>> {
        self.check_online()?;
        Ok(self.shopping_items.lock().unwrap().clone())
    }

    async fn fetch_hobbies(&self) -> AppResult<Vec<HobbySummary>> {
        self.check_online()?;
        Ok(self.hobbies.lock().unwrap().clone())
    }

    async fn fetch_recommendation_hint(&self) -> AppResult<RecommendationHint> {
        self.check_online()?;
        self.hint
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AppError::not_found("no recommendation"))
    }
}

/// A running session wired to a [`FakeApi`] and a channel presenter.
pub struct TestSession {
    pub session: RewardSession,
    pub api: Arc<FakeApi>,
    pub updates: mpsc::UnboundedReceiver<PresentationUpdate>,
}

impl TestSession {
    pub async fn new(api: Arc<FakeApi>) -> Self {
        Self::with_config(api, AppConfig::default()).await
    }

    pub async fn with_config(api: Arc<FakeApi>, config: AppConfig) -> Self {
        let (presenter, updates) = ChannelPresenter::new();
        let session = RewardSession::start(&config, api.clone(), api.clone(), Arc::new(presenter))
            .await
            .expect("Failed to start session");
        Self {
            session,
            api,
            updates,
        }
    }

    /// Wait for the next reward to be shown, skipping hide updates.
    pub async fn next_shown(&mut self) -> PresentedReward {
        loop {
            match self.updates.recv().await.expect("presenter channel closed") {
                PresentationUpdate::Shown(reward) => return reward,
                PresentationUpdate::Hidden { .. } => continue,
            }
        }
    }

    /// Let detached tasks (acknowledgements) run.
    pub async fn settle(&self) {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }
}
