//! Inbound data sources for the reward engine.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{
    Expense, HobbySummary, NotificationId, NotificationRecord, Profile, RecommendationHint,
    ShoppingItem,
};

/// Source of notification records for the signed-in user.
///
/// Acknowledgements are fire-and-forget from the engine's point of view:
/// their result is logged and otherwise ignored.
#[async_trait]
pub trait NotificationSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the current notification records, in server order.
    async fn fetch_notifications(&self) -> AppResult<Vec<NotificationRecord>>;

    /// Mark a single notification as read.
    async fn mark_read(&self, id: NotificationId) -> AppResult<()>;

    /// Mark every notification of the user as read.
    async fn mark_all_read(&self) -> AppResult<()>;
}

/// Source of the profile, budget and hobby data used by recommendations.
#[async_trait]
pub trait RewardDataSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the user's profile snapshot.
    async fn fetch_profile(&self) -> AppResult<Profile>;

    /// Fetch all recorded expenses.
    async fn fetch_expenses(&self) -> AppResult<Vec<Expense>>;

    /// Fetch the shopping list.
    async fn fetch_shopping_items(&self) -> AppResult<Vec<ShoppingItem>>;

    /// Fetch the user's hobby catalogue.
    async fn fetch_hobbies(&self) -> AppResult<Vec<HobbySummary>>;

    /// Fetch the server's reward recommendation hint.
    async fn fetch_recommendation_hint(&self) -> AppResult<RecommendationHint>;
}
