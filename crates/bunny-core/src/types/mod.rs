//! Records exchanged with the BunnySteps API.

pub mod amount;
pub mod hobby;
pub mod id;
pub mod notification;
pub mod profile;
pub mod shopping;

pub use hobby::{HobbySummary, RecommendationHint};
pub use id::{NotificationId, RewardId};
pub use notification::NotificationRecord;
pub use profile::Profile;
pub use shopping::{Expense, ItemType, ShoppingItem, ShoppingPriority};
