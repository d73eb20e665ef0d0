//! Budget-constrained reward recommendations for coin milestones.

pub mod budget;
pub mod engine;
pub mod formatter;

pub use budget::BudgetSnapshot;
pub use engine::{Recommendation, RecommendationEngine, RecommendationInput};
pub use formatter::{MILESTONE_FALLBACK_MESSAGE, SMART_REWARD_NAME};
