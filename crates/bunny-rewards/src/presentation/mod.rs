//! Contract between the reward queue and whatever renders rewards.

pub mod channel;
pub mod contract;
pub mod logging;

pub use channel::{ChannelPresenter, PresentationUpdate};
pub use contract::{DismissReason, PresentedReward, RewardPresenter};
pub use logging::LoggingPresenter;
