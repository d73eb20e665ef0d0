//! # bunny-client
//!
//! Thin `reqwest` adapter over the BunnySteps REST API. Implements the
//! [`NotificationSource`](bunny_core::traits::NotificationSource) and
//! [`RewardDataSource`](bunny_core::traits::RewardDataSource) traits so the
//! reward engine never depends on the transport directly.

pub mod api;

pub use api::ApiClient;
