//! # bunny-core
//!
//! Core crate for Bunny Rewards. Contains the configuration schema,
//! typed identifiers, the records exchanged with the BunnySteps API,
//! the collaborator traits the reward engine consumes, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Bunny crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
