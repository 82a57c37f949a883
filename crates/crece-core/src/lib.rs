//! Reward and progression engine for the Crece learning platform.
//!
//! The engine owns the rules that tie quiz scores, chest unlocks, wheel
//! prizes, score milestones and the coin economy together on top of one
//! persisted per-user ledger. Rendering, animation and timing live outside;
//! the engine is driven entirely by explicit calls.

pub mod account;
pub mod assistant;
pub mod career;
pub mod catalog;
pub mod config;
pub mod economy;
pub mod error;
pub mod ledger;
pub mod objectives;
pub mod prize;
pub mod question_bank;
pub mod quiz;
pub mod store;

pub use error::{EngineError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
