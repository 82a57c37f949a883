//! Error types for the Crece engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Not enough coins: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("Reward already claimed")]
    AlreadyClaimed,

    #[error("Objective not yet earned: requires {required} points, have {current}")]
    NotYetEarned { required: u32, current: u32 },

    #[error("Chest is still locked")]
    ChestLocked,

    #[error("A spin is already in progress")]
    SpinInFlight,

    #[error("Spin ticket does not match the open chest")]
    StaleTicket,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
