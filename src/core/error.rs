use thiserror::Error;

use crate::colony::Resource;
use crate::core::types::{ColonyId, OfferId};

/// Why an action entry point refused to run.
///
/// Every variant is a recoverable outcome: the entry point has not mutated
/// anything when it returns one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Not enough action points: need {required}, have {available}")]
    InsufficientActionPoints { required: u32, available: u32 },

    #[error("Not enough {resource}: need {required}")]
    InsufficientResource { resource: Resource, required: u32 },

    #[error("Not enough population: {0}")]
    InsufficientPopulation(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Target is under protection: {0}")]
    ProtectedTarget(ColonyId),

    #[error("Workers are on strike for {turns} more turn(s)")]
    LockedByStrike { turns: u32 },

    #[error("Colony has been destroyed: {0}")]
    AlreadyDestroyed(ColonyId),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("No turns left in the quota; next turn in {next_regen_seconds}s")]
    TurnQuotaExhausted { next_regen_seconds: u64 },

    #[error("Unknown colony: {0}")]
    UnknownColony(ColonyId),
}

/// Failures of the turn pipeline or the store around it
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown colony: {0}")]
    UnknownColony(ColonyId),

    #[error("Colony has been destroyed: {0}")]
    Destroyed(ColonyId),

    #[error("Invariant violated for {colony}: {detail}")]
    InvariantViolated { colony: ColonyId, detail: String },

    #[error("Action rejected: {0}")]
    Action(#[from] ActionError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration loading and validation failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failures of the two-party resource exchange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Offer not found: {0:?}")]
    UnknownOffer(OfferId),

    #[error("Offer {0:?} is not open")]
    NotOpen(OfferId),

    #[error("Offer cannot be accepted: {0}")]
    Rejected(String),

    #[error(transparent)]
    Action(#[from] ActionError),
}

pub type Result<T> = std::result::Result<T, SimError>;
