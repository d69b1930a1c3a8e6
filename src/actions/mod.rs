//! Action entry points
//!
//! The same surface serves players and the NPC decision engine. Every action
//! validates completely before it mutates anything, runs on a copy of the
//! colony inside a world transaction, and reports either the result data
//! with its messages or the reason it was refused.

pub mod gather;
pub mod military;
pub mod population;
pub mod works;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::colony::Colony;
use crate::core::config::GameConfig;
use crate::core::error::ActionError;
use crate::core::types::ColonyId;
use crate::world::Env;

pub use gather::GatherYield;
pub use military::{AttackReport, SpyDispatch};
pub use population::{BirthOutcome, CullResult, CullYield};

/// Every action a colony can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Gather,
    Cull,
    GiveBirth,
    Build,
    Train,
    Attack,
    CureDisease,
    DispatchSpy,
    SetDefensePosture,
}

impl ActionKind {
    pub const ALL: [ActionKind; 9] = [
        ActionKind::Gather,
        ActionKind::Cull,
        ActionKind::GiveBirth,
        ActionKind::Build,
        ActionKind::Train,
        ActionKind::Attack,
        ActionKind::CureDisease,
        ActionKind::DispatchSpy,
        ActionKind::SetDefensePosture,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Gather => "gather",
            ActionKind::Cull => "cull",
            ActionKind::GiveBirth => "give_birth",
            ActionKind::Build => "build",
            ActionKind::Train => "train",
            ActionKind::Attack => "attack",
            ActionKind::CureDisease => "cure_disease",
            ActionKind::DispatchSpy => "dispatch_spy",
            ActionKind::SetDefensePosture => "set_defense_posture",
        }
    }

    /// Action points the action spends
    pub fn ap_cost(&self, config: &GameConfig) -> u32 {
        match self {
            ActionKind::Cull | ActionKind::CureDisease => 0,
            ActionKind::GiveBirth => config.birth.action_points,
            ActionKind::Attack => config.combat.action_points,
            ActionKind::DispatchSpy => config.covert.action_points,
            ActionKind::Gather | ActionKind::Build | ActionKind::Train | ActionKind::SetDefensePosture => 1,
        }
    }

    /// Work the adults refuse while on strike
    pub fn blocked_by_strike(&self) -> bool {
        matches!(self, ActionKind::Gather | ActionKind::Build)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result data of a successful action plus the lines to show for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReport<T> {
    pub data: T,
    pub messages: Vec<String>,
}

impl<T> ActionReport<T> {
    pub fn new(data: T, messages: Vec<String>) -> Self {
        Self { data, messages }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionReport<U> {
        ActionReport {
            data: f(self.data),
            messages: self.messages,
        }
    }
}

pub type ActionResult<T> = Result<ActionReport<T>, ActionError>;

/// Refuse the action if the colony cannot pay for it right now
pub(crate) fn admit(colony: &Colony, kind: ActionKind, config: &GameConfig) -> Result<u32, ActionError> {
    let cost = kind.ap_cost(config);
    if colony.action_points < cost {
        return Err(ActionError::InsufficientActionPoints {
            required: cost,
            available: colony.action_points,
        });
    }
    if kind.blocked_by_strike() && colony.on_strike() {
        return Err(ActionError::LockedByStrike {
            turns: colony.strike_turns,
        });
    }
    Ok(cost)
}

/// Append a flavor line to `messages` if the table has one
pub(crate) fn say(env: &Env, colony: &Colony, key: &str, sub: Option<&str>, messages: &mut Vec<String>) {
    let line = env.flavor(colony, key, sub);
    if !line.is_empty() {
        messages.push(line);
    }
}

/// Trace a refused action. Refusals of dead or unknown colonies point at a
/// caller bug and are worth a warning.
pub(crate) fn traced<T>(id: ColonyId, kind: ActionKind, result: ActionResult<T>) -> ActionResult<T> {
    match &result {
        Ok(_) => debug!(colony = %id, action = %kind, "action done"),
        Err(e @ (ActionError::UnknownColony(_) | ActionError::AlreadyDestroyed(_))) => {
            warn!(colony = %id, action = %kind, "action refused: {}", e)
        }
        Err(e) => debug!(colony = %id, action = %kind, "action refused: {}", e),
    }
    result
}
