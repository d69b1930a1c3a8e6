//! Immutable battle records

use serde::{Deserialize, Serialize};

use crate::core::types::{BattleId, ColonyId, Turn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Casualties {
    pub guards: u32,
    pub adults: u32,
    pub children: u32,
}

impl Casualties {
    pub fn total(&self) -> u32 {
        self.guards + self.adults + self.children
    }
}

/// What a victorious attacker carried off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loot {
    pub premium_food: u32,
    pub common_food: u32,
    pub material: u32,
    pub babies: u32,
    pub children: u32,
}

/// Force sent by the attacker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    pub guards: u32,
    pub adults: u32,
    pub boss_joins: bool,
}

/// One battle, written once and never changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleLog {
    pub id: BattleId,
    pub turn: Turn,
    pub attacker: ColonyId,
    pub defender: ColonyId,
    pub commitment: Commitment,
    pub attack_power: u32,
    pub defense_power: u32,
    pub power_ratio: f64,
    pub attacker_wins: bool,
    pub attacker_losses: Casualties,
    pub defender_losses: Casualties,
    pub loot: Loot,
    pub attacker_boss_damage: u32,
    pub defender_boss_damage: u32,
    pub attacker_destroyed: bool,
    pub defender_destroyed: bool,
}

impl BattleLog {
    pub fn involves(&self, colony: ColonyId) -> bool {
        self.attacker == colony || self.defender == colony
    }

    pub fn winner(&self) -> ColonyId {
        if self.attacker_wins {
            self.attacker
        } else {
            self.defender
        }
    }
}
