//! Closed set of NPC personalities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ActionError;
use crate::npc::strategies::{self, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Personality {
    /// Raids at random, trains guards
    Aggressive,
    /// Walls, guards, a home guard posture
    Defensive,
    /// Gathers and breeds
    Peaceful,
    /// Only raids colonies clearly weaker than itself, with a small force
    Cunning,
    /// Raids twice a turn if it can
    Berserk,
}

static AGGRESSIVE: [Strategy; 4] = [
    strategies::GATHER,
    strategies::ATTACK,
    strategies::TRAIN,
    strategies::BUILD_WALL,
];
static DEFENSIVE: [Strategy; 4] = [
    strategies::BUILD_WALL,
    strategies::TRAIN,
    strategies::GATHER,
    strategies::DEFEND,
];
static PEACEFUL: [Strategy; 4] = [
    strategies::GATHER,
    strategies::BIRTH,
    strategies::BUILD_SHELTER,
    strategies::CULL_IF_NEEDED,
];
static CUNNING: [Strategy; 4] = [
    strategies::GATHER,
    strategies::CUNNING_ATTACK,
    strategies::BUILD_WALL,
    strategies::TRAIN,
];
static BERSERK: [Strategy; 4] = [
    strategies::ATTACK,
    strategies::ATTACK,
    strategies::CULL_IF_NEEDED,
    strategies::GATHER,
];

impl Personality {
    pub const ALL: [Personality; 5] = [
        Personality::Aggressive,
        Personality::Defensive,
        Personality::Peaceful,
        Personality::Cunning,
        Personality::Berserk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Personality::Aggressive => "aggressive",
            Personality::Defensive => "defensive",
            Personality::Peaceful => "peaceful",
            Personality::Cunning => "cunning",
            Personality::Berserk => "berserk",
        }
    }

    /// Candidate actions in the order they are tried each turn
    pub fn strategies(&self) -> &'static [Strategy] {
        match self {
            Personality::Aggressive => &AGGRESSIVE,
            Personality::Defensive => &DEFENSIVE,
            Personality::Peaceful => &PEACEFUL,
            Personality::Cunning => &CUNNING,
            Personality::Berserk => &BERSERK,
        }
    }

    /// Raids pick any eligible target instead of weak ones only
    pub fn is_warlike(&self) -> bool {
        matches!(self, Personality::Aggressive | Personality::Berserk)
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Personality {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Personality::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| ActionError::InvalidSelection(format!("unknown personality '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_personality_has_strategies() {
        for p in Personality::ALL {
            assert!(!p.strategies().is_empty(), "{} has no strategies", p);
        }
    }

    #[test]
    fn test_strategy_order() {
        let names: Vec<_> = Personality::Berserk.strategies().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["attack", "attack", "cull_if_needed", "gather"]);

        let names: Vec<_> = Personality::Defensive.strategies().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["build_wall", "train", "gather", "defend"]);
    }

    #[test]
    fn test_parse_round_trip() {
        for p in Personality::ALL {
            assert_eq!(p.name().parse::<Personality>(), Ok(p));
        }
        assert!("timid".parse::<Personality>().is_err());
    }
}
