//! Facilities and the colony's construction/training queues

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityKind {
    Shelter,
    BreedingPit,
    StoragePit,
    Wall,
    Watchtower,
}

impl FacilityKind {
    pub const ALL: [FacilityKind; 5] = [
        FacilityKind::Shelter,
        FacilityKind::BreedingPit,
        FacilityKind::StoragePit,
        FacilityKind::Wall,
        FacilityKind::Watchtower,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FacilityKind::Shelter => "shelter",
            FacilityKind::BreedingPit => "breeding_pit",
            FacilityKind::StoragePit => "storage_pit",
            FacilityKind::Wall => "wall",
            FacilityKind::Watchtower => "watchtower",
        }
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FacilityKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FacilityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| ActionError::InvalidSelection(format!("unknown facility '{}'", s)))
    }
}

/// A facility under construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildQueueEntry {
    pub kind: FacilityKind,
    pub remaining_turns: u32,
}

/// One adult in guard training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainQueueEntry {
    pub remaining_turns: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_parse() {
        assert_eq!("wall".parse::<FacilityKind>(), Ok(FacilityKind::Wall));
        assert_eq!("breeding_pit".parse::<FacilityKind>(), Ok(FacilityKind::BreedingPit));
        assert!(matches!(
            "castle".parse::<FacilityKind>(),
            Err(ActionError::InvalidSelection(_))
        ));
    }
}
