//! Protection mode
//!
//! A colony short of guards or adults can neither attack nor be attacked.
//! While protected it is topped back up to a survivable floor each time its
//! owner spends a turn.

use crate::colony::{Colony, Resource, Tier};
use crate::core::config::ProtectionConfig;
use crate::core::error::ActionError;
use crate::core::types::ColonyId;
use crate::events::EventKind;
use crate::world::World;

pub fn is_protected(colony: &Colony, p: &ProtectionConfig) -> bool {
    !colony.destroyed && (colony.guard < p.guard_min || colony.adult < p.adult_min)
}

/// Raise every floored field of a protected colony to its floor. Never lowers
/// a value; resources stop at their caps and adults and children stop at the
/// population cap. Returns whether anything changed.
pub fn refresh(colony: &mut Colony, p: &ProtectionConfig) -> bool {
    if !is_protected(colony, p) {
        return false;
    }
    let mut changed = false;

    for (tier, floor) in [(Tier::Adult, p.floor_adults), (Tier::Child, p.floor_children)] {
        let missing = floor.saturating_sub(colony.population(tier));
        let headroom = colony.population_cap.saturating_sub(colony.total_population());
        let added = missing.min(headroom);
        if added > 0 {
            colony.add_population(tier, added);
            changed = true;
        }
    }
    let babies = p.floor_babies.saturating_sub(colony.baby);
    if babies > 0 {
        colony.add_population(Tier::Baby, babies);
        changed = true;
    }

    for (resource, floor) in [
        (Resource::CommonFood, p.floor_common_food),
        (Resource::PremiumFood, p.floor_premium_food),
        (Resource::Material, p.floor_material),
    ] {
        let missing = floor.saturating_sub(colony.resource(resource));
        if missing > 0 && colony.add_resource(resource, missing) > 0 {
            changed = true;
        }
    }

    if colony.morale < p.floor_morale.min(100) {
        colony.morale = p.floor_morale.min(100);
        changed = true;
    }
    if colony.boss_health < p.floor_boss_health {
        colony.boss_health = p.floor_boss_health;
        changed = true;
    }
    changed
}

impl World {
    pub fn is_protected(&self, id: ColonyId) -> bool {
        self.store
            .colony(id)
            .is_some_and(|c| is_protected(c, &self.ctx.config.protection))
    }

    /// Top up a protected colony, logging the refresh when it happens
    pub fn refresh_protection(&mut self, id: ColonyId) -> Result<bool, ActionError> {
        self.act(id, |colony, env| {
            let changed = refresh(colony, &env.config().protection);
            if changed {
                env.log_flavored(
                    colony,
                    EventKind::Protection,
                    "Under protection: the colony has been restocked.",
                    "protection",
                    Some("enter"),
                );
            }
            Ok(changed)
        })
    }
}
