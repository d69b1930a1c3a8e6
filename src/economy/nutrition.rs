//! Nutrition accounting
//!
//! Food is spent in a fixed priority: common food, then meat, then premium
//! food. Units are whole; a unit of a richer food is only broken open when it
//! is needed to cover what remains.

use serde::{Deserialize, Serialize};

use crate::colony::{Colony, Tier};
use crate::core::config::{GameConfig, NutritionConfig};

/// Nutrition points the colony could spend right now
pub fn available(colony: &Colony, n: &NutritionConfig) -> u32 {
    colony
        .common_food
        .saturating_mul(n.np_per_common)
        .saturating_add(colony.meat_stock.saturating_mul(n.np_per_meat))
        .saturating_add(colony.premium_food.saturating_mul(n.np_per_premium))
}

/// Nutrition points eaten by the colony in one turn
pub fn upkeep(colony: &Colony, n: &NutritionConfig) -> u32 {
    colony
        .guard
        .saturating_mul(n.upkeep_guard)
        .saturating_add(colony.adult.saturating_mul(n.upkeep_adult))
        .saturating_add(colony.child.saturating_mul(n.upkeep_child))
        .saturating_add(colony.baby.div_ceil(n.babies_per_np))
}

/// Spend `amount` nutrition points, returning the unmet remainder
pub fn consume_nutrition(colony: &mut Colony, amount: u32, n: &NutritionConfig) -> u32 {
    let mut remaining = amount;

    // Common food: one point per unit, exact
    if remaining > 0 && colony.common_food > 0 {
        let units = colony.common_food.min(remaining.div_ceil(n.np_per_common));
        colony.common_food -= units;
        remaining = remaining.saturating_sub(units.saturating_mul(n.np_per_common));
    }

    if remaining > 0 && colony.meat_stock > 0 {
        let units = colony.meat_stock.min(remaining.div_ceil(n.np_per_meat));
        colony.meat_stock -= units;
        remaining = remaining.saturating_sub(units.saturating_mul(n.np_per_meat));
    }

    if remaining > 0 && colony.premium_food > 0 {
        let units = colony.premium_food.min(remaining.div_ceil(n.np_per_premium));
        colony.premium_food -= units;
        remaining = remaining.saturating_sub(units.saturating_mul(n.np_per_premium));
    }

    remaining
}

/// Who died to cover a nutrition shortage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarvationOutcome {
    pub babies: u32,
    pub children: u32,
    pub adults: u32,
    pub boss_damage: u32,
    pub destroyed: bool,
}

impl StarvationOutcome {
    pub fn deaths(&self) -> u32 {
        self.babies + self.children + self.adults
    }
}

const BABY_SHORTAGE: u32 = 1;
const CHILD_SHORTAGE: u32 = 2;
const ADULT_SHORTAGE: u32 = 5;

/// Cover a shortage with lives, youngest first. Guards never starve; once
/// nobody else is left the boss takes a single blow and the shortage is settled.
pub fn apply_starvation(colony: &mut Colony, shortage: u32, config: &GameConfig) -> StarvationOutcome {
    let mut outcome = StarvationOutcome::default();
    let mut remaining = shortage;

    while remaining > 0 {
        if colony.baby > 0 {
            colony.remove_population(Tier::Baby, 1);
            outcome.babies += 1;
            remaining = remaining.saturating_sub(BABY_SHORTAGE);
        } else if colony.child > 0 {
            colony.remove_population(Tier::Child, 1);
            outcome.children += 1;
            remaining = remaining.saturating_sub(CHILD_SHORTAGE);
        } else if colony.adult > 0 {
            colony.remove_population(Tier::Adult, 1);
            outcome.adults += 1;
            remaining = remaining.saturating_sub(ADULT_SHORTAGE);
        } else {
            let damage = config.nutrition.starvation_boss_damage;
            outcome.boss_damage = damage;
            outcome.destroyed = colony.damage_boss(damage);
            break;
        }
    }

    outcome
}
