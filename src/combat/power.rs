//! Attack, defense and overall combat power

use crate::colony::Colony;
use crate::core::config::{CombatConfig, FacilityConfig};

/// Committed force scaled by the attacker's morale, never below 1
pub fn attack_power(guards: u32, adults: u32, boss_joins: bool, morale: u32, c: &CombatConfig) -> u32 {
    let mut base = guards * c.power_guard + adults * c.power_adult;
    if boss_joins {
        base += c.power_boss;
    }
    let scaled = base as f64 * morale_multiplier(morale, c);
    (scaled as u32).max(1)
}

/// The defender's whole guard/adult/child force with wall, watchtower and
/// morale bonuses, never below 1
pub fn defense_power(defender: &Colony, c: &CombatConfig, f: &FacilityConfig) -> u32 {
    let base = defender.guard * c.power_guard + defender.adult * c.power_adult + defender.child * c.power_child;
    let walls = 1.0 + f.wall_defense_bonus * defender.walls as f64;
    let tower = if defender.watchtowers > 0 {
        1.0 + f.watchtower_defense_bonus
    } else {
        1.0
    };
    let scaled = base as f64 * walls * tower * morale_multiplier(defender.morale, c);
    (scaled as u32).max(1)
}

/// Everything the colony has, boss included, scaled by morale
pub fn combat_power(colony: &Colony, c: &CombatConfig) -> u32 {
    let base = c.power_boss + colony.guard * c.power_guard + colony.adult * c.power_adult + colony.child * c.power_child;
    (base as f64 * morale_multiplier(colony.morale, c)) as u32
}

pub fn morale_multiplier(morale: u32, c: &CombatConfig) -> f64 {
    (1.0 + (morale as f64 - 50.0) * c.morale_factor).max(0.0)
}
