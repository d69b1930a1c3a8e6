//! Combat - power calculation, battle resolution and battle records

pub mod power;
pub mod record;
pub mod resolver;

pub use power::{attack_power, combat_power, defense_power};
pub use record::{BattleLog, Casualties, Commitment, Loot};
pub use resolver::{apply_with_rolls, commit_forces, resolve, AttackOrder, BattleRolls, LootShares};
