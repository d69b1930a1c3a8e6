//! One-shot battle resolution between two colonies
//!
//! [`resolve`] draws every random number up front in a fixed order and hands
//! them to [`apply_with_rolls`], which is a pure function of its inputs.

use serde::{Deserialize, Serialize};

use crate::colony::{Colony, Resource, Tier};
use crate::combat::power::{attack_power, defense_power};
use crate::combat::record::{BattleLog, Casualties, Commitment, Loot};
use crate::core::config::GameConfig;
use crate::core::error::ActionError;
use crate::core::types::{BattleId, Ratio};
use crate::events::EventKind;
use crate::world::Env;

/// What the attacker asked to send; `None` means every available unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOrder {
    pub guards: Option<u32>,
    pub adults: Option<u32>,
    pub boss_joins: bool,
}

impl AttackOrder {
    pub fn all_available() -> Self {
        Self::default()
    }

    pub fn with_forces(guards: u32, adults: u32) -> Self {
        Self {
            guards: Some(guards),
            adults: Some(adults),
            boss_joins: false,
        }
    }
}

/// Clamp the order to forces not held back for defense
pub fn commit_forces(attacker: &Colony, order: AttackOrder) -> Result<Commitment, ActionError> {
    let (avail_guards, avail_adults) = attacker.available_forces();
    let guards = order.guards.map_or(avail_guards, |g| g.min(avail_guards));
    let adults = order.adults.map_or(avail_adults, |a| a.min(avail_adults));

    if guards + adults == 0 && !order.boss_joins {
        return Err(ActionError::InsufficientPopulation(
            "no guards or adults available to send".into(),
        ));
    }

    Ok(Commitment {
        guards,
        adults,
        boss_joins: order.boss_joins,
    })
}

/// Fractions drawn for each loot category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LootShares {
    pub premium_food: f64,
    pub common_food: f64,
    pub material: f64,
    pub babies: f64,
    pub children: f64,
}

/// Every random input of a battle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattleRolls {
    pub attack_roll: f64,
    pub defense_roll: f64,
    pub attacker_loss_rate: f64,
    pub defender_loss_rate: f64,
    /// Only read when the attacker wins
    pub loot: Option<LootShares>,
    /// Applied only when the attacker loses with the boss along, or is routed
    pub attacker_boss_damage: u32,
    /// Applied only on a decisive attacker win
    pub defender_boss_damage: u32,
}

/// Power after the random perturbation, and who won
pub fn decide(attack: u32, defense: u32, attack_roll: f64, defense_roll: f64) -> (f64, f64, bool) {
    let rolled_attack = attack as f64 * attack_roll;
    let rolled_defense = defense as f64 * defense_roll;
    (rolled_attack, rolled_defense, rolled_attack > rolled_defense)
}

/// Resolve a battle with the given rolls. Both colonies are mutated; the
/// returned record carries a placeholder id the caller replaces.
pub fn apply_with_rolls(
    attacker: &mut Colony,
    defender: &mut Colony,
    commitment: Commitment,
    rolls: &BattleRolls,
    config: &GameConfig,
) -> BattleLog {
    let c = &config.combat;

    let attack = attack_power(commitment.guards, commitment.adults, commitment.boss_joins, attacker.morale, c);
    let defense = defense_power(defender, c, &config.facilities);
    let (rolled_attack, rolled_defense, attacker_wins) =
        decide(attack, defense, rolls.attack_roll, rolls.defense_roll);
    let power_ratio = rolled_attack / rolled_defense.max(1.0);

    // Attacker loses only from what it sent
    let attacker_losses = Casualties {
        guards: (commitment.guards as f64 * rolls.attacker_loss_rate) as u32,
        adults: (commitment.adults as f64 * rolls.attacker_loss_rate) as u32,
        children: 0,
    };
    attacker.remove_population(Tier::Guard, attacker_losses.guards);
    attacker.remove_population(Tier::Adult, attacker_losses.adults);

    // Defender fights, and loses, with everyone
    let rate = rolls.defender_loss_rate;
    let defender_losses = Casualties {
        guards: defender.remove_population(Tier::Guard, (defender.guard as f64 * rate) as u32),
        adults: defender.remove_population(Tier::Adult, (defender.adult as f64 * rate) as u32),
        children: defender.remove_population(
            Tier::Child,
            (defender.child as f64 * rate * c.child_loss_share) as u32,
        ),
    };

    let mut loot = Loot::default();
    if attacker_wins {
        if let Some(shares) = rolls.loot {
            loot = take_loot(attacker, defender, &shares);
        }
        attacker.adjust_morale(c.win_morale_attacker);
        defender.adjust_morale(c.win_morale_defender);
    } else {
        attacker.adjust_morale(c.loss_morale_attacker);
        defender.adjust_morale(c.loss_morale_defender);
    }

    let mut attacker_boss_damage = 0;
    let mut defender_boss_damage = 0;
    let mut attacker_destroyed = false;
    let mut defender_destroyed = false;

    if !attacker_wins && (commitment.boss_joins || power_ratio < c.rout_ratio) {
        attacker_boss_damage = rolls.attacker_boss_damage;
        attacker_destroyed = attacker.damage_boss(attacker_boss_damage);
    }
    if attacker_wins && power_ratio > c.decisive_ratio {
        defender_boss_damage = rolls.defender_boss_damage;
        defender_destroyed = defender.damage_boss(defender_boss_damage);
    }

    BattleLog {
        id: BattleId(0),
        turn: attacker.turn_count,
        attacker: attacker.id,
        defender: defender.id,
        commitment,
        attack_power: attack,
        defense_power: defense,
        power_ratio,
        attacker_wins,
        attacker_losses,
        defender_losses,
        loot,
        attacker_boss_damage,
        defender_boss_damage,
        attacker_destroyed,
        defender_destroyed,
    }
}

fn take_loot(attacker: &mut Colony, defender: &mut Colony, shares: &LootShares) -> Loot {
    let premium = (defender.premium_food as f64 * shares.premium_food) as u32;
    let common = (defender.common_food as f64 * shares.common_food) as u32;
    let material = (defender.material as f64 * shares.material) as u32;
    let babies = (defender.baby as f64 * shares.babies) as u32;
    let children = (defender.child as f64 * shares.children) as u32;

    let loot = Loot {
        premium_food: defender.remove_resource(Resource::PremiumFood, premium),
        common_food: defender.remove_resource(Resource::CommonFood, common),
        material: defender.remove_resource(Resource::Material, material),
        babies: defender.remove_population(Tier::Baby, babies),
        children: defender.remove_population(Tier::Child, children),
    };

    attacker.add_resource(Resource::PremiumFood, loot.premium_food);
    attacker.add_resource(Resource::CommonFood, loot.common_food);
    attacker.add_resource(Resource::Material, loot.material);
    attacker.add_population(Tier::Baby, loot.babies);
    attacker.add_population(Tier::Child, loot.children);
    loot
}

fn draw(env: &mut Env, ratio: Ratio) -> f64 {
    env.ratio(ratio)
}

/// Draw the rolls, resolve, and write both sides' event streams
pub fn resolve(
    attacker: &mut Colony,
    defender: &mut Colony,
    commitment: Commitment,
    id: BattleId,
    env: &mut Env,
) -> BattleLog {
    let config = env.config();
    let c = &config.combat;

    let attack = attack_power(commitment.guards, commitment.adults, commitment.boss_joins, attacker.morale, c);
    let defense = defense_power(defender, c, &config.facilities);
    let attack_roll = draw(env, c.roll);
    let defense_roll = draw(env, c.roll);
    let (rolled_attack, rolled_defense, attacker_wins) = decide(attack, defense, attack_roll, defense_roll);
    let power_ratio = rolled_attack / rolled_defense.max(1.0);

    let (attacker_band, defender_band) = if attacker_wins {
        (c.winner_loss, c.loser_loss)
    } else {
        (c.loser_loss, c.winner_loss)
    };
    let attacker_loss_rate = draw(env, attacker_band);
    let defender_loss_rate = draw(env, defender_band);

    let loot = if attacker_wins {
        let l = &config.loot;
        Some(LootShares {
            premium_food: draw(env, l.premium_food),
            common_food: draw(env, l.common_food),
            material: draw(env, l.material),
            babies: draw(env, l.babies),
            children: draw(env, l.children),
        })
    } else {
        None
    };

    let attacker_boss_damage = if !attacker_wins && commitment.boss_joins {
        env.span(c.boss_joined_loss_damage)
    } else if !attacker_wins && power_ratio < c.rout_ratio {
        env.span(c.rout_boss_damage)
    } else {
        0
    };
    let defender_boss_damage = if attacker_wins && power_ratio > c.decisive_ratio {
        env.span(c.decisive_boss_damage)
    } else {
        0
    };

    let rolls = BattleRolls {
        attack_roll,
        defense_roll,
        attacker_loss_rate,
        defender_loss_rate,
        loot,
        attacker_boss_damage,
        defender_boss_damage,
    };

    let mut log = apply_with_rolls(attacker, defender, commitment, &rolls, config);
    log.id = id;
    write_events(attacker, defender, &log, env);
    log
}

fn write_events(attacker: &Colony, defender: &Colony, log: &BattleLog, env: &mut Env) {
    let boss = if log.commitment.boss_joins { " The boss led the charge." } else { "" };
    if log.attacker_wins {
        let l = &log.loot;
        let msg = format!(
            "Raided {} and won!{} Loot: {} premium, {} common, {} material, {} babies, {} children.",
            defender.name, boss, l.premium_food, l.common_food, l.material, l.babies, l.children
        );
        env.log_flavored(attacker, EventKind::Battle, msg, "battle", Some("win"));
        let msg = format!("{} raided us and carried off our stores.", attacker.name);
        env.log_flavored(defender, EventKind::Battle, msg, "battle", Some("raided"));
    } else {
        let msg = format!(
            "The raid on {} failed.{} Lost {} guards and {} adults.",
            defender.name, boss, log.attacker_losses.guards, log.attacker_losses.adults
        );
        env.log_flavored(attacker, EventKind::Battle, msg, "battle", Some("loss"));
        let msg = format!("We repelled a raid from {}!", attacker.name);
        env.log_flavored(defender, EventKind::Battle, msg, "battle", Some("defended"));
    }

    if log.attacker_destroyed {
        env.log_flavored(attacker, EventKind::GameOver, "The boss fell in battle.", "game_over", None);
    }
    if log.defender_destroyed {
        env.log_flavored(defender, EventKind::GameOver, "The boss was slain by raiders.", "game_over", None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::create_test_colony;
    use crate::core::context::SimContext;
    use crate::core::types::SimRng;
    use rand::SeedableRng;

    fn no_loot_rolls(attack_roll: f64, defense_roll: f64) -> BattleRolls {
        BattleRolls {
            attack_roll,
            defense_roll,
            attacker_loss_rate: 0.1,
            defender_loss_rate: 0.3,
            loot: None,
            attacker_boss_damage: 0,
            defender_boss_damage: 0,
        }
    }

    fn army(id: u32, guards: u32, adults: u32) -> Colony {
        let mut colony = create_test_colony(id);
        colony.guard = guards;
        colony.adult = adults;
        colony.child = 0;
        colony.morale = 50;
        colony
    }

    #[test]
    fn test_commit_defaults_to_available() {
        let mut attacker = army(1, 6, 10);
        attacker.deployed_defense_guards = 2;
        let commitment = commit_forces(&attacker, AttackOrder::all_available()).expect("forces available");
        assert_eq!((commitment.guards, commitment.adults), (4, 10));

        let clamped = commit_forces(&attacker, AttackOrder::with_forces(99, 3)).expect("forces available");
        assert_eq!((clamped.guards, clamped.adults), (4, 3));
    }

    #[test]
    fn test_empty_commitment_rejected_without_boss() {
        let attacker = army(1, 0, 0);
        assert!(commit_forces(&attacker, AttackOrder::all_available()).is_err());

        let order = AttackOrder { boss_joins: true, ..AttackOrder::all_available() };
        assert!(commit_forces(&attacker, order).is_ok());
    }

    #[test]
    fn test_higher_roll_wins() {
        let config = GameConfig::default();
        let mut attacker = army(1, 5, 0);
        let mut defender = army(2, 5, 0);
        let commitment = Commitment { guards: 5, adults: 0, boss_joins: false };

        let log = apply_with_rolls(&mut attacker, &mut defender, commitment, &no_loot_rolls(1.2, 0.8), &config);
        assert!(log.attacker_wins);

        let mut attacker = army(1, 5, 0);
        let mut defender = army(2, 5, 0);
        let log = apply_with_rolls(&mut attacker, &mut defender, commitment, &no_loot_rolls(1.0, 1.0), &config);
        assert!(!log.attacker_wins, "ties go to the defender");
    }

    #[test]
    fn test_attacker_losses_only_from_committed() {
        let config = GameConfig::default();
        let mut attacker = army(1, 10, 20);
        let mut defender = army(2, 10, 20);
        let commitment = Commitment { guards: 10, adults: 0, boss_joins: false };
        let mut rolls = no_loot_rolls(0.8, 1.2);
        rolls.attacker_loss_rate = 0.5;
        rolls.defender_loss_rate = 0.1;

        let log = apply_with_rolls(&mut attacker, &mut defender, commitment, &rolls, &config);

        assert_eq!(log.attacker_losses.guards, 5);
        assert_eq!(log.attacker_losses.adults, 0);
        assert_eq!(attacker.adult, 20);
        // defender loses from its whole force
        assert_eq!(log.defender_losses.guards, 1);
        assert_eq!(log.defender_losses.adults, 2);
    }

    #[test]
    fn test_decisive_win_damages_defender_boss() {
        let config = GameConfig::default();
        let mut attacker = army(1, 20, 0);
        let mut defender = army(2, 1, 0);
        defender.boss_health = 10;
        let commitment = Commitment { guards: 20, adults: 0, boss_joins: false };
        let mut rolls = no_loot_rolls(1.0, 1.0);
        rolls.defender_boss_damage = 12;

        let log = apply_with_rolls(&mut attacker, &mut defender, commitment, &rolls, &config);

        assert!(log.attacker_wins);
        assert!(log.power_ratio > 2.0);
        assert_eq!(log.defender_boss_damage, 12);
        assert!(defender.destroyed);
        assert!(log.defender_destroyed);
    }

    #[test]
    fn test_loot_bounded_and_capped() {
        let config = GameConfig::default();
        let mut attacker = army(1, 20, 0);
        attacker.premium_food = 45;
        let mut defender = army(2, 1, 0);
        defender.premium_cap = 200;
        defender.premium_food = 100;
        let commitment = Commitment { guards: 20, adults: 0, boss_joins: false };
        let mut rolls = no_loot_rolls(1.0, 1.0);
        rolls.loot = Some(LootShares {
            premium_food: 0.45,
            common_food: 0.0,
            material: 0.0,
            babies: 0.0,
            children: 0.0,
        });

        let log = apply_with_rolls(&mut attacker, &mut defender, commitment, &rolls, &config);

        assert_eq!(log.loot.premium_food, 45);
        assert_eq!(defender.premium_food, 55);
        assert_eq!(attacker.premium_food, attacker.premium_cap);
    }

    #[test]
    fn test_boss_joined_loss_hurts_attacker_boss() {
        let config = GameConfig::default();
        let mut attacker = army(1, 1, 0);
        let mut defender = army(2, 10, 10);
        let commitment = Commitment { guards: 1, adults: 0, boss_joins: true };
        let mut rolls = no_loot_rolls(1.0, 1.0);
        rolls.attacker_boss_damage = 20;

        let log = apply_with_rolls(&mut attacker, &mut defender, commitment, &rolls, &config);

        assert!(!log.attacker_wins);
        assert_eq!(attacker.boss_health, 80);
        assert_eq!(attacker.morale, 42);
        assert_eq!(defender.morale, 55);
    }

    #[test]
    fn test_close_loss_spares_home_boss() {
        let config = GameConfig::default();
        let mut attacker = army(1, 5, 0);
        let mut defender = army(2, 5, 0);
        let commitment = Commitment { guards: 5, adults: 0, boss_joins: false };
        let mut rolls = no_loot_rolls(1.0, 1.0);
        rolls.attacker_boss_damage = 7;

        apply_with_rolls(&mut attacker, &mut defender, commitment, &rolls, &config);

        assert_eq!(attacker.boss_health, 100);
    }

    #[test]
    fn test_resolve_loot_within_configured_bounds() {
        let ctx = SimContext::silent(GameConfig::default());
        for seed in 0..20 {
            let mut rng = SimRng::seed_from_u64(seed);
            let mut env = Env::new(&ctx, &mut rng);
            let mut attacker = army(1, 30, 0);
            let mut defender = army(2, 1, 0);
            defender.premium_food = 40;
            let commitment = Commitment { guards: 30, adults: 0, boss_joins: false };

            let log = resolve(&mut attacker, &mut defender, commitment, BattleId(seed as u32), &mut env);

            assert!(log.attacker_wins);
            assert!((12..=24).contains(&log.loot.premium_food));
            assert_eq!(log.id, BattleId(seed as u32));
            assert!(attacker.premium_food <= attacker.premium_cap);
        }
    }
}
