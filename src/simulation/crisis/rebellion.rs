//! Desertion, strikes and coups in a miserable colony

use crate::colony::{Colony, Tier};
use crate::events::EventKind;
use crate::world::Env;

pub fn run(colony: &mut Colony, env: &mut Env) {
    let r = &env.config().rebellion;

    // Desertion
    if colony.morale <= r.morale_threshold && env.chance(r.desertion_chance) {
        let wanted = ((colony.child as f64 * r.desertion_rate) as u32).max(1);
        let fled = colony.remove_population(Tier::Child, wanted);
        if fled > 0 {
            let msg = format!("{} children deserted the colony.", fled);
            env.log_flavored(colony, EventKind::Rebellion, msg, "rebellion", Some("desertion"));
        }
    }

    // Strike
    if colony.morale <= r.strike_morale_threshold && !colony.on_strike() && env.chance(r.strike_chance) {
        colony.strike_turns = r.strike_turns;
        let msg = format!("The adults are on strike for {} turns!", r.strike_turns);
        env.log_flavored(colony, EventKind::Rebellion, msg, "rebellion", Some("strike"));
    }

    // Coup
    if colony.morale <= r.morale_threshold
        && colony.boss_health <= r.coup_boss_threshold
        && colony.guard > 0
        && env.chance(r.coup_chance)
    {
        let destroyed = colony.damage_boss(r.coup_damage);
        let defectors = (colony.guard / 2).max(1);
        colony.remove_population(Tier::Guard, defectors);
        let msg = format!(
            "Coup! The boss took {} damage and {} guards defected.",
            r.coup_damage, defectors
        );
        env.log_flavored(colony, EventKind::Rebellion, msg, "rebellion", Some("coup"));
        if destroyed {
            env.log_flavored(colony, EventKind::GameOver, "The boss was killed in the coup.", "game_over", None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::create_test_colony;
    use crate::core::config::{GameConfig, RebellionConfig};
    use crate::core::context::SimContext;
    use crate::core::types::SimRng;
    use rand::SeedableRng;

    fn certain() -> RebellionConfig {
        RebellionConfig {
            desertion_chance: 1.0,
            strike_chance: 1.0,
            coup_chance: 1.0,
            ..RebellionConfig::default()
        }
    }

    fn run_with(rebellion: RebellionConfig, colony: &mut Colony) {
        let mut config = GameConfig::default();
        config.rebellion = rebellion;
        let ctx = SimContext::silent(config);
        let mut rng = SimRng::seed_from_u64(5);
        let mut env = Env::new(&ctx, &mut rng);
        run(colony, &mut env);
    }

    #[test]
    fn test_content_colony_does_not_rebel() {
        let mut colony = create_test_colony(1);
        colony.morale = 60;
        colony.boss_health = 10;
        colony.guard = 4;
        let before = colony.clone();
        run_with(certain(), &mut colony);
        assert_eq!(colony, before);
    }

    #[test]
    fn test_all_three_checks_are_independent() {
        let mut colony = create_test_colony(1);
        colony.morale = 10;
        colony.child = 20;
        colony.guard = 4;
        colony.boss_health = 30;

        run_with(certain(), &mut colony);

        assert_eq!(colony.child, 17);
        assert_eq!(colony.strike_turns, 2);
        assert_eq!(colony.guard, 2);
        assert_eq!(colony.boss_health, 0);
        assert!(colony.destroyed);
    }

    #[test]
    fn test_strike_does_not_restart_while_running() {
        let mut colony = create_test_colony(1);
        colony.morale = 25;
        colony.strike_turns = 1;
        run_with(certain(), &mut colony);
        assert_eq!(colony.strike_turns, 1);
    }

    #[test]
    fn test_desertion_takes_at_least_one_child() {
        let mut colony = create_test_colony(1);
        colony.morale = 0;
        colony.child = 3;
        run_with(RebellionConfig { strike_chance: 0.0, coup_chance: 0.0, ..certain() }, &mut colony);
        assert_eq!(colony.child, 2);
    }
}
