//! Premium food addiction
//!
//! A turn counts as "premium only" when premium food is the only food left
//! in the stores after eating. This reads stock levels rather than what was
//! actually eaten.

use crate::colony::Colony;
use crate::events::EventKind;
use crate::world::Env;

pub fn run(colony: &mut Colony, env: &mut Env) {
    let a = &env.config().addiction;

    let premium_only = colony.premium_food > 0 && colony.common_food == 0 && colony.meat_stock == 0;
    if premium_only {
        colony.addiction_streak += 1;
    } else {
        if colony.is_addicted {
            colony.clean_streak += 1;
        }
        colony.addiction_streak = 0;
    }

    if colony.addiction_streak >= a.trigger_turns && !colony.is_addicted {
        colony.is_addicted = true;
        colony.clean_streak = 0;
        env.log_flavored(colony, EventKind::Addiction, "The colony is hooked on premium food.", "addiction", Some("start"));
    }

    if colony.is_addicted && colony.premium_food == 0 {
        colony.adjust_morale(a.withdrawal_morale);
        env.log_flavored(colony, EventKind::Addiction, "Withdrawal! Morale plummets.", "addiction", Some("withdrawal"));
    }

    if colony.is_addicted && colony.clean_streak >= a.cure_turns {
        colony.is_addicted = false;
        colony.clean_streak = 0;
        colony.addiction_streak = 0;
        env.log_flavored(colony, EventKind::Addiction, "The addiction has been kicked.", "addiction", Some("cured"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::create_test_colony;
    use crate::core::config::GameConfig;
    use crate::core::context::SimContext;
    use crate::core::types::SimRng;
    use rand::SeedableRng;

    fn premium_only_colony() -> Colony {
        let mut colony = create_test_colony(1);
        colony.premium_food = 10;
        colony.common_food = 0;
        colony.meat_stock = 0;
        colony
    }

    #[test]
    fn test_three_premium_turns_cause_addiction() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = premium_only_colony();

        run(&mut colony, &mut env);
        run(&mut colony, &mut env);
        assert!(!colony.is_addicted);
        run(&mut colony, &mut env);
        assert!(colony.is_addicted);
    }

    #[test]
    fn test_withdrawal_penalty_when_out_of_premium() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);
        colony.is_addicted = true;
        colony.premium_food = 0;
        colony.morale = 50;

        run(&mut colony, &mut env);

        assert_eq!(colony.morale, 30);
        assert_eq!(colony.clean_streak, 1);
    }

    #[test]
    fn test_clean_turns_cure() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);
        colony.is_addicted = true;
        colony.premium_food = 5;
        colony.common_food = 20;

        for _ in 0..3 {
            run(&mut colony, &mut env);
        }

        assert!(!colony.is_addicted);
        assert_eq!(colony.clean_streak, 0);
    }
}
