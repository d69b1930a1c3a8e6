//! Guards feeding on children once every store is empty

use crate::colony::{Colony, Resource, Tier};
use crate::events::EventKind;
use crate::world::Env;

pub fn run(colony: &mut Colony, env: &mut Env) {
    let c = &env.config().cannibalism;
    if !c.enabled {
        return;
    }
    if colony.common_food > 0 || colony.meat_stock > 0 || colony.premium_food > 0 {
        return;
    }

    let mut eaten = 0;
    for _ in 0..colony.guard {
        if env.chance(c.guard_feed_chance) && colony.child > 0 {
            colony.remove_population(Tier::Child, 1);
            colony.add_resource(Resource::MeatStock, 1);
            eaten += 1;
        }
    }

    if eaten > 0 {
        colony.adjust_morale(c.morale_penalty);
        let msg = format!("Starving guards devoured {} children.", eaten);
        env.log_flavored(colony, EventKind::Cannibalism, msg, "cannibalism", None);
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

    fn starving() -> Colony {
        let mut colony = create_test_colony(1);
        colony.premium_food = 0;
        colony.common_food = 0;
        colony.meat_stock = 0;
        colony.guard = 3;
        colony.child = 10;
        colony.morale = 50;
        colony
    }

    fn ctx_with_chance(chance: f64) -> SimContext {
        let mut config = GameConfig::default();
        config.cannibalism.guard_feed_chance = chance;
        SimContext::silent(config)
    }

    #[test]
    fn test_each_guard_eats_one_child() {
        let ctx = ctx_with_chance(1.0);
        let mut rng = SimRng::seed_from_u64(9);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = starving();

        run(&mut colony, &mut env);

        assert_eq!(colony.child, 7);
        assert_eq!(colony.meat_stock, 3);
        assert_eq!(colony.morale, 35);
    }

    #[test]
    fn test_any_food_prevents_cannibalism() {
        let ctx = ctx_with_chance(1.0);
        let mut rng = SimRng::seed_from_u64(9);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = starving();
        colony.premium_food = 1;

        run(&mut colony, &mut env);

        assert_eq!(colony.child, 10);
        assert_eq!(colony.morale, 50);
    }

    #[test]
    fn test_disabled_cannibalism() {
        let mut config = GameConfig::default();
        config.cannibalism.enabled = false;
        config.cannibalism.guard_feed_chance = 1.0;
        let ctx = SimContext::silent(config);
        let mut rng = SimRng::seed_from_u64(9);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = starving();

        run(&mut colony, &mut env);

        assert_eq!(colony.child, 10);
    }
}
