//! Encounters with humans
//!
//! Checked in a fixed order; the first encounter that happens ends the phase,
//! so at most one fires per turn.

use crate::colony::{Colony, Resource, Tier};
use crate::events::EventKind;
use crate::world::Env;

pub fn run(colony: &mut Colony, env: &mut Env) {
    let config = env.config();
    let h = &config.human_events;

    if env.chance(h.abduction_chance) && colony.child > 0 {
        let wanted = env.span(h.abduction_children);
        let taken = colony.remove_population(Tier::Child, wanted);
        colony.adjust_morale(h.abduction_morale);
        let msg = format!("Humans abducted {} children!", taken);
        env.log_flavored(colony, EventKind::Human, msg, "human", Some("abduction"));
        return;
    }

    if env.chance(h.capture_chance) && colony.adult > 1 {
        colony.remove_population(Tier::Adult, 1);
        colony.adjust_morale(h.capture_morale);
        env.log_flavored(colony, EventKind::Human, "An adult was captured by humans.", "human", Some("capture"));
        return;
    }

    if env.chance(h.vandalism_chance) && colony.shelters > 0 {
        if env.chance(h.vandalism_destroy_share) {
            colony.lose_shelter(config);
            env.log_flavored(colony, EventKind::Human, "Vandals destroyed a shelter!", "human", Some("vandalism"));
        } else {
            colony.adjust_morale(h.vandalism_morale);
            env.log_flavored(colony, EventKind::Human, "Vandals soaked the colony. Morale drops.", "human", Some("vandalism"));
        }
        return;
    }

    if env.chance(h.gift_chance) {
        let premium = env.span(h.gift_premium);
        let common = env.span(h.gift_common);
        let premium = colony.add_resource(Resource::PremiumFood, premium);
        let common = colony.add_resource(Resource::CommonFood, common);
        colony.adjust_morale(h.gift_morale);
        let msg = format!("A kind human left {} premium and {} common food!", premium, common);
        env.log_flavored(colony, EventKind::Human, msg, "human", Some("gift"));
        return;
    }

    if env.chance(h.pet_trade_chance) && colony.child >= h.pet_trade_children {
        colony.remove_population(Tier::Child, h.pet_trade_children);
        let msg = format!("{} children were captured for the pet trade.", h.pet_trade_children);
        env.log_flavored(colony, EventKind::Human, msg, "human", Some("pet_trade"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::create_test_colony;
    use crate::core::config::{GameConfig, HumanEventConfig};
    use crate::core::context::SimContext;
    use crate::core::types::SimRng;
    use rand::SeedableRng;

    fn none() -> HumanEventConfig {
        HumanEventConfig {
            abduction_chance: 0.0,
            capture_chance: 0.0,
            vandalism_chance: 0.0,
            gift_chance: 0.0,
            pet_trade_chance: 0.0,
            ..HumanEventConfig::default()
        }
    }

    fn run_with(events: HumanEventConfig, colony: &mut Colony) {
        let mut config = GameConfig::default();
        config.human_events = events;
        let ctx = SimContext::silent(config);
        let mut rng = SimRng::seed_from_u64(11);
        let mut env = Env::new(&ctx, &mut rng);
        run(colony, &mut env);
    }

    #[test]
    fn test_only_first_event_fires() {
        let mut colony = create_test_colony(1);
        colony.child = 10;
        colony.morale = 50;
        let events = HumanEventConfig {
            abduction_chance: 1.0,
            gift_chance: 1.0,
            ..none()
        };

        let premium_before = colony.premium_food;
        run_with(events, &mut colony);

        assert!(colony.child <= 7 && colony.child >= 5);
        assert_eq!(colony.morale, 42);
        assert_eq!(colony.premium_food, premium_before);
    }

    #[test]
    fn test_failed_condition_falls_through() {
        let mut colony = create_test_colony(1);
        colony.child = 0;
        colony.morale = 50;
        let events = HumanEventConfig {
            abduction_chance: 1.0,
            gift_chance: 1.0,
            ..none()
        };

        run_with(events, &mut colony);

        assert_eq!(colony.morale, 60);
    }

    #[test]
    fn test_capture_spares_last_adult() {
        let mut colony = create_test_colony(1);
        colony.adult = 1;
        run_with(HumanEventConfig { capture_chance: 1.0, ..none() }, &mut colony);
        assert_eq!(colony.adult, 1);
    }

    #[test]
    fn test_gift_respects_caps() {
        let mut colony = create_test_colony(1);
        colony.premium_food = colony.premium_cap;
        colony.common_food = colony.common_cap - 1;
        run_with(HumanEventConfig { gift_chance: 1.0, ..none() }, &mut colony);
        assert_eq!(colony.premium_food, colony.premium_cap);
        assert_eq!(colony.common_food, colony.common_cap);
    }
}
