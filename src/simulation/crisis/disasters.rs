//! Environmental disasters
//!
//! Six independent rolls per turn. Each one that fires applies its own
//! damage; walls halve cold losses.

use crate::colony::{Colony, Resource, Tier};
use crate::events::EventKind;
use crate::world::Env;

pub fn run(colony: &mut Colony, env: &mut Env) {
    let config = env.config();
    let d = &config.disasters;

    // Storm
    if env.chance(d.storm_chance) && colony.lose_shelter(config) {
        let msg = format!("Storm! A shelter collapsed (population cap now {}).", colony.population_cap);
        env.log_flavored(colony, EventKind::Disaster, msg, "disaster", Some("storm"));
    }

    // Cold snap
    if env.chance(d.cold_chance) {
        let mut babies = (colony.baby as f64 * d.cold_baby_rate) as u32;
        let mut children = (colony.child as f64 * d.cold_child_rate) as u32;
        if colony.walls > 0 {
            babies = (babies as f64 * d.cold_wall_factor) as u32;
            children = (children as f64 * d.cold_wall_factor) as u32;
        }
        let babies = colony.remove_population(Tier::Baby, babies);
        let children = colony.remove_population(Tier::Child, children);
        if babies + children > 0 {
            let msg = format!("Cold snap! {} babies and {} children froze.", babies, children);
            env.log_flavored(colony, EventKind::Disaster, msg, "disaster", Some("cold"));
        }
    }

    // Pesticide
    if env.chance(d.pesticide_chance) && colony.breeding_pits > 0 {
        let dead = (colony.baby as f64 * d.pesticide_baby_rate) as u32;
        let dead = colony.remove_population(Tier::Baby, dead);
        if dead > 0 {
            let msg = format!("Pesticide! {} babies died.", dead);
            env.log_flavored(colony, EventKind::Disaster, msg, "disaster", Some("pesticide"));
        }
    }

    // Pests
    if env.chance(d.pest_chance) {
        let food = (colony.common_food as f64 * d.pest_food_rate) as u32;
        let babies = (colony.baby as f64 * d.pest_baby_rate) as u32;
        let food = colony.remove_resource(Resource::CommonFood, food);
        let babies = colony.remove_population(Tier::Baby, babies);
        if food + babies > 0 {
            let msg = format!("Pests! {} common food spoiled, {} babies killed.", food, babies);
            env.log_flavored(colony, EventKind::Disaster, msg, "disaster", Some("pests"));
        }
    }

    // Predator
    if env.chance(d.predator_chance) && colony.child > 0 {
        let taken = env.span(d.predator_children);
        let taken = colony.remove_population(Tier::Child, taken);
        let msg = format!("A predator struck! {} children lost.", taken);
        env.log_flavored(colony, EventKind::Disaster, msg, "disaster", Some("predator"));
    }

    // Scavenging ground removed
    if env.chance(d.ground_removal_chance) && colony.gather_penalty_turns == 0 {
        colony.gather_penalty_turns = d.ground_removal_turns;
        let msg = format!(
            "The scavenging ground was cleared! Gathering halved for {} turns.",
            d.ground_removal_turns
        );
        env.log_flavored(colony, EventKind::Disaster, msg, "disaster", Some("ground_removal"));
    }
}
