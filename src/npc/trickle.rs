//! Passive income NPC colonies receive before deciding

use serde::{Deserialize, Serialize};

use crate::colony::{Colony, Resource, Tier};
use crate::events::EventKind;
use crate::npc::Personality;
use crate::world::Env;

/// What the trickle actually added, after caps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trickle {
    pub common_food: u32,
    pub material: u32,
    pub premium_food: u32,
    pub babies: u32,
    pub promoted_guards: u32,
}

/// Every NPC gets some common food and material; the personality adds a
/// small extra on top.
pub fn apply(colony: &mut Colony, env: &mut Env, personality: Personality) -> Trickle {
    let npc = &env.config().npc;
    let mut trickle = Trickle::default();

    let common = env.span(npc.trickle_common);
    trickle.common_food = colony.add_resource(Resource::CommonFood, common);
    let material = env.span(npc.trickle_material);
    trickle.material = colony.add_resource(Resource::Material, material);

    match personality {
        Personality::Peaceful => {
            if env.chance(npc.peaceful_baby_chance) {
                let babies = env.span(npc.peaceful_babies);
                colony.add_population(Tier::Baby, babies);
                trickle.babies = babies;
            }
        }
        Personality::Aggressive | Personality::Berserk => {
            if env.chance(npc.warlike_guard_chance) && colony.adult > 2 {
                colony.remove_population(Tier::Adult, 1);
                colony.add_population(Tier::Guard, 1);
                colony.clamp_deployments();
                trickle.promoted_guards = 1;
            }
        }
        Personality::Defensive => {
            let extra = env.span(npc.defensive_material);
            trickle.material += colony.add_resource(Resource::Material, extra);
        }
        Personality::Cunning => {
            if env.chance(npc.cunning_premium_chance) {
                trickle.premium_food = colony.add_resource(Resource::PremiumFood, 1);
            }
        }
    }

    env.log(
        colony,
        EventKind::Gather,
        format!(
            "Scavengers brought in {} common food and {} material.",
            trickle.common_food, trickle.material
        ),
    );
    trickle
}
