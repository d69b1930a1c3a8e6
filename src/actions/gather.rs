//! Scavenging trips

use serde::{Deserialize, Serialize};

use crate::actions::{admit, say, traced, ActionKind, ActionReport, ActionResult};
use crate::colony::{Colony, Resource, Tier};
use crate::core::error::ActionError;
use crate::core::types::ColonyId;
use crate::events::EventKind;
use crate::world::{Env, World};

/// What a trip brought home, after caps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatherYield {
    pub adults: u32,
    pub children: u32,
    pub common_food: u32,
    pub premium_food: u32,
    pub material: u32,
    pub jackpot: bool,
    /// A stray that followed the workers home
    pub wildling: Option<Tier>,
    /// A gathering child was taken
    pub predator: bool,
}

/// Send workers out. `None` reuses the last trip's deployment, clamped to
/// who is still alive.
pub fn gather(colony: &mut Colony, env: &mut Env, adults: Option<u32>, children: Option<u32>) -> ActionResult<GatherYield> {
    let config = env.config();
    let g = &config.gather;
    let cost = admit(colony, ActionKind::Gather, config)?;

    let adults = adults.unwrap_or(colony.deployed_gather_adults).min(colony.adult);
    let children = children.unwrap_or(colony.deployed_gather_children).min(colony.child);
    if adults + children == 0 {
        return Err(ActionError::InsufficientPopulation("nobody was sent to gather".into()));
    }

    colony.action_points -= cost;
    colony.deployed_gather_adults = adults;
    colony.deployed_gather_children = children;

    let mut messages = Vec::new();
    if adults > 0 {
        say(env, colony, "gather", Some("adult"), &mut messages);
    }
    if children > 0 {
        say(env, colony, "gather", Some("child"), &mut messages);
    }

    let mut common = 0u32;
    let mut material = 0u32;
    let mut premium = 0u32;
    for _ in 0..adults {
        common += env.span(g.adult_common);
        material += env.span(g.adult_material);
        if env.chance(g.adult_premium_chance) {
            premium += 1;
        }
    }
    for _ in 0..children {
        common += env.span(g.child_common);
        material += env.span(g.child_material);
        if env.chance(g.child_premium_chance) {
            premium += 1;
        }
    }

    let morale = colony.morale_multiplier(config.combat.morale_factor);
    let penalty = (colony.gather_penalty_turns > 0).then_some(g.penalty_multiplier);
    let addiction = colony.is_addicted.then_some(g.addiction_multiplier);
    let factors: Vec<f64> = std::iter::once(morale).chain(penalty).chain(addiction).collect();
    common = scale_each(common, &factors);
    material = scale_each(material, &factors);

    let mut found = GatherYield {
        adults,
        children,
        ..GatherYield::default()
    };

    if env.chance(g.jackpot_chance) {
        common = common.saturating_mul(g.jackpot_multiplier);
        found.jackpot = true;
        say(env, colony, "gather", Some("jackpot"), &mut messages);
    }

    if env.chance(g.wildling_chance) {
        let tier = if env.chance(0.5) { Tier::Child } else { Tier::Baby };
        colony.add_population(tier, 1);
        found.wildling = Some(tier);
        say(env, colony, "gather", Some("wildling"), &mut messages);
    }

    if children > 0 && env.chance(g.predator_chance) {
        colony.remove_population(Tier::Child, 1);
        found.predator = true;
        say(env, colony, "gather", Some("predator"), &mut messages);
    }

    found.common_food = colony.add_resource(Resource::CommonFood, common);
    found.premium_food = colony.add_resource(Resource::PremiumFood, premium);
    found.material = colony.add_resource(Resource::Material, material);

    let sub = if common >= (adults + children) * 8 { "big" } else { "small" };
    say(env, colony, "gather", Some(sub), &mut messages);

    let summary = format!(
        "Gathering done: +{} common food, +{} premium food, +{} material.",
        found.common_food, found.premium_food, found.material
    );
    env.log(colony, EventKind::Gather, summary.clone());
    messages.push(summary);

    Ok(ActionReport::new(found, messages))
}

fn scale(amount: u32, factor: f64) -> u32 {
    (amount as f64 * factor.max(0.0)) as u32
}

/// Apply factors in order, truncating after each one
fn scale_each(amount: u32, factors: &[f64]) -> u32 {
    factors.iter().fold(amount, |acc, factor| scale(acc, *factor))
}

impl World {
    pub fn gather(&mut self, id: ColonyId, adults: Option<u32>, children: Option<u32>) -> ActionResult<GatherYield> {
        let result = self.act(id, |colony, env| gather(colony, env, adults, children));
        traced(id, ActionKind::Gather, result)
    }
}
