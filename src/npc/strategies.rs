//! Candidate actions an NPC may try, each guarded by its own preconditions
//!
//! A strategy reads a snapshot of the colony, decides whether it applies,
//! then calls the same [`World`] action a player would. It reports whether
//! an action actually went through.

use rand::seq::SliceRandom;

use crate::actions::CullYield;
use crate::colony::{Colony, FacilityKind, Tier};
use crate::combat::power::combat_power;
use crate::combat::AttackOrder;
use crate::core::types::ColonyId;
use crate::economy::nutrition;
use crate::events::EventKind;
use crate::protection::is_protected;
use crate::world::World;

#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub run: fn(&mut World, ColonyId) -> bool,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

pub const GATHER: Strategy = Strategy { name: "gather", run: gather };
pub const BIRTH: Strategy = Strategy { name: "birth", run: birth };
pub const BUILD_SHELTER: Strategy = Strategy { name: "build_shelter", run: build_shelter };
pub const BUILD_WALL: Strategy = Strategy { name: "build_wall", run: build_wall };
pub const TRAIN: Strategy = Strategy { name: "train", run: train };
pub const DEFEND: Strategy = Strategy { name: "defend", run: defend };
pub const CULL_IF_NEEDED: Strategy = Strategy { name: "cull_if_needed", run: cull_if_needed };
pub const ATTACK: Strategy = Strategy { name: "attack", run: attack };
pub const CUNNING_ATTACK: Strategy = Strategy { name: "cunning_attack", run: cunning_attack };

fn snapshot(world: &World, id: ColonyId) -> Option<Colony> {
    world.colony(id).filter(|c| !c.destroyed).cloned()
}

/// Send half the adults out, at least one
fn gather(world: &mut World, id: ColonyId) -> bool {
    let Some(colony) = snapshot(world, id) else { return false };
    if colony.action_points < 1 || colony.adult == 0 {
        return false;
    }
    let adults = (colony.adult / 2).max(1);
    world.gather(id, Some(adults), Some(0)).is_ok()
}

fn birth(world: &mut World, id: ColonyId) -> bool {
    let Some(colony) = snapshot(world, id) else { return false };
    let config = &world.ctx.config;
    let npc = &config.npc;

    if colony.action_points < config.birth.action_points || colony.adult == 0 {
        return false;
    }
    if colony.total_population() + npc.birth_headroom >= colony.population_cap {
        return false;
    }
    if nutrition::available(&colony, &config.nutrition) < config.birth.np_cost * npc.birth_food_multiple {
        return false;
    }
    world.give_birth(id).is_ok()
}

/// Only once the colony is close to its population cap
fn build_shelter(world: &mut World, id: ColonyId) -> bool {
    let Some(colony) = snapshot(world, id) else { return false };
    let config = &world.ctx.config;

    if colony.action_points < 1 {
        return false;
    }
    if colony.total_population() + config.npc.shelter_headroom < colony.population_cap {
        return false;
    }
    if colony.material < config.facilities.shelter.material_cost {
        return false;
    }
    world.build(id, FacilityKind::Shelter).is_ok()
}

/// Walls up to the target count; a crowded colony short of material for a
/// wall puts up a shelter instead
fn build_wall(world: &mut World, id: ColonyId) -> bool {
    let Some(colony) = snapshot(world, id) else { return false };
    let config = &world.ctx.config;

    if colony.action_points < 1 || colony.walls >= config.npc.wall_target {
        return false;
    }
    if colony.material >= config.facilities.wall.material_cost {
        return world.build(id, FacilityKind::Wall).is_ok();
    }

    let crowded = colony.total_population() + config.npc.birth_headroom >= colony.population_cap;
    if crowded && colony.material >= config.facilities.shelter.material_cost {
        return world.build(id, FacilityKind::Shelter).is_ok();
    }
    false
}

fn train(world: &mut World, id: ColonyId) -> bool {
    let Some(colony) = snapshot(world, id) else { return false };
    let config = &world.ctx.config;
    let npc = &config.npc;

    if colony.action_points < 1 || colony.adult < npc.train_min_adults || colony.guard >= npc.guard_target {
        return false;
    }
    if nutrition::available(&colony, &config.nutrition) < config.training.np_cost {
        return false;
    }
    world.train(id).is_ok()
}

/// Hold every guard home, plus a third of the adults when there are more
/// than two. Costs no action points; a tier with too few members keeps its
/// previous posture.
fn defend(world: &mut World, id: ColonyId) -> bool {
    let Some(colony) = snapshot(world, id) else { return false };
    let guards = if colony.guard > 0 { colony.guard } else { colony.deployed_defense_guards };
    let adults = if colony.adult > 2 { colony.adult / 3 } else { colony.deployed_defense_adults };
    if guards == colony.deployed_defense_guards && adults == colony.deployed_defense_adults {
        return false;
    }
    world
        .act(id, |colony, env| {
            colony.deployed_defense_guards = guards;
            colony.deployed_defense_adults = adults;
            env.log(
                colony,
                EventKind::Defense,
                format!("Defense posture: {} guards and {} adults stay home.", guards, adults),
            );
            Ok(())
        })
        .is_ok()
}

/// Eat the young when stored food runs low: babies first, a child only when
/// there is not even one turn of food left
fn cull_if_needed(world: &mut World, id: ColonyId) -> bool {
    let Some(colony) = snapshot(world, id) else { return false };
    let config = &world.ctx.config;

    let stored = nutrition::available(&colony, &config.nutrition);
    let upkeep = nutrition::upkeep(&colony, &config.nutrition);
    if stored > upkeep * config.npc.cull_reserve_turns {
        return false;
    }

    if colony.baby > 0 {
        let count = colony.baby.min(3);
        return world.cull(id, Tier::Baby, CullYield::Meat, count).is_ok();
    }
    if colony.child > 3 && stored < upkeep {
        return world.cull(id, Tier::Child, CullYield::Meat, 1).is_ok();
    }
    false
}

/// Raid a random eligible colony with every free guard and half the free adults
fn attack(world: &mut World, id: ColonyId) -> bool {
    let Some(colony) = snapshot(world, id) else { return false };
    let config = &world.ctx.config;

    if colony.action_points < config.combat.action_points {
        return false;
    }
    if colony.guard == 0 && colony.adult < 3 {
        return false;
    }
    if is_protected(&colony, &config.protection) {
        return false;
    }

    let targets = raid_targets(world, id, |_| true);
    let Some(&target) = targets.choose(&mut world.rng) else { return false };

    let (guards, adults) = colony.available_forces();
    world
        .attack(id, target, AttackOrder::with_forces(guards, adults / 2))
        .is_ok()
}

/// Raid only colonies clearly weaker than itself, with half the free guards
fn cunning_attack(world: &mut World, id: ColonyId) -> bool {
    let Some(colony) = snapshot(world, id) else { return false };
    let config = &world.ctx.config;

    if colony.action_points < config.combat.action_points || colony.guard == 0 {
        return false;
    }
    if is_protected(&colony, &config.protection) {
        return false;
    }

    let threshold = combat_power(&colony, &config.combat) as f64 * config.npc.cunning_power_ratio;
    let targets = raid_targets(world, id, |t| (combat_power(t, &config.combat) as f64) < threshold);
    let Some(&target) = targets.choose(&mut world.rng) else { return false };

    let (guards, _) = colony.available_forces();
    world
        .attack(id, target, AttackOrder::with_forces((guards / 2).max(1), 0))
        .is_ok()
}

/// Live, unprotected colonies other than `id` that pass `filter`, in id order
fn raid_targets(world: &World, id: ColonyId, filter: impl Fn(&Colony) -> bool) -> Vec<ColonyId> {
    let protection = &world.ctx.config.protection;
    world
        .store
        .active_ids()
        .into_iter()
        .filter(|&other| other != id)
        .filter_map(|other| world.colony(other))
        .filter(|c| !is_protected(c, protection) && filter(c))
        .map(|c| c.id)
        .collect()
}
