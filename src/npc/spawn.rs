//! Founding NPC colonies with rolled starting values

use rand::seq::SliceRandom;
use tracing::info;

use crate::colony::{Colony, Controller, FacilityKind};
use crate::core::types::{ColonyId, Timestamp};
use crate::npc::Personality;
use crate::world::{Env, World};

/// Override the founding values with rolls from the spawn ranges
fn roll_start(colony: &mut Colony, env: &mut Env) {
    let config = env.config();
    let s = &config.npc.spawn;

    colony.guard = env.span(s.guards);
    colony.adult = env.span(s.adults);
    colony.child = env.span(s.children);
    colony.baby = env.span(s.babies);
    colony.premium_food = env.span(s.premium_food).min(colony.premium_cap);
    colony.common_food = env.span(s.common_food).min(colony.common_cap);
    colony.meat_stock = env.span(s.meat_stock).min(colony.meat_cap);
    colony.material = env.span(s.material).min(colony.material_cap);
    colony.morale = env.span(s.morale).min(100);

    let shelters = env.span(s.shelters);
    for _ in colony.shelters..shelters {
        colony.complete_facility(FacilityKind::Shelter, config);
    }
    for _ in 0..env.span(s.breeding_pits) {
        colony.complete_facility(FacilityKind::BreedingPit, config);
    }
    for _ in 0..env.span(s.walls) {
        colony.complete_facility(FacilityKind::Wall, config);
    }
}

impl World {
    /// Found one NPC colony with rolled population, stock and facilities
    pub fn spawn_npc(&mut self, name: impl Into<String>, personality: Personality, now: Timestamp) -> ColonyId {
        let id = self.found_colony(name, Controller::Npc(personality), now);
        if let Some(colony) = self.store.colony_mut(id) {
            let mut env = Env::new(&self.ctx, &mut self.rng);
            roll_start(colony, &mut env);
        }
        id
    }

    /// Found `count` NPC colonies with random personalities. Names come from
    /// the configured pool, skipping names already taken.
    pub fn spawn_npcs(&mut self, count: u32, now: Timestamp) -> Vec<ColonyId> {
        let taken: Vec<String> = self.store.colonies.values().map(|c| c.name.clone()).collect();
        let mut names: Vec<String> = self
            .ctx
            .config
            .npc
            .names
            .iter()
            .filter(|n| !taken.contains(n))
            .cloned()
            .collect();
        names.shuffle(&mut self.rng);

        let mut spawned = Vec::with_capacity(count as usize);
        for i in 0..count {
            let name = names.pop().unwrap_or_else(|| format!("Outpost {}", taken.len() as u32 + i + 1));
            let personality = Personality::ALL
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(Personality::Peaceful);
            let id = self.spawn_npc(name, personality, now);
            info!(colony = %id, %personality, "npc colony founded");
            spawned.push(id);
        }
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::core::context::SimContext;

    fn world() -> World {
        World::new(SimContext::silent(GameConfig::default()), 99)
    }

    #[test]
    fn test_spawned_colony_is_within_ranges() {
        let mut world = world();
        let id = world.spawn_npc("Rolled", Personality::Cunning, Timestamp(0));
        let colony = world.colony(id).cloned().expect("spawned");

        assert_eq!(colony.personality(), Some(Personality::Cunning));
        assert!((1..=3).contains(&colony.guard));
        assert!((3..=8).contains(&colony.adult));
        assert!((5..=15).contains(&colony.child));
        assert!((40..=70).contains(&colony.morale));
        assert!((1..=2).contains(&colony.shelters));
        assert!(colony.walls <= 1);
        assert_eq!(colony.population_cap, 20 + 15 * (colony.shelters - 1));
        assert!(colony.check_invariants().is_ok());
    }

    #[test]
    fn test_spawn_uses_distinct_pool_names() {
        let mut world = world();
        let ids = world.spawn_npcs(5, Timestamp(0));
        assert_eq!(ids.len(), 5);

        let mut names: Vec<String> = ids
            .iter()
            .filter_map(|id| world.colony(*id).map(|c| c.name.clone()))
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
        for name in &names {
            assert!(world.ctx.config.npc.names.contains(name));
        }
    }

    #[test]
    fn test_spawn_beyond_pool_falls_back_to_numbered_names() {
        let mut world = world();
        let pool = world.ctx.config.npc.names.len() as u32;
        let ids = world.spawn_npcs(pool + 2, Timestamp(0));
        assert_eq!(ids.len() as u32, pool + 2);
        assert!(ids.iter().all(|id| world.colony(*id).is_some_and(|c| c.is_npc())));
    }
}
