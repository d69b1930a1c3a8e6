//! NPC colonies driving the world through the ordinary action entry points

use std::collections::BTreeSet;

use colony_sim::colony::Controller;
use colony_sim::core::config::GameConfig;
use colony_sim::core::context::SimContext;
use colony_sim::core::types::{ColonyId, Timestamp};
use colony_sim::npc::{take_turn, Personality};
use colony_sim::world::World;

fn stocked_npc(world: &mut World, name: &str, personality: Personality) -> ColonyId {
    let id = world.found_colony(name, Controller::Npc(personality), Timestamp(0));
    let colony = world.store.colony_mut(id).expect("just founded");
    colony.guard = 10;
    colony.adult = 20;
    colony.population_cap = 60;
    colony.common_food = colony.common_cap;
    colony.premium_food = colony.premium_cap;
    colony.meat_stock = colony.meat_cap;
    id
}

#[test]
fn test_long_run_keeps_every_invariant() {
    let mut world = World::new(SimContext::silent(GameConfig::default()), 3);
    world.spawn_npcs(8, Timestamp(0));
    world.found_colony("Player", Controller::Player, Timestamp(0));

    let mut fallen = BTreeSet::new();
    for _ in 0..120 {
        let report = world.process_all();
        assert!(report.failed.is_empty(), "rolled back: {:?}", report.failed);

        for colony in world.store.colonies.values() {
            assert!(colony.check_invariants().is_ok(), "{}: {:?}", colony.name, colony.check_invariants());
            if fallen.contains(&colony.id) {
                assert!(colony.destroyed, "{} came back to life", colony.name);
            }
            if colony.destroyed {
                fallen.insert(colony.id);
            }
        }
    }
}

#[test]
fn test_aggressive_npc_raids_an_armed_neighbour() {
    let mut world = World::new(SimContext::silent(GameConfig::default()), 8);
    let raider = stocked_npc(&mut world, "Raider", Personality::Aggressive);
    let victim = stocked_npc(&mut world, "Victim", Personality::Peaceful);

    world.process_all();

    assert!(!world.store.battles.is_empty());
    assert_eq!(world.store.battles[0].attacker, raider);
    assert_eq!(world.store.battles[0].defender, victim);
}

#[test]
fn test_protected_colonies_are_never_raided() {
    let mut world = World::new(SimContext::silent(GameConfig::default()), 12);
    stocked_npc(&mut world, "Berserker", Personality::Berserk);
    // no guards, so protected for the whole run
    world.found_colony("Player", Controller::Player, Timestamp(0));

    for _ in 0..8 {
        world.process_all();
    }

    assert!(world.store.battles.is_empty());
}

#[test]
fn test_npc_never_overspends_action_points() {
    let mut world = World::new(SimContext::silent(GameConfig::default()), 21);
    for p in Personality::ALL {
        stocked_npc(&mut world, p.name(), p);
    }

    for id in world.store.active_ids() {
        let turn = take_turn(&mut world, id);
        assert!(turn.succeeded.len() <= turn.attempted.len());
        assert!(turn.attempted.len() <= 4);
    }
    for colony in world.store.colonies.values() {
        assert!(colony.action_points <= 3);
        assert!(colony.check_invariants().is_ok());
    }
}

#[test]
fn test_spawned_colonies_are_npcs_with_pool_names() {
    let mut world = World::new(SimContext::silent(GameConfig::default()), 30);
    let ids = world.spawn_npcs(4, Timestamp(0));

    for id in ids {
        let colony = world.colony(id).expect("spawned");
        assert!(colony.is_npc());
        assert!(world.ctx.config.npc.names.contains(&colony.name));
    }
}
