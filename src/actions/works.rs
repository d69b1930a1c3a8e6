//! Construction

use crate::actions::{admit, say, traced, ActionKind, ActionReport, ActionResult};
use crate::colony::{BuildQueueEntry, Colony, FacilityKind, Resource};
use crate::core::error::ActionError;
use crate::core::types::ColonyId;
use crate::events::EventKind;
use crate::world::{Env, World};

/// Pay for a facility and queue it. Returns the build time in turns.
pub fn build(colony: &mut Colony, env: &mut Env, kind: FacilityKind) -> ActionResult<u32> {
    let config = env.config();
    let cost = admit(colony, ActionKind::Build, config)?;
    let spec = config.facilities.spec(kind);

    if colony.material < spec.material_cost {
        return Err(ActionError::InsufficientResource {
            resource: Resource::Material,
            required: spec.material_cost,
        });
    }

    colony.remove_resource(Resource::Material, spec.material_cost);
    colony.action_points -= cost;
    let turns = spec.turns.max(1);
    colony.build_queue.push(BuildQueueEntry {
        kind,
        remaining_turns: turns,
    });

    let mut messages = Vec::new();
    say(env, colony, "build", Some("start"), &mut messages);
    let summary = format!("Started building a {} ({} turns).", kind, turns);
    env.log(colony, EventKind::Build, summary.clone());
    messages.push(summary);
    Ok(ActionReport::new(turns, messages))
}

impl World {
    pub fn build(&mut self, id: ColonyId, kind: FacilityKind) -> ActionResult<u32> {
        let result = self.act(id, |colony, env| build(colony, env, kind));
        traced(id, ActionKind::Build, result)
    }

    /// Build by facility key, e.g. `"breeding_pit"`
    pub fn build_named(&mut self, id: ColonyId, key: &str) -> ActionResult<u32> {
        let kind = key.parse::<FacilityKind>();
        match kind {
            Ok(kind) => self.build(id, kind),
            Err(e) => traced(id, ActionKind::Build, Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::{create_test_colony, Controller};
    use crate::core::config::GameConfig;
    use crate::core::context::SimContext;
    use crate::core::types::{SimRng, Timestamp};
    use rand::SeedableRng;

    #[test]
    fn test_build_queues_and_pays() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);

        let report = build(&mut colony, &mut env, FacilityKind::Wall).expect("build starts");

        assert_eq!(report.data, 4);
        assert_eq!(colony.material, 10);
        assert_eq!(
            colony.build_queue,
            vec![BuildQueueEntry { kind: FacilityKind::Wall, remaining_turns: 4 }]
        );
        assert_eq!(colony.walls, 0);
    }

    #[test]
    fn test_build_needs_material() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);
        colony.material = 20;

        let result = build(&mut colony, &mut env, FacilityKind::Shelter);

        assert_eq!(
            result.map(|r| r.data),
            Err(ActionError::InsufficientResource { resource: Resource::Material, required: 30 })
        );
        assert!(colony.build_queue.is_empty());
    }

    #[test]
    fn test_build_named_rejects_unknown() {
        let mut world = World::new(SimContext::silent(GameConfig::default()), 1);
        let id = world.found_colony("A", Controller::Player, Timestamp(0));
        assert!(matches!(world.build_named(id, "castle"), Err(ActionError::InvalidSelection(_))));
        assert_eq!(world.build_named(id, "breeding_pit").map(|r| r.data), Ok(2));
    }
}
