//! Turn trigger entry points
//!
//! Both the single-colony path and the batch path go through [`tick`], so a
//! player-driven turn and a scheduled turn run the identical phase sequence.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::core::error::{Result, SimError};
use crate::core::types::ColonyId;
use crate::npc;
use crate::simulation::{run_pipeline, TurnReport};
use crate::world::{Env, World};

/// Outcome of one scheduled tick over every active colony
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub processed: Vec<ColonyId>,
    pub failed: Vec<(ColonyId, String)>,
    /// Colonies that were alive when the tick started and are not anymore
    pub destroyed: Vec<ColonyId>,
}

impl World {
    /// Process one turn of one colony as a single unit of work
    pub fn process_turn(&mut self, id: ColonyId) -> Result<TurnReport> {
        self.transaction(|world| tick(world, id))
    }

    /// Process one turn of every active colony in id order. NPC colonies
    /// also take their decisions inside the same unit. A colony that fails
    /// is rolled back and the batch moves on.
    pub fn process_all(&mut self) -> BatchReport {
        let ids = self.store.active_ids();
        let mut report = BatchReport::default();

        for &id in &ids {
            // Killed earlier in this tick by someone else's attack
            if !self.store.is_active(id) {
                continue;
            }
            match self.transaction(|world| tick_and_decide(world, id)) {
                Ok(_) => report.processed.push(id),
                Err(e) => {
                    error!(colony = %id, "turn rolled back: {}", e);
                    report.failed.push((id, e.to_string()));
                }
            }
        }

        report.destroyed = ids.into_iter().filter(|id| !self.store.is_active(*id)).collect();
        info!(
            processed = report.processed.len(),
            failed = report.failed.len(),
            destroyed = report.destroyed.len(),
            "batch tick complete"
        );
        report
    }
}

/// One colony's share of a scheduled tick: its pipeline, then its
/// decisions if it is an NPC
pub(crate) fn tick_and_decide(world: &mut World, id: ColonyId) -> Result<TurnReport> {
    let turn = tick(world, id)?;
    if !turn.destroyed && world.store.colony(id).is_some_and(|c| c.is_npc()) {
        npc::take_turn(world, id);
    }
    Ok(turn)
}

/// Run the pipeline for one colony. Callers wrap this in a transaction: on
/// error the store may be half-updated.
pub(crate) fn tick(world: &mut World, id: ColonyId) -> Result<TurnReport> {
    let World { ctx, store, rng } = world;

    let mut colony = store.colonies.remove(&id).ok_or(SimError::UnknownColony(id))?;
    if colony.destroyed {
        store.colonies.insert(id, colony);
        return Err(SimError::Destroyed(id));
    }

    let mut missions = std::mem::take(&mut store.missions);
    let mut env = Env::new(ctx, rng);
    let report = run_pipeline(&mut colony, &mut missions, &mut store.colonies, &mut env);
    store.missions = missions;
    store.colonies.insert(id, colony);

    let mut touched = vec![id];
    for (mission_id, _) in &report.missions_resolved {
        if let Some(m) = store.missions.iter().find(|m| m.id == *mission_id) {
            touched.push(m.target);
        }
    }
    for colony in touched.iter().filter_map(|t| store.colony(*t)) {
        colony
            .check_invariants()
            .map_err(|detail| SimError::InvariantViolated { colony: colony.id, detail })?;
    }

    let written = env.flush(&mut store.events);
    debug!(colony = %id, turn = report.turn, events = written, "turn processed");
    if report.destroyed {
        info!(colony = %id, turn = report.turn, "colony destroyed");
    }
    Ok(report)
}
