//! Per-colony turn pipeline
//!
//! Fifteen phases in a fixed order. Later phases see what earlier phases did,
//! so the order is part of the game rules. A phase that destroys the colony
//! ends the pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::colony::Colony;
use crate::core::types::{ColonyId, MissionId, Turn};
use crate::covert::{self, MissionState, SpyMission};
use crate::economy::StarvationOutcome;
use crate::simulation::crisis;
use crate::simulation::progression;
use crate::world::Env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Reset,
    Food,
    Cannibalism,
    BuildQueue,
    TrainQueue,
    Growth,
    Breeding,
    Disasters,
    Disease,
    HumanEvents,
    Rebellion,
    Addiction,
    Covert,
    Overcrowding,
    Timers,
}

pub const PHASE_ORDER: [Phase; 15] = [
    Phase::Reset,
    Phase::Food,
    Phase::Cannibalism,
    Phase::BuildQueue,
    Phase::TrainQueue,
    Phase::Growth,
    Phase::Breeding,
    Phase::Disasters,
    Phase::Disease,
    Phase::HumanEvents,
    Phase::Rebellion,
    Phase::Addiction,
    Phase::Covert,
    Phase::Overcrowding,
    Phase::Timers,
];

/// What happened to one colony during one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub colony: ColonyId,
    pub turn: Turn,
    pub phases_run: Vec<Phase>,
    pub starvation: Option<StarvationOutcome>,
    pub missions_resolved: Vec<(MissionId, MissionState)>,
    pub destroyed: bool,
}

/// Run the pipeline on a colony taken out of the store. `colonies` holds
/// every other colony, reachable by the covert phase.
pub fn run_pipeline(
    colony: &mut Colony,
    missions: &mut [SpyMission],
    colonies: &mut BTreeMap<ColonyId, Colony>,
    env: &mut Env,
) -> TurnReport {
    let mut report = TurnReport {
        colony: colony.id,
        turn: colony.turn_count,
        phases_run: Vec::with_capacity(PHASE_ORDER.len()),
        starvation: None,
        missions_resolved: Vec::new(),
        destroyed: false,
    };

    for phase in PHASE_ORDER {
        match phase {
            Phase::Reset => progression::reset(colony, env),
            Phase::Food => report.starvation = progression::food(colony, env),
            Phase::Cannibalism => crisis::cannibalism::run(colony, env),
            Phase::BuildQueue => progression::build_queue(colony, env),
            Phase::TrainQueue => progression::train_queue(colony, env),
            Phase::Growth => progression::growth(colony, env),
            Phase::Breeding => progression::breeding(colony, env),
            Phase::Disasters => crisis::disasters::run(colony, env),
            Phase::Disease => crisis::disease::run(colony, env),
            Phase::HumanEvents => crisis::human::run(colony, env),
            Phase::Rebellion => crisis::rebellion::run(colony, env),
            Phase::Addiction => crisis::addiction::run(colony, env),
            Phase::Covert => {
                report.missions_resolved = covert::progress_missions(colony, missions, colonies, env)
            }
            Phase::Overcrowding => progression::overcrowding(colony, env),
            Phase::Timers => progression::timers(colony, env),
        }
        report.phases_run.push(phase);

        if colony.destroyed {
            report.destroyed = true;
            break;
        }
    }

    report.turn = colony.turn_count;
    report
}
