//! Covert operations - multi-turn sabotage missions
//!
//! A mission is `Active` while its spy travels and settles into exactly one
//! terminal state. Terminal missions are never touched again.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::colony::{Colony, Resource, Tier};
use crate::core::types::{ColonyId, MissionId, Turn};
use crate::events::EventKind;
use crate::world::Env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionState {
    Active { remaining_turns: u32 },
    Success { food_destroyed: u32, babies_killed: u32 },
    Detected,
    /// The target was gone when the spy arrived
    Returned,
}

impl MissionState {
    pub fn is_active(&self) -> bool {
        matches!(self, MissionState::Active { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpyMission {
    pub id: MissionId,
    pub sender: ColonyId,
    pub target: ColonyId,
    pub dispatched_turn: Turn,
    pub state: MissionState,
}

impl SpyMission {
    pub fn new(id: MissionId, sender: ColonyId, target: ColonyId, dispatched_turn: Turn, travel_turns: u32) -> Self {
        Self {
            id,
            sender,
            target,
            dispatched_turn,
            state: MissionState::Active {
                remaining_turns: travel_turns.max(1),
            },
        }
    }

    pub fn involves(&self, colony: ColonyId) -> bool {
        self.sender == colony || self.target == colony
    }
}

/// Advance one mission by a turn of its sender, resolving it on arrival
pub fn advance(
    mission: &mut SpyMission,
    sender: &mut Colony,
    target: Option<&mut Colony>,
    env: &mut Env,
) -> MissionState {
    let remaining = match mission.state {
        MissionState::Active { remaining_turns } => remaining_turns.saturating_sub(1),
        terminal => return terminal,
    };
    if remaining > 0 {
        mission.state = MissionState::Active { remaining_turns: remaining };
        return mission.state;
    }

    let target = match target {
        Some(t) if !t.destroyed => t,
        _ => {
            mission.state = MissionState::Returned;
            env.log_flavored(sender, EventKind::Spy, "Our spy found nothing left to sabotage.", "spy", Some("returned"));
            return mission.state;
        }
    };

    let c = &env.config().covert;
    let mut detection = c.detection_chance;
    if target.watchtowers > 0 {
        detection += c.watchtower_detection_bonus;
    }

    if env.chance(detection) {
        mission.state = MissionState::Detected;
        let msg = format!("Our spy in {} was caught.", target.name);
        env.log_flavored(sender, EventKind::Spy, msg, "spy", Some("detected"));
        let msg = format!("A spy from {} was caught in the act.", sender.name);
        env.log_flavored(target, EventKind::Spy, msg, "spy", Some("enemy_detected"));
        return mission.state;
    }

    let share = env.ratio(c.sabotage_food);
    let food = (target.common_food as f64 * share) as u32;
    let food_destroyed = target.remove_resource(Resource::CommonFood, food);
    let babies_killed = target.remove_population(Tier::Baby, c.sabotage_baby_kill);
    sender.add_population(Tier::Adult, 1);

    mission.state = MissionState::Success {
        food_destroyed,
        babies_killed,
    };
    let msg = format!(
        "Sabotage in {} succeeded: {} food and {} babies destroyed.",
        target.name, food_destroyed, babies_killed
    );
    env.log_flavored(sender, EventKind::Spy, msg, "spy", Some("success"));
    let msg = format!(
        "Saboteurs struck: {} food and {} babies lost.",
        food_destroyed, babies_killed
    );
    env.log_flavored(target, EventKind::Sabotage, msg, "sabotage", Some("hit"));
    mission.state
}

/// Advance every active mission sent by `sender`
pub fn progress_missions(
    sender: &mut Colony,
    missions: &mut [SpyMission],
    colonies: &mut BTreeMap<ColonyId, Colony>,
    env: &mut Env,
) -> Vec<(MissionId, MissionState)> {
    let mut resolved = Vec::new();
    let sender_id = sender.id;
    for mission in missions
        .iter_mut()
        .filter(|m| m.sender == sender_id && m.state.is_active())
    {
        let target = colonies.get_mut(&mission.target);
        let state = advance(mission, sender, target, env);
        if !state.is_active() {
            resolved.push((mission.id, state));
        }
    }
    resolved
}
