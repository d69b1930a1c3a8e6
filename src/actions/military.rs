//! Raids, spies and the home guard

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::actions::{admit, say, traced, ActionKind, ActionReport, ActionResult};
use crate::colony::Colony;
use crate::combat::{self, AttackOrder, BattleLog};
use crate::core::error::ActionError;
use crate::core::types::{BattleId, ColonyId, MissionId};
use crate::covert::SpyMission;
use crate::events::EventKind;
use crate::protection::is_protected;
use crate::world::{Env, World};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackReport {
    pub battle: BattleId,
    pub log: BattleLog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpyDispatch {
    pub mission: MissionId,
    pub travel_turns: u32,
}

/// Hold guards and adults back from raids. They still defend either way.
pub fn set_defense_posture(colony: &mut Colony, env: &mut Env, guards: u32, adults: u32) -> ActionResult<(u32, u32)> {
    let cost = admit(colony, ActionKind::SetDefensePosture, env.config())?;
    if guards > colony.guard || adults > colony.adult {
        return Err(ActionError::InsufficientPopulation(format!(
            "posture asks for {} guards and {} adults, have {} and {}",
            guards, adults, colony.guard, colony.adult
        )));
    }

    colony.action_points -= cost;
    colony.deployed_defense_guards = guards;
    colony.deployed_defense_adults = adults;

    let summary = format!("Defense posture: {} guards and {} adults stay home.", guards, adults);
    env.log(colony, EventKind::Defense, summary.clone());
    Ok(ActionReport::new((guards, adults), vec![summary]))
}

/// Raid checks that need both colonies; the target is already known to exist
/// and be alive
fn raid(
    attacker: &mut Colony,
    defender: &mut Colony,
    env: &mut Env,
    order: AttackOrder,
    id: BattleId,
) -> ActionResult<BattleLog> {
    let config = env.config();
    let cost = admit(attacker, ActionKind::Attack, config)?;
    if is_protected(attacker, &config.protection) {
        return Err(ActionError::ProtectedTarget(attacker.id));
    }
    if is_protected(defender, &config.protection) {
        return Err(ActionError::ProtectedTarget(defender.id));
    }
    let commitment = combat::commit_forces(attacker, order)?;

    attacker.action_points -= cost;
    let log = combat::resolve(attacker, defender, commitment, id, env);

    let mut messages = Vec::new();
    let sub = if log.attacker_wins { "win" } else { "loss" };
    say(env, attacker, "battle", Some(sub), &mut messages);
    messages.push(format!(
        "{} against {}: power {} vs {} (ratio {:.2}).",
        if log.attacker_wins { "Victory" } else { "Defeat" },
        defender.name,
        log.attack_power,
        log.defense_power,
        log.power_ratio
    ));
    Ok(ActionReport::new(log, messages))
}

impl World {
    pub fn set_defense_posture(&mut self, id: ColonyId, guards: u32, adults: u32) -> ActionResult<(u32, u32)> {
        let result = self.act(id, |colony, env| set_defense_posture(colony, env, guards, adults));
        traced(id, ActionKind::SetDefensePosture, result)
    }

    /// Raid another colony. Both sides and the battle record are committed
    /// together.
    pub fn attack(&mut self, attacker: ColonyId, target: ColonyId, order: AttackOrder) -> ActionResult<AttackReport> {
        let result = self.transaction(|world| {
            let id = world.store.peek_battle_id();
            let report = world.act_pair(attacker, target, |a, d, env| raid(a, d, env, order, id))?;
            let log = report.data.clone();
            let battle = world.store.record_battle(log.clone());
            if log.defender_destroyed {
                info!(colony = %target, by = %attacker, "colony destroyed in battle");
            }
            if log.attacker_destroyed {
                info!(colony = %attacker, "colony destroyed attacking");
            }
            Ok(report.map(|log| AttackReport { battle, log }))
        });
        traced(attacker, ActionKind::Attack, result)
    }

    /// Send one adult to sabotage `target`
    pub fn dispatch_spy(&mut self, sender: ColonyId, target: ColonyId) -> ActionResult<SpyDispatch> {
        let target_name = self
            .store
            .colony(target)
            .filter(|t| !t.destroyed && t.id != sender)
            .map(|t| t.name.clone());

        let result = self.transaction(|world| {
            let travel_turns = world.ctx.config.covert.travel_turns.max(1);
            let report = world.act(sender, |colony, env| {
                let config = env.config();
                let cost = admit(colony, ActionKind::DispatchSpy, config)?;
                if colony.adult < config.covert.min_adults {
                    return Err(ActionError::InsufficientPopulation(format!(
                        "a spy needs at least {} adults at home",
                        config.covert.min_adults
                    )));
                }
                let name = target_name
                    .clone()
                    .ok_or_else(|| ActionError::InvalidTarget(format!("{} cannot be spied on", target)))?;

                colony.action_points -= cost;
                colony.adult -= 1;

                let mut messages = Vec::new();
                say(env, colony, "spy", Some("depart"), &mut messages);
                let summary = format!("A spy left for {} ({} turns).", name, travel_turns);
                env.log(colony, EventKind::Spy, summary.clone());
                messages.push(summary);
                Ok(ActionReport::new(colony.turn_count, messages))
            })?;

            let mission = world.store.next_mission_id();
            world
                .store
                .missions
                .push(SpyMission::new(mission, sender, target, report.data, travel_turns));
            Ok(report.map(|_| SpyDispatch { mission, travel_turns }))
        });
        traced(sender, ActionKind::DispatchSpy, result)
    }
}
