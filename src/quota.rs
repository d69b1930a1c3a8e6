//! Real-time turn quota
//!
//! Turns accrue on the wall clock, one every `regen_seconds`, up to a
//! maximum. Only whole intervals are credited; the remainder carries over.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::colony::Colony;
use crate::core::config::TurnConfig;
use crate::core::error::{ActionError, Result, SimError};
use crate::core::types::{ColonyId, Timestamp};
use crate::simulation::TurnReport;
use crate::world::runner::{tick, tick_and_decide};
use crate::world::World;

/// Credit the turns earned since the last regeneration. Returns how many
/// turns were added to the quota.
pub fn regenerate(colony: &mut Colony, now: Timestamp, t: &TurnConfig) -> u32 {
    let elapsed = now.since(colony.last_regen);
    let earned = elapsed / t.regen_seconds.max(1);
    if earned == 0 {
        return 0;
    }
    colony.last_regen = colony.last_regen.plus_secs(earned * t.regen_seconds);

    let before = colony.turn_quota;
    let earned = u32::try_from(earned).unwrap_or(u32::MAX);
    colony.turn_quota = colony.turn_quota.saturating_add(earned).min(t.quota_max);
    colony.turn_quota.saturating_sub(before)
}

/// Quota snapshot for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInfo {
    pub quota: u32,
    pub max: u32,
    /// Zero while the quota is full
    pub next_regen_seconds: u64,
    pub is_full: bool,
}

impl TurnInfo {
    /// Read the quota of an already regenerated colony
    pub fn of(colony: &Colony, now: Timestamp, t: &TurnConfig) -> Self {
        let is_full = colony.turn_quota >= t.quota_max;
        let next_regen_seconds = if is_full {
            0
        } else {
            t.regen_seconds.saturating_sub(now.since(colony.last_regen))
        };
        Self {
            quota: colony.turn_quota,
            max: t.quota_max,
            next_regen_seconds,
            is_full,
        }
    }
}

/// What spending one turn did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumedTurn {
    pub report: TurnReport,
    pub quota: TurnInfo,
    pub protection_refreshed: bool,
    /// NPC colonies advanced alongside this turn
    pub npc_ticks: Vec<ColonyId>,
}

impl World {
    /// Quota of a colony as of `now`, without committing the regeneration
    pub fn turn_info(&self, id: ColonyId, now: Timestamp) -> Option<TurnInfo> {
        let t = &self.ctx.config.turn;
        let mut colony = self.store.colony(id)?.clone();
        regenerate(&mut colony, now, t);
        Some(TurnInfo::of(&colony, now, t))
    }

    /// Spend one turn of a colony's quota and process that turn
    pub fn consume_turn(&mut self, id: ColonyId, now: Timestamp) -> Result<ConsumedTurn> {
        let (report, quota) = self.transaction(|world| {
            let t = world.ctx.config.turn.clone();
            let colony = world.store.colony_mut(id).ok_or(SimError::UnknownColony(id))?;
            if colony.destroyed {
                return Err(SimError::Action(ActionError::AlreadyDestroyed(id)));
            }
            regenerate(colony, now, &t);
            if colony.turn_quota == 0 {
                let info = TurnInfo::of(colony, now, &t);
                return Err(SimError::Action(ActionError::TurnQuotaExhausted {
                    next_regen_seconds: info.next_regen_seconds,
                }));
            }
            colony.turn_quota -= 1;
            let quota = TurnInfo::of(colony, now, &t);
            let report = tick(world, id)?;
            Ok((report, quota))
        })?;

        let protection_refreshed = if report.destroyed {
            false
        } else {
            self.refresh_protection(id)?
        };

        let mut npc_ticks = Vec::new();
        if self.ctx.config.turn.npc_sync_on_consume {
            let npcs: Vec<ColonyId> = self
                .store
                .colonies
                .values()
                .filter(|c| !c.destroyed && c.is_npc() && c.id != id)
                .map(|c| c.id)
                .collect();
            for npc in npcs {
                if !self.store.is_active(npc) {
                    continue;
                }
                match self.transaction(|world| tick_and_decide(world, npc)) {
                    Ok(_) => npc_ticks.push(npc),
                    Err(e) => warn!(colony = %npc, "npc tick rolled back: {}", e),
                }
            }
        }

        debug!(colony = %id, quota = quota.quota, npcs = npc_ticks.len(), "turn consumed");
        Ok(ConsumedTurn {
            report,
            quota,
            protection_refreshed,
            npc_ticks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::{create_test_colony, Controller};
    use crate::core::config::GameConfig;
    use crate::core::context::SimContext;
    use crate::npc::Personality;

    #[test]
    fn test_regeneration_carries_remainder() {
        let t = TurnConfig::default();
        let mut colony = create_test_colony(1);
        colony.turn_quota = 3;
        colony.last_regen = Timestamp(10_000);

        let added = regenerate(&mut colony, Timestamp(13_000), &t);

        assert_eq!(added, 2);
        assert_eq!(colony.turn_quota, 5);
        assert_eq!(colony.last_regen, Timestamp(12_400));
        let info = TurnInfo::of(&colony, Timestamp(13_000), &t);
        assert_eq!(info.next_regen_seconds, 600);
        assert!(!info.is_full);
    }

    #[test]
    fn test_regeneration_clamps_to_max() {
        let t = TurnConfig::default();
        let mut colony = create_test_colony(1);
        colony.turn_quota = 14;
        colony.last_regen = Timestamp(0);

        regenerate(&mut colony, Timestamp(1200 * 10), &t);

        assert_eq!(colony.turn_quota, 15);
        let info = TurnInfo::of(&colony, Timestamp(1200 * 10), &t);
        assert!(info.is_full);
        assert_eq!(info.next_regen_seconds, 0);
    }

    #[test]
    fn test_clock_going_backwards_earns_nothing() {
        let t = TurnConfig::default();
        let mut colony = create_test_colony(1);
        colony.last_regen = Timestamp(5_000);
        assert_eq!(regenerate(&mut colony, Timestamp(1_000), &t), 0);
        assert_eq!(colony.last_regen, Timestamp(5_000));
    }

    fn quota_world() -> World {
        let mut config = GameConfig::default();
        config.turn.npc_sync_on_consume = true;
        let mut world = World::new(SimContext::silent(config), 3);
        world.found_colony("Player", Controller::Player, Timestamp(0));
        world.found_colony("Npc", Controller::Npc(Personality::Peaceful), Timestamp(0));
        world
    }

    #[test]
    fn test_consume_turn_spends_quota_and_syncs_npcs() {
        let mut world = quota_world();

        let consumed = world.consume_turn(ColonyId(0), Timestamp(0)).expect("quota available");

        assert_eq!(consumed.quota.quota, 2);
        assert_eq!(consumed.report.turn, 1);
        assert_eq!(consumed.npc_ticks, vec![ColonyId(1)]);
        assert_eq!(world.colony(ColonyId(1)).map(|c| c.turn_count), Some(1));
    }

    #[test]
    fn test_exhausted_quota_is_refused_without_side_effects() {
        let mut world = quota_world();
        if let Some(c) = world.store.colony_mut(ColonyId(0)) {
            c.turn_quota = 0;
        }

        let result = world.consume_turn(ColonyId(0), Timestamp(600));

        match result {
            Err(SimError::Action(ActionError::TurnQuotaExhausted { next_regen_seconds })) => {
                assert_eq!(next_regen_seconds, 600)
            }
            other => panic!("expected exhausted quota, got {:?}", other.map(|c| c.quota)),
        }
        assert_eq!(world.colony(ColonyId(0)).map(|c| c.turn_count), Some(0));
        assert_eq!(world.colony(ColonyId(1)).map(|c| c.turn_count), Some(0));
    }

    #[test]
    fn test_turn_info_does_not_commit() {
        let world = quota_world();
        let info = world.turn_info(ColonyId(0), Timestamp(2400)).expect("colony exists");
        assert_eq!(info.quota, 5);
        assert_eq!(world.colony(ColonyId(0)).map(|c| c.turn_quota), Some(3));
    }
}
