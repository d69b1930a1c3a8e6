//! Persistent state of the whole game
//!
//! The store is plain data: cloning it is a snapshot, and it round-trips
//! through JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::colony::{Colony, Controller};
use crate::combat::BattleLog;
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::types::{BattleId, ColonyId, MissionId, OfferId, Timestamp};
use crate::covert::SpyMission;
use crate::events::EventLog;
use crate::exchange::TradeOffer;

/// Everything needed to undo a unit of work. Battles and events are
/// append-only, so only their lengths are kept.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    colonies: BTreeMap<ColonyId, Colony>,
    missions: Vec<SpyMission>,
    offers: Vec<TradeOffer>,
    battles_len: usize,
    events_mark: (usize, u32),
    next_ids: [u32; 4],
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    pub colonies: BTreeMap<ColonyId, Colony>,
    pub missions: Vec<SpyMission>,
    /// Append-only
    pub battles: Vec<BattleLog>,
    pub offers: Vec<TradeOffer>,
    pub events: EventLog,

    next_colony_id: u32,
    next_mission_id: u32,
    next_battle_id: u32,
    next_offer_id: u32,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found_colony(
        &mut self,
        name: impl Into<String>,
        controller: Controller,
        config: &GameConfig,
        now: Timestamp,
    ) -> ColonyId {
        let id = ColonyId(self.next_colony_id);
        self.next_colony_id += 1;
        self.colonies.insert(id, Colony::founded(id, name, controller, config, now));
        id
    }

    /// Insert a colony built elsewhere, keeping id allocation ahead of it
    pub fn insert_colony(&mut self, colony: Colony) {
        self.next_colony_id = self.next_colony_id.max(colony.id.0 + 1);
        self.colonies.insert(colony.id, colony);
    }

    pub fn colony(&self, id: ColonyId) -> Option<&Colony> {
        self.colonies.get(&id)
    }

    pub fn colony_mut(&mut self, id: ColonyId) -> Option<&mut Colony> {
        self.colonies.get_mut(&id)
    }

    /// Ids of colonies that are still alive, in id order
    pub fn active_ids(&self) -> Vec<ColonyId> {
        self.colonies
            .values()
            .filter(|c| !c.destroyed)
            .map(|c| c.id)
            .collect()
    }

    pub fn is_active(&self, id: ColonyId) -> bool {
        self.colonies.get(&id).is_some_and(|c| !c.destroyed)
    }

    pub fn next_mission_id(&mut self) -> MissionId {
        let id = MissionId(self.next_mission_id);
        self.next_mission_id += 1;
        id
    }

    pub fn next_offer_id(&mut self) -> OfferId {
        let id = OfferId(self.next_offer_id);
        self.next_offer_id += 1;
        id
    }

    /// Assign the next battle id and append the record
    pub fn record_battle(&mut self, mut log: BattleLog) -> BattleId {
        let id = BattleId(self.next_battle_id);
        self.next_battle_id += 1;
        log.id = id;
        self.battles.push(log);
        id
    }

    pub fn peek_battle_id(&self) -> BattleId {
        BattleId(self.next_battle_id)
    }

    pub fn missions_sent_by(&self, sender: ColonyId) -> impl Iterator<Item = &SpyMission> {
        self.missions.iter().filter(move |m| m.sender == sender)
    }

    pub fn battles_of(&self, colony: ColonyId) -> impl Iterator<Item = &BattleLog> {
        self.battles.iter().filter(move |b| b.involves(colony))
    }

    /// Delete a colony and everything it owns or that points at it: its
    /// queues go with it, missions and offers naming it are dropped, its
    /// event stream is cleared. Battle records are history and stay.
    pub fn remove_colony(&mut self, id: ColonyId) -> Option<Colony> {
        let mut colony = self.colonies.remove(&id)?;
        colony.build_queue.clear();
        colony.train_queue.clear();
        self.missions.retain(|m| !m.involves(id));
        self.offers.retain(|o| !o.involves(id));
        self.events.remove_colony(id);
        Some(colony)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            colonies: self.colonies.clone(),
            missions: self.missions.clone(),
            offers: self.offers.clone(),
            battles_len: self.battles.len(),
            events_mark: self.events.mark(),
            next_ids: [
                self.next_colony_id,
                self.next_mission_id,
                self.next_battle_id,
                self.next_offer_id,
            ],
        }
    }

    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.colonies = checkpoint.colonies;
        self.missions = checkpoint.missions;
        self.offers = checkpoint.offers;
        self.battles.truncate(checkpoint.battles_len);
        self.events.rollback_to(checkpoint.events_mark);
        let [colony, mission, battle, offer] = checkpoint.next_ids;
        self.next_colony_id = colony;
        self.next_mission_id = mission;
        self.next_battle_id = battle;
        self.next_offer_id = offer;
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::{BuildQueueEntry, FacilityKind};

    fn store_with(n: usize) -> Store {
        let config = GameConfig::default();
        let mut store = Store::new();
        for i in 0..n {
            store.found_colony(format!("Colony {}", i), Controller::Player, &config, Timestamp(0));
        }
        store
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = store_with(3);
        let ids: Vec<_> = store.colonies.keys().copied().collect();
        assert_eq!(ids, vec![ColonyId(0), ColonyId(1), ColonyId(2)]);
    }

    #[test]
    fn test_active_ids_skip_destroyed() {
        let mut store = store_with(3);
        if let Some(c) = store.colony_mut(ColonyId(1)) {
            c.destroyed = true;
        }
        assert_eq!(store.active_ids(), vec![ColonyId(0), ColonyId(2)]);
        assert!(!store.is_active(ColonyId(1)));
        assert!(!store.is_active(ColonyId(9)));
    }

    #[test]
    fn test_remove_colony_drops_owned_and_referencing_state() {
        let mut store = store_with(3);
        if let Some(c) = store.colony_mut(ColonyId(0)) {
            c.build_queue.push(BuildQueueEntry { kind: FacilityKind::Wall, remaining_turns: 2 });
        }
        let m1 = store.next_mission_id();
        store.missions.push(SpyMission::new(m1, ColonyId(0), ColonyId(1), 0, 3));
        let m2 = store.next_mission_id();
        store.missions.push(SpyMission::new(m2, ColonyId(2), ColonyId(1), 0, 3));
        store.events.add_event(ColonyId(0), 0, crate::events::EventKind::Build, "x");

        let removed = store.remove_colony(ColonyId(0)).expect("colony exists");

        assert!(removed.build_queue.is_empty());
        assert!(store.colony(ColonyId(0)).is_none());
        assert_eq!(store.missions.len(), 1);
        assert_eq!(store.missions[0].sender, ColonyId(2));
        assert!(store.events.is_empty());
    }

    #[test]
    fn test_rollback_undoes_appends_and_edits() {
        let mut store = store_with(2);
        store.events.add_event(ColonyId(0), 0, crate::events::EventKind::Gather, "before");
        let checkpoint = store.checkpoint();

        store.found_colony("Late", Controller::Player, &GameConfig::default(), Timestamp(0));
        if let Some(c) = store.colony_mut(ColonyId(0)) {
            c.material = 0;
        }
        store.events.add_event(ColonyId(0), 0, crate::events::EventKind::Build, "after");
        let m = store.next_mission_id();
        store.missions.push(SpyMission::new(m, ColonyId(0), ColonyId(1), 0, 3));

        store.rollback(checkpoint);

        assert_eq!(store.colonies.len(), 2);
        assert_eq!(store.colony(ColonyId(0)).map(|c| c.material), Some(50));
        assert_eq!(store.events.len(), 1);
        assert!(store.missions.is_empty());
        assert_eq!(store.next_mission_id(), MissionId(0));
    }

    #[test]
    fn test_json_round_trip_preserves_colonies() {
        let store = store_with(2);
        let json = store.to_json().expect("serialize");
        let back = Store::from_json(&json).expect("deserialize");
        assert_eq!(back.colonies, store.colonies);
    }
}
