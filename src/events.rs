//! Per-colony event stream

use serde::{Deserialize, Serialize};

use crate::core::types::{ColonyId, Turn};

/// A single entry in a colony's event stream
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColonyEvent {
    pub id: u32,
    pub colony: ColonyId,
    pub turn: Turn,
    pub kind: EventKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    // Actions
    Gather,
    Cull,
    Birth,
    Build,
    Train,
    Cure,
    Defense,
    Battle,
    Trade,

    // Turn pipeline
    Starvation,
    Morale,
    Cannibalism,
    Growth,
    Breeding,
    Disaster,
    Disease,
    Human,
    Rebellion,
    Addiction,
    Spy,
    Sabotage,
    Overcrowding,
    Protection,
    GameOver,
}

/// The complete event log of the world
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<ColonyEvent>,
    next_event_id: u32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(
        &mut self,
        colony: ColonyId,
        turn: Turn,
        kind: EventKind,
        message: impl Into<String>,
    ) -> u32 {
        let id = self.next_event_id;
        self.next_event_id += 1;

        self.events.push(ColonyEvent {
            id,
            colony,
            turn,
            kind,
            message: message.into(),
        });

        id
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events_for_colony(&self, colony: ColonyId) -> impl Iterator<Item = &ColonyEvent> {
        self.events.iter().filter(move |e| e.colony == colony)
    }

    pub fn events_of_kind(&self, kind: EventKind) -> impl Iterator<Item = &ColonyEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Most recent `n` events of one colony, newest first
    pub fn recent(&self, colony: ColonyId, n: usize) -> Vec<&ColonyEvent> {
        self.events
            .iter()
            .rev()
            .filter(|e| e.colony == colony)
            .take(n)
            .collect()
    }

    pub fn remove_colony(&mut self, colony: ColonyId) {
        self.events.retain(|e| e.colony != colony);
    }

    /// Position to roll back to; only valid while the log is append-only
    pub fn mark(&self) -> (usize, u32) {
        (self.events.len(), self.next_event_id)
    }

    pub fn rollback_to(&mut self, mark: (usize, u32)) {
        self.events.truncate(mark.0);
        self.next_event_id = mark.1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_ids_increment() {
        let mut log = EventLog::new();
        let a = log.add_event(ColonyId(1), 0, EventKind::Gather, "first");
        let b = log.add_event(ColonyId(2), 0, EventKind::Battle, "second");
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_recent_is_newest_first_and_filtered() {
        let mut log = EventLog::new();
        log.add_event(ColonyId(1), 1, EventKind::Gather, "a");
        log.add_event(ColonyId(2), 1, EventKind::Gather, "b");
        log.add_event(ColonyId(1), 2, EventKind::Build, "c");

        let recent = log.recent(ColonyId(1), 5);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "c");
        assert_eq!(recent[1].message, "a");
    }

    #[test]
    fn test_rollback_reuses_ids() {
        let mut log = EventLog::new();
        log.add_event(ColonyId(1), 1, EventKind::Gather, "kept");
        let mark = log.mark();
        log.add_event(ColonyId(1), 1, EventKind::Gather, "dropped");
        log.rollback_to(mark);
        assert_eq!(log.len(), 1);
        assert_eq!(log.add_event(ColonyId(1), 2, EventKind::Build, "next"), 1);
    }

    #[test]
    fn test_remove_colony_drops_its_events() {
        let mut log = EventLog::new();
        log.add_event(ColonyId(1), 1, EventKind::Gather, "a");
        log.add_event(ColonyId(2), 1, EventKind::Gather, "b");
        log.remove_colony(ColonyId(1));
        assert_eq!(log.events_for_colony(ColonyId(1)).count(), 0);
        assert_eq!(log.events_of_kind(EventKind::Gather).count(), 1);
    }
}
