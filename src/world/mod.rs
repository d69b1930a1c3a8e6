//! World - the store, the context and the RNG, plus the commit boundary
//!
//! Every mutation of the store goes through [`World::transaction`] (directly
//! or via [`World::act`] / [`World::act_pair`]): the store is snapshotted,
//! the work runs, and the snapshot is restored if the work fails. Buffered
//! events are only written on success.

pub mod env;
pub mod runner;
pub mod store;

use rand::SeedableRng;

pub use env::Env;
pub use runner::BatchReport;
pub use store::Store;

use crate::colony::{Colony, Controller};
use crate::core::context::SimContext;
use crate::core::error::ActionError;
use crate::core::types::{ColonyId, SimRng, Timestamp};

pub struct World {
    pub ctx: SimContext,
    pub store: Store,
    pub rng: SimRng,
}

impl World {
    pub fn new(ctx: SimContext, seed: u64) -> Self {
        Self::from_store(ctx, Store::new(), seed)
    }

    pub fn from_store(ctx: SimContext, store: Store, seed: u64) -> Self {
        Self {
            ctx,
            store,
            rng: SimRng::seed_from_u64(seed),
        }
    }

    pub fn found_colony(&mut self, name: impl Into<String>, controller: Controller, now: Timestamp) -> ColonyId {
        self.store.found_colony(name, controller, &self.ctx.config, now)
    }

    pub fn colony(&self, id: ColonyId) -> Option<&Colony> {
        self.store.colony(id)
    }

    /// Run `f` as one unit: on `Err` the store is put back as it was.
    /// Colony removal is not undone, so `f` must not remove colonies.
    pub fn transaction<T, E>(&mut self, f: impl FnOnce(&mut World) -> Result<T, E>) -> Result<T, E> {
        let checkpoint = self.store.checkpoint();
        let result = f(self);
        if result.is_err() {
            self.store.rollback(checkpoint);
        }
        result
    }

    /// Run an action on a copy of one live colony and commit the copy on success
    pub fn act<T>(
        &mut self,
        id: ColonyId,
        f: impl FnOnce(&mut Colony, &mut Env) -> Result<T, ActionError>,
    ) -> Result<T, ActionError> {
        self.transaction(|world| {
            let mut colony = live_copy(&world.store, id)?;
            let mut env = Env::new(&world.ctx, &mut world.rng);
            let value = f(&mut colony, &mut env)?;
            env.flush(&mut world.store.events);
            world.store.colonies.insert(id, colony);
            Ok(value)
        })
    }

    /// Run an action on copies of two distinct live colonies and commit both
    /// together on success
    pub fn act_pair<T>(
        &mut self,
        first: ColonyId,
        second: ColonyId,
        f: impl FnOnce(&mut Colony, &mut Colony, &mut Env) -> Result<T, ActionError>,
    ) -> Result<T, ActionError> {
        if first == second {
            return Err(ActionError::InvalidTarget("a colony cannot target itself".into()));
        }
        self.transaction(|world| {
            let mut a = live_copy(&world.store, first)?;
            let mut b = match world.store.colony(second) {
                Some(c) if c.destroyed => {
                    return Err(ActionError::InvalidTarget(format!("{} is already destroyed", c.name)))
                }
                Some(c) => c.clone(),
                None => return Err(ActionError::InvalidTarget(format!("{} does not exist", second))),
            };
            let mut env = Env::new(&world.ctx, &mut world.rng);
            let value = f(&mut a, &mut b, &mut env)?;
            env.flush(&mut world.store.events);
            world.store.colonies.insert(first, a);
            world.store.colonies.insert(second, b);
            Ok(value)
        })
    }

    /// Delete a colony together with its queues, missions, offers and events
    pub fn remove_colony(&mut self, id: ColonyId) -> Option<Colony> {
        self.store.remove_colony(id)
    }
}

fn live_copy(store: &Store, id: ColonyId) -> Result<Colony, ActionError> {
    match store.colony(id) {
        None => Err(ActionError::UnknownColony(id)),
        Some(c) if c.destroyed => Err(ActionError::AlreadyDestroyed(id)),
        Some(c) => Ok(c.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::events::EventKind;

    fn test_world() -> World {
        let mut world = World::new(SimContext::silent(GameConfig::default()), 7);
        world.found_colony("Alpha", Controller::Player, Timestamp(0));
        world.found_colony("Beta", Controller::Player, Timestamp(0));
        world
    }

    #[test]
    fn test_failed_transaction_restores_store() {
        let mut world = test_world();
        let before = world.store.colonies.clone();

        let result: Result<(), &str> = world.transaction(|w| {
            if let Some(c) = w.store.colony_mut(ColonyId(0)) {
                c.material = 0;
            }
            Err("boom")
        });

        assert!(result.is_err());
        assert_eq!(world.store.colonies, before);
    }

    #[test]
    fn test_act_commits_and_flushes_on_success() {
        let mut world = test_world();
        world
            .act(ColonyId(0), |colony, env| {
                colony.material = 1;
                env.log(colony, EventKind::Build, "spent it all");
                Ok(())
            })
            .expect("action succeeds");

        assert_eq!(world.colony(ColonyId(0)).map(|c| c.material), Some(1));
        assert_eq!(world.store.events.len(), 1);
    }

    #[test]
    fn test_act_discards_copy_and_events_on_error() {
        let mut world = test_world();
        let result: Result<(), ActionError> = world.act(ColonyId(0), |colony, env| {
            colony.material = 1;
            env.log(colony, EventKind::Build, "never written");
            Err(ActionError::InvalidSelection("nope".into()))
        });

        assert!(result.is_err());
        assert_eq!(world.colony(ColonyId(0)).map(|c| c.material), Some(50));
        assert!(world.store.events.is_empty());
    }

    #[test]
    fn test_act_rejects_unknown_and_destroyed() {
        let mut world = test_world();
        assert_eq!(
            world.act(ColonyId(9), |_, _| Ok(())),
            Err(ActionError::UnknownColony(ColonyId(9)))
        );
        if let Some(c) = world.store.colony_mut(ColonyId(1)) {
            c.destroyed = true;
        }
        assert_eq!(
            world.act(ColonyId(1), |_, _| Ok(())),
            Err(ActionError::AlreadyDestroyed(ColonyId(1)))
        );
    }

    #[test]
    fn test_act_pair_commits_both_or_neither() {
        let mut world = test_world();
        world
            .act_pair(ColonyId(0), ColonyId(1), |a, b, _| {
                a.material -= 10;
                b.material += 10;
                Ok(())
            })
            .expect("transfer succeeds");
        assert_eq!(world.colony(ColonyId(0)).map(|c| c.material), Some(40));
        assert_eq!(world.colony(ColonyId(1)).map(|c| c.material), Some(60));

        let result: Result<(), ActionError> = world.act_pair(ColonyId(0), ColonyId(1), |a, _, _| {
            a.material = 0;
            Err(ActionError::InvalidSelection("abort".into()))
        });
        assert!(result.is_err());
        assert_eq!(world.colony(ColonyId(0)).map(|c| c.material), Some(40));
    }

    #[test]
    fn test_act_pair_rejects_self() {
        let mut world = test_world();
        assert!(matches!(
            world.act_pair(ColonyId(0), ColonyId(0), |_, _, _| Ok(())),
            Err(ActionError::InvalidTarget(_))
        ));
    }
}
