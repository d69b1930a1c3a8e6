//! One NPC decision round: trickle, then the personality's strategies in order

use serde::Serialize;
use tracing::debug;

use crate::core::types::ColonyId;
use crate::npc::trickle::{self, Trickle};
use crate::world::World;

/// What an NPC did with its turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NpcTurn {
    pub trickle: Trickle,
    pub attempted: Vec<&'static str>,
    pub succeeded: Vec<&'static str>,
}

/// Let an NPC colony act. Players, destroyed and unknown colonies are
/// left alone. A strategy that does not apply or whose action is refused
/// is skipped; the loop ends when action points run out.
pub fn take_turn(world: &mut World, id: ColonyId) -> NpcTurn {
    let mut turn = NpcTurn::default();
    let Some(personality) = world.colony(id).filter(|c| !c.destroyed).and_then(|c| c.personality()) else {
        return turn;
    };

    match world.act(id, |colony, env| Ok(trickle::apply(colony, env, personality))) {
        Ok(t) => turn.trickle = t,
        Err(e) => {
            debug!(colony = %id, "npc trickle refused: {}", e);
            return turn;
        }
    }

    for strategy in personality.strategies() {
        let Some(colony) = world.colony(id) else { break };
        if colony.destroyed || colony.action_points == 0 {
            break;
        }
        turn.attempted.push(strategy.name);
        if (strategy.run)(world, id) {
            turn.succeeded.push(strategy.name);
        }
    }

    debug!(
        colony = %id,
        %personality,
        attempted = ?turn.attempted,
        succeeded = ?turn.succeeded,
        "npc turn"
    );
    turn
}
