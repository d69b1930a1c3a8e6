//! NPC colonies - personalities, passive trickle, decisions and spawning
//!
//! NPCs act only through the public action entry points, so they obey every
//! rule a player does.

pub mod engine;
pub mod personality;
pub mod spawn;
pub mod strategies;
pub mod trickle;

pub use engine::{take_turn, NpcTurn};
pub use personality::Personality;
pub use strategies::Strategy;
pub use trickle::Trickle;
