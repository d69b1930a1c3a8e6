//! Colony Sim - turn-based colony management simulation engine
//!
//! Colonies of a boss, guards, adults, children and babies live off capped
//! food and material stores. Time advances one colony turn at a time through
//! a fixed pipeline of economy and crisis phases; colonies raid and spy on
//! each other, trade, and NPC colonies decide for themselves.

pub mod actions;
pub mod colony;
pub mod combat;
pub mod core;
pub mod covert;
pub mod economy;
pub mod events;
pub mod exchange;
pub mod narrative;
pub mod npc;
pub mod protection;
pub mod quota;
pub mod simulation;
pub mod world;
