//! Turn processing - the ordered per-colony phase pipeline

pub mod crisis;
pub mod progression;
pub mod turn;

pub use turn::{run_pipeline, Phase, TurnReport, PHASE_ORDER};
