//! Probabilistic crisis phases, each run once per turn in pipeline order

pub mod addiction;
pub mod cannibalism;
pub mod disasters;
pub mod disease;
pub mod human;
pub mod rebellion;
