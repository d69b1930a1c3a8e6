//! Resource economy - nutrition accounting and capped arithmetic

pub mod nutrition;

pub use nutrition::{apply_starvation, available, consume_nutrition, upkeep, StarvationOutcome};
