//! Explicitly constructed simulation context
//!
//! Holds what every subsystem reads but never mutates: the balance table and
//! the flavor-text provider. It is passed to whoever needs it; there is no
//! global instance.

use crate::core::config::GameConfig;
use crate::core::error::ConfigError;
use crate::narrative::{Narrative, Silent, TableNarrative};

pub struct SimContext {
    pub config: GameConfig,
    pub narrative: Box<dyn Narrative>,
}

impl SimContext {
    pub fn new(config: GameConfig, narrative: Box<dyn Narrative>) -> Self {
        Self { config, narrative }
    }

    /// Config plus the bundled English narrative
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, Box::new(TableNarrative::english()?)))
    }

    /// Config with no flavor text at all
    pub fn silent(config: GameConfig) -> Self {
        Self::new(config, Box::new(Silent))
    }

    /// A flavor line for `key.sub`, empty when the table has none
    pub fn flavor(&self, key: &str, sub: Option<&str>, index: u32) -> String {
        self.narrative.pick(key, sub, index).unwrap_or_default()
    }
}

impl std::fmt::Debug for SimContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_config_loads_english() {
        let ctx = SimContext::with_config(GameConfig::default()).expect("default context");
        assert!(!ctx.flavor("battle", Some("win"), 0).is_empty());
    }

    #[test]
    fn test_silent_context_has_empty_flavor() {
        let ctx = SimContext::silent(GameConfig::default());
        assert_eq!(ctx.flavor("battle", Some("win"), 0), "");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.turn.action_points_per_turn = 0;
        assert!(SimContext::with_config(config).is_err());
    }
}
