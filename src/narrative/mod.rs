//! Flavor text provider
//!
//! Text never feeds back into the simulation. Lines are picked by an index
//! the caller supplies (usually the turn number), never by the world RNG, so
//! swapping the table or the locale cannot change an outcome.

use ahash::AHashMap;
use std::path::Path;

use crate::core::error::ConfigError;

const ENGLISH: &str = include_str!("../../data/narrative/en.toml");

/// Looks up human-readable lines by category key and optional sub-key
pub trait Narrative: Send + Sync {
    fn lines(&self, key: &str, sub: Option<&str>) -> Vec<String>;

    /// One line, chosen deterministically from `index`
    fn pick(&self, key: &str, sub: Option<&str>, index: u32) -> Option<String> {
        let lines = self.lines(key, sub);
        if lines.is_empty() {
            return None;
        }
        lines.get(index as usize % lines.len()).cloned()
    }
}

/// Narrative backed by a TOML table of string arrays
#[derive(Debug, Clone, Default)]
pub struct TableNarrative {
    entries: AHashMap<String, Vec<String>>,
}

impl TableNarrative {
    /// The bundled English table
    pub fn english() -> Result<Self, ConfigError> {
        Self::parse_toml(ENGLISH)
    }

    pub fn load_from_toml(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Accepts `key = [..]` and `[key] sub = [..]` entries
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content)?;
        let mut entries = AHashMap::new();

        for (key, value) in table {
            match value {
                toml::Value::Array(items) => {
                    entries.insert(key.clone(), string_lines(&key, items)?);
                }
                toml::Value::Table(subs) => {
                    for (sub, sub_value) in subs {
                        let full = format!("{}.{}", key, sub);
                        match sub_value {
                            toml::Value::Array(items) => {
                                let lines = string_lines(&full, items)?;
                                entries.insert(full, lines);
                            }
                            _ => {
                                return Err(ConfigError::Invalid(format!(
                                    "narrative entry '{}' must be an array of strings",
                                    full
                                )))
                            }
                        }
                    }
                }
                _ => {
                    return Err(ConfigError::Invalid(format!(
                        "narrative entry '{}' must be an array or a table",
                        key
                    )))
                }
            }
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn string_lines(key: &str, items: Vec<toml::Value>) -> Result<Vec<String>, ConfigError> {
    items
        .into_iter()
        .map(|item| match item {
            toml::Value::String(s) => Ok(s),
            other => Err(ConfigError::Invalid(format!(
                "narrative entry '{}' contains a non-string value: {}",
                key, other
            ))),
        })
        .collect()
}

impl Narrative for TableNarrative {
    fn lines(&self, key: &str, sub: Option<&str>) -> Vec<String> {
        let lookup = match sub {
            Some(sub) => format!("{}.{}", key, sub),
            None => key.to_string(),
        };
        self.entries.get(&lookup).cloned().unwrap_or_default()
    }
}

/// Narrative that has nothing to say
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Narrative for Silent {
    fn lines(&self, _key: &str, _sub: Option<&str>) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_table_parses() {
        let narrative = TableNarrative::english().expect("bundled table should parse");
        assert!(!narrative.is_empty());
        assert!(!narrative.lines("battle", Some("win")).is_empty());
        assert!(!narrative.lines("starvation", None).is_empty());
    }

    #[test]
    fn test_unknown_key_is_empty() {
        let narrative = TableNarrative::english().expect("bundled table should parse");
        assert!(narrative.lines("no_such_key", None).is_empty());
        assert_eq!(narrative.pick("no_such_key", Some("x"), 3), None);
    }

    #[test]
    fn test_pick_is_deterministic_by_index() {
        let narrative = TableNarrative::parse_toml(
            r#"
            [gather]
            big = ["one", "two", "three"]
            "#,
        )
        .expect("should parse");

        assert_eq!(narrative.pick("gather", Some("big"), 0).as_deref(), Some("one"));
        assert_eq!(narrative.pick("gather", Some("big"), 4).as_deref(), Some("two"));
        assert_eq!(
            narrative.pick("gather", Some("big"), 7),
            narrative.pick("gather", Some("big"), 7)
        );
    }

    #[test]
    fn test_non_string_entry_rejected() {
        let result = TableNarrative::parse_toml("starvation = [1, 2]");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_silent_has_nothing() {
        assert!(Silent.lines("battle", Some("win")).is_empty());
    }
}
