//! Borrowed view of everything a phase or action needs besides the store

use rand::Rng;
use tracing::debug;

use crate::colony::Colony;
use crate::core::config::GameConfig;
use crate::core::context::SimContext;
use crate::core::types::{ColonyId, Ratio, SimRng, Span, Turn};
use crate::events::{EventKind, EventLog};

/// Config, flavor text, the world RNG and a buffer of events raised so far.
///
/// Events are buffered and only reach the store's log through [`Env::flush`],
/// so work that is rolled back never leaves events behind.
pub struct Env<'a> {
    pub ctx: &'a SimContext,
    pub rng: &'a mut SimRng,
    pending: Vec<(ColonyId, Turn, EventKind, String)>,
}

impl<'a> Env<'a> {
    pub fn new(ctx: &'a SimContext, rng: &'a mut SimRng) -> Self {
        Self {
            ctx,
            rng,
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &'a GameConfig {
        &self.ctx.config
    }

    /// `true` with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Uniform integer in the inclusive span
    pub fn span(&mut self, span: Span) -> u32 {
        if span.min >= span.max {
            return span.min;
        }
        self.rng.gen_range(span.min..=span.max)
    }

    /// Uniform fraction in the inclusive ratio
    pub fn ratio(&mut self, ratio: Ratio) -> f64 {
        if ratio.min >= ratio.max {
            return ratio.min;
        }
        self.rng.gen_range(ratio.min..=ratio.max)
    }

    /// Flavor line for the colony's current turn
    pub fn flavor(&self, colony: &Colony, key: &str, sub: Option<&str>) -> String {
        self.ctx.flavor(key, sub, colony.turn_count)
    }

    /// Record an event against a colony at its current turn
    pub fn log(&mut self, colony: &Colony, kind: EventKind, message: impl Into<String>) {
        let message = message.into();
        debug!(colony = %colony.id, turn = colony.turn_count, ?kind, "{}", message);
        self.pending.push((colony.id, colony.turn_count, kind, message));
    }

    /// Record an event with a flavor line appended
    pub fn log_flavored(
        &mut self,
        colony: &Colony,
        kind: EventKind,
        message: impl Into<String>,
        key: &str,
        sub: Option<&str>,
    ) {
        let mut message = message.into();
        let flavor = self.flavor(colony, key, sub);
        if !flavor.is_empty() {
            message.push(' ');
            message.push_str(&flavor);
        }
        self.log(colony, kind, message);
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Move buffered events into the log, returning how many were written
    pub fn flush(&mut self, log: &mut EventLog) -> usize {
        let count = self.pending.len();
        for (colony, turn, kind, message) in self.pending.drain(..) {
            log.add_event(colony, turn, kind, message);
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::create_test_colony;
    use rand::SeedableRng;

    #[test]
    fn test_degenerate_ranges_return_min() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        assert_eq!(env.span(Span::new(4, 4)), 4);
        assert_eq!(env.ratio(Ratio::new(0.5, 0.5)), 0.5);
    }

    #[test]
    fn test_chance_extremes() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        for _ in 0..100 {
            assert!(!env.chance(0.0));
            assert!(env.chance(1.0));
        }
    }

    #[test]
    fn test_events_buffer_until_flushed() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let colony = create_test_colony(1);
        let mut log = EventLog::new();

        env.log(&colony, EventKind::Gather, "went gathering");
        assert_eq!(env.pending_events(), 1);
        assert!(log.is_empty());

        assert_eq!(env.flush(&mut log), 1);
        assert_eq!(log.len(), 1);
        assert_eq!(env.pending_events(), 0);
    }
}
