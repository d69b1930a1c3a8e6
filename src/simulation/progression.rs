//! Non-crisis phases: turn reset, food, queues, growth, breeding, crowding, timers

use crate::colony::{Colony, Tier};
use crate::economy::{self, StarvationOutcome};
use crate::events::EventKind;
use crate::world::Env;

/// Phase 1: new turn, fresh action points, commitments clamped to who is left
pub fn reset(colony: &mut Colony, env: &mut Env) {
    colony.turn_count += 1;
    colony.action_points = env.config().turn.action_points_per_turn;
    colony.clamp_deployments();
}

/// Phase 2: eat, track the low-food streak, starve on shortage
pub fn food(colony: &mut Colony, env: &mut Env) -> Option<StarvationOutcome> {
    let config = env.config();
    let n = &config.nutrition;

    let needed = economy::upkeep(colony, n);
    let shortage = economy::consume_nutrition(colony, needed, n);

    if colony.premium_food == 0 && colony.meat_stock == 0 {
        colony.consecutive_low_food_turns += 1;
    } else {
        colony.consecutive_low_food_turns = 0;
    }
    if colony.consecutive_low_food_turns >= n.low_food_streak_threshold {
        colony.adjust_morale(n.low_food_morale_penalty);
        let msg = format!(
            "{} turns of nothing but scraps.",
            colony.consecutive_low_food_turns
        );
        env.log_flavored(colony, EventKind::Morale, msg, "low_food", None);
    }

    if shortage == 0 {
        return None;
    }

    let outcome = economy::apply_starvation(colony, shortage, config);
    let msg = format!(
        "Famine! Short {} NP: {} babies, {} children and {} adults starved.",
        shortage, outcome.babies, outcome.children, outcome.adults
    );
    env.log_flavored(colony, EventKind::Starvation, msg, "starvation", None);
    if outcome.destroyed {
        env.log_flavored(colony, EventKind::GameOver, "The boss starved to death.", "game_over", None);
    }
    Some(outcome)
}

/// Phase 4: advance construction, finishing entries apply their effect once
pub fn build_queue(colony: &mut Colony, env: &mut Env) {
    let config = env.config();
    let mut finished = Vec::new();

    colony.build_queue.retain_mut(|entry| {
        entry.remaining_turns = entry.remaining_turns.saturating_sub(1);
        if entry.remaining_turns == 0 {
            finished.push(entry.kind);
            false
        } else {
            true
        }
    });

    for kind in finished {
        colony.complete_facility(kind, config);
        let msg = format!("Construction of a {} is complete.", kind);
        env.log_flavored(colony, EventKind::Build, msg, "build", Some("done"));
    }
}

/// Phase 5: advance guard training, each graduate rolls for success
pub fn train_queue(colony: &mut Colony, env: &mut Env) {
    let before = colony.train_queue.len();
    colony.train_queue.retain_mut(|entry| {
        entry.remaining_turns = entry.remaining_turns.saturating_sub(1);
        entry.remaining_turns > 0
    });
    let graduates = before - colony.train_queue.len();

    let chance = env.config().training.success_chance;
    for _ in 0..graduates {
        if env.chance(chance) {
            colony.add_population(Tier::Guard, 1);
            env.log_flavored(colony, EventKind::Train, "Training complete: a new guard!", "train", Some("success"));
        } else {
            colony.add_population(Tier::Adult, 1);
            env.log_flavored(colony, EventKind::Train, "Training failed; the trainee returns to work.", "train", Some("failure"));
        }
    }
}

/// Phase 6: children grow up while there is room
pub fn growth(colony: &mut Colony, env: &mut Env) {
    let chance = env.config().growth.child_promotion_chance;
    let mut promoted = 0;

    // Promotion moves a child to adult, so total population is unchanged by
    // it; the cap gate is evaluated against the population at turn start.
    for _ in 0..colony.child {
        if env.chance(chance) && colony.total_population() < colony.population_cap {
            promoted += 1;
        }
    }

    if promoted > 0 {
        colony.remove_population(Tier::Child, promoted);
        colony.add_population(Tier::Adult, promoted);
        let msg = format!("{} children grew into adults.", promoted);
        env.log_flavored(colony, EventKind::Growth, msg, "growth", None);
    }
}

/// Phase 7: breeding pits produce babies up to their capacity
pub fn breeding(colony: &mut Colony, env: &mut Env) {
    if colony.breeding_pits == 0 {
        return;
    }
    let config = env.config();

    let mut produced = 0;
    for _ in 0..colony.breeding_pits {
        produced += env.span(config.growth.pit_babies);
    }

    let capacity = colony.baby_capacity(config.facilities.breeding_pit_baby_capacity);
    let born = produced.min(capacity.saturating_sub(colony.baby));
    if born > 0 {
        colony.add_population(Tier::Baby, born);
        let msg = format!("{} babies crawled out of the breeding pits.", born);
        env.log_flavored(colony, EventKind::Breeding, msg, "breeding", None);
    }
}

/// Phase 14: evict the excess, children first, then adults
pub fn overcrowding(colony: &mut Colony, env: &mut Env) {
    let excess = colony.total_population().saturating_sub(colony.population_cap);
    if excess == 0 {
        return;
    }

    let children = colony.remove_population(Tier::Child, excess);
    let adults = colony.remove_population(Tier::Adult, excess - children);
    colony.clamp_deployments();

    let msg = format!(
        "Overcrowded! {} children and {} adults left the colony.",
        children, adults
    );
    env.log_flavored(colony, EventKind::Overcrowding, msg, "overcrowding", None);
}

/// Phase 15: penalty and lockout timers tick down
pub fn timers(colony: &mut Colony, _env: &mut Env) {
    colony.gather_penalty_turns = colony.gather_penalty_turns.saturating_sub(1);
    colony.strike_turns = colony.strike_turns.saturating_sub(1);
}
