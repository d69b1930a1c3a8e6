//! Actions on the colony's own people: culling, births, guard training, cures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::actions::{admit, say, traced, ActionKind, ActionReport, ActionResult};
use crate::colony::{Colony, Resource, Tier, TrainQueueEntry};
use crate::core::error::ActionError;
use crate::core::types::ColonyId;
use crate::economy;
use crate::events::EventKind;
use crate::world::{Env, World};

/// What a culled body is turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CullYield {
    Meat,
    Material,
}

impl fmt::Display for CullYield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CullYield::Meat => f.write_str("meat"),
            CullYield::Material => f.write_str("material"),
        }
    }
}

impl FromStr for CullYield {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meat" | "food" => Ok(CullYield::Meat),
            "material" => Ok(CullYield::Material),
            other => Err(ActionError::InvalidSelection(format!("unknown cull yield '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CullResult {
    pub tier: Tier,
    pub count: u32,
    pub meat: u32,
    pub material: u32,
}

pub fn cull(colony: &mut Colony, env: &mut Env, tier: Tier, into: CullYield, count: u32) -> ActionResult<CullResult> {
    let config = env.config();
    let c = &config.cull;
    admit(colony, ActionKind::Cull, config)?;

    let (meat_each, material_each) = match tier {
        Tier::Baby => (c.baby_meat, c.baby_material),
        Tier::Child => (c.child_meat, c.child_material),
        other => {
            return Err(ActionError::InvalidSelection(format!("{}s cannot be culled", other)));
        }
    };
    if count == 0 {
        return Err(ActionError::InvalidSelection("cull at least one".into()));
    }
    if colony.population(tier) < count {
        return Err(ActionError::InsufficientPopulation(format!(
            "only {} {}(s) left",
            colony.population(tier),
            tier
        )));
    }

    colony.remove_population(tier, count);
    let mut result = CullResult {
        tier,
        count,
        meat: 0,
        material: 0,
    };
    match into {
        CullYield::Meat => result.meat = colony.add_resource(Resource::MeatStock, meat_each * count),
        CullYield::Material => result.material = colony.add_resource(Resource::Material, material_each * count),
    }

    let mut messages = Vec::new();
    let sub = if tier == Tier::Baby { "baby" } else { "child" };
    say(env, colony, "cull", Some(sub), &mut messages);
    let summary = format!(
        "Culled {} {}(s) into {}: +{} meat, +{} material.",
        count, tier, into, result.meat, result.material
    );
    env.log(colony, EventKind::Cull, summary.clone());
    messages.push(summary);

    Ok(ActionReport::new(result, messages))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthOutcome {
    pub children: u32,
    pub babies: u32,
    pub stillborn: bool,
    pub massive: bool,
    pub deformed: bool,
    pub mother_died: bool,
    /// Newborn children eaten by starving adults
    pub eaten: u32,
}

/// One adult gives birth. The food is spent even when nothing survives.
pub fn give_birth(colony: &mut Colony, env: &mut Env) -> ActionResult<BirthOutcome> {
    let config = env.config();
    let b = &config.birth;
    let cost = admit(colony, ActionKind::GiveBirth, config)?;

    if colony.adult < 1 {
        return Err(ActionError::InsufficientPopulation("no adult can give birth".into()));
    }
    let np = economy::available(colony, &config.nutrition);
    if np < b.np_cost {
        return Err(ActionError::InsufficientResource {
            resource: Resource::CommonFood,
            required: b.np_cost,
        });
    }

    economy::consume_nutrition(colony, b.np_cost, &config.nutrition);
    colony.action_points -= cost;

    let mut messages = Vec::new();
    let mut outcome = BirthOutcome::default();

    if env.chance(b.stillborn_chance) {
        colony.adjust_morale(b.stillborn_morale);
        outcome.stillborn = true;
        say(env, colony, "birth", Some("stillborn"), &mut messages);
        env.log(colony, EventKind::Birth, "Stillborn. The food was spent for nothing.");
        return Ok(ActionReport::new(outcome, messages));
    }

    let mut children = env.span(b.children);
    let mut babies = env.span(b.babies);

    if env.chance(b.massive_chance) {
        children = env.span(b.massive_children);
        outcome.massive = true;
        say(env, colony, "birth", Some("massive"), &mut messages);
    }

    if babies > 0 && env.chance(b.deformity_chance) {
        babies -= 1;
        colony.adjust_morale(b.deformity_morale);
        outcome.deformed = true;
        say(env, colony, "birth", Some("deformity"), &mut messages);
    }

    let space = colony.population_cap.saturating_sub(colony.total_population());
    children = children.min(space);
    colony.add_population(Tier::Child, children);
    colony.add_population(Tier::Baby, babies);
    say(env, colony, "birth", Some("normal"), &mut messages);

    if env.chance(b.mother_death_chance) && colony.adult > 1 {
        colony.remove_population(Tier::Adult, 1);
        colony.adjust_morale(b.mother_death_morale);
        outcome.mother_died = true;
        say(env, colony, "birth", Some("mother_death"), &mut messages);
        env.log(colony, EventKind::Birth, "An adult died giving birth.");
    }

    let starving = economy::available(colony, &config.nutrition) == 0;
    if starving && env.chance(b.starving_cannibalism_chance) && children > 0 && colony.adult > 1 {
        let eaten = colony.remove_population(Tier::Child, children.min(b.starving_cannibalism_max));
        colony.add_resource(Resource::MeatStock, eaten);
        children -= eaten;
        colony.adjust_morale(config.cannibalism.morale_penalty);
        outcome.eaten = eaten;
        say(env, colony, "birth", Some("cannibalism"), &mut messages);
        let msg = format!("Starving adults ate {} newborn children.", eaten);
        env.log(colony, EventKind::Cannibalism, msg);
    }

    outcome.children = children;
    outcome.babies = babies;
    let summary = format!("Birth: +{} children, +{} babies.", children, babies);
    env.log(colony, EventKind::Birth, summary.clone());
    messages.push(summary);

    Ok(ActionReport::new(outcome, messages))
}

/// Put one adult into guard training
pub fn train(colony: &mut Colony, env: &mut Env) -> ActionResult<u32> {
    let config = env.config();
    let t = &config.training;
    let cost = admit(colony, ActionKind::Train, config)?;

    if colony.adult < 1 {
        return Err(ActionError::InsufficientPopulation("no adult to train".into()));
    }
    if economy::available(colony, &config.nutrition) < t.np_cost {
        return Err(ActionError::InsufficientResource {
            resource: Resource::CommonFood,
            required: t.np_cost,
        });
    }

    economy::consume_nutrition(colony, t.np_cost, &config.nutrition);
    colony.action_points -= cost;
    colony.remove_population(Tier::Adult, 1);
    colony.train_queue.push(TrainQueueEntry {
        remaining_turns: t.turns.max(1),
    });

    let mut messages = Vec::new();
    say(env, colony, "train", Some("start"), &mut messages);
    let summary = format!("Guard training started ({} turns).", t.turns.max(1));
    env.log(colony, EventKind::Train, summary.clone());
    messages.push(summary);
    Ok(ActionReport::new(t.turns.max(1), messages))
}

/// End an outbreak early by paying premium food
pub fn cure_disease(colony: &mut Colony, env: &mut Env) -> ActionResult<()> {
    let config = env.config();
    admit(colony, ActionKind::CureDisease, config)?;
    let price = config.disease.cure_premium_cost;

    if !colony.is_diseased() {
        return Err(ActionError::InvalidSelection("the colony is not sick".into()));
    }
    if colony.premium_food < price {
        return Err(ActionError::InsufficientResource {
            resource: Resource::PremiumFood,
            required: price,
        });
    }

    colony.remove_resource(Resource::PremiumFood, price);
    colony.disease_turns = 0;

    let mut messages = Vec::new();
    say(env, colony, "disease", Some("cured"), &mut messages);
    env.log(colony, EventKind::Cure, "Premium food cured the outbreak.");
    Ok(ActionReport::new((), messages))
}

impl World {
    pub fn cull(&mut self, id: ColonyId, tier: Tier, into: CullYield, count: u32) -> ActionResult<CullResult> {
        let result = self.act(id, |colony, env| cull(colony, env, tier, into, count));
        traced(id, ActionKind::Cull, result)
    }

    pub fn give_birth(&mut self, id: ColonyId) -> ActionResult<BirthOutcome> {
        let result = self.act(id, give_birth);
        traced(id, ActionKind::GiveBirth, result)
    }

    pub fn train(&mut self, id: ColonyId) -> ActionResult<u32> {
        let result = self.act(id, train);
        traced(id, ActionKind::Train, result)
    }

    pub fn cure_disease(&mut self, id: ColonyId) -> ActionResult<()> {
        let result = self.act(id, cure_disease);
        traced(id, ActionKind::CureDisease, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::create_test_colony;
    use crate::core::config::GameConfig;
    use crate::core::context::SimContext;
    use crate::core::types::SimRng;
    use rand::SeedableRng;

    fn calm_births() -> GameConfig {
        let mut config = GameConfig::default();
        let b = &mut config.birth;
        b.stillborn_chance = 0.0;
        b.massive_chance = 0.0;
        b.deformity_chance = 0.0;
        b.mother_death_chance = 0.0;
        b.starving_cannibalism_chance = 0.0;
        config
    }

    #[test]
    fn test_cull_children_into_meat() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);

        let report = cull(&mut colony, &mut env, Tier::Child, CullYield::Meat, 3).expect("cull succeeds");

        assert_eq!(report.data.meat, 6);
        assert_eq!(colony.child, 7);
        assert_eq!(colony.meat_stock, 6);
        assert_eq!(colony.action_points, 3);
    }

    #[test]
    fn test_cull_rejects_adults_and_overcount() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);

        assert!(matches!(
            cull(&mut colony, &mut env, Tier::Adult, CullYield::Meat, 1),
            Err(ActionError::InvalidSelection(_))
        ));
        assert!(matches!(
            cull(&mut colony, &mut env, Tier::Baby, CullYield::Material, 6),
            Err(ActionError::InsufficientPopulation(_))
        ));
        assert_eq!(colony.baby, 5);
    }

    #[test]
    fn test_birth_spends_food_and_points() {
        let ctx = SimContext::silent(calm_births());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);
        colony.population_cap = 100;

        let report = give_birth(&mut colony, &mut env).expect("birth succeeds");

        assert_eq!(colony.action_points, 1);
        assert_eq!(colony.common_food, 0);
        assert!((3..=6).contains(&report.data.children));
        assert!((1..=3).contains(&report.data.babies));
        assert_eq!(colony.child, 10 + report.data.children);
    }

    #[test]
    fn test_birth_children_capped_by_headroom() {
        let ctx = SimContext::silent(calm_births());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);
        colony.population_cap = colony.total_population() + 1;

        let report = give_birth(&mut colony, &mut env).expect("birth succeeds");

        assert_eq!(report.data.children, 1);
    }

    #[test]
    fn test_birth_needs_food() {
        let ctx = SimContext::silent(calm_births());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);
        colony.common_food = 0;
        colony.premium_food = 2;

        let result = give_birth(&mut colony, &mut env);

        assert!(matches!(result, Err(ActionError::InsufficientResource { required: 30, .. })));
        assert_eq!(colony.premium_food, 2);
        assert_eq!(colony.action_points, 3);
    }

    #[test]
    fn test_stillborn_returns_early() {
        let mut config = calm_births();
        config.birth.stillborn_chance = 1.0;
        let ctx = SimContext::silent(config);
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);

        let report = give_birth(&mut colony, &mut env).expect("birth still counts");

        assert!(report.data.stillborn);
        assert_eq!(colony.child, 10);
        assert_eq!(colony.morale, 45);
    }

    #[test]
    fn test_train_moves_adult_to_queue() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);
        colony.common_food = 60;

        train(&mut colony, &mut env).expect("training starts");

        assert_eq!(colony.adult, 2);
        assert_eq!(colony.train_queue.len(), 1);
        assert_eq!(colony.train_queue[0].remaining_turns, 3);
        assert_eq!(colony.common_food, 10);
    }

    #[test]
    fn test_cure_requires_disease_and_premium() {
        let ctx = SimContext::silent(GameConfig::default());
        let mut rng = SimRng::seed_from_u64(1);
        let mut env = Env::new(&ctx, &mut rng);
        let mut colony = create_test_colony(1);

        assert!(matches!(cure_disease(&mut colony, &mut env), Err(ActionError::InvalidSelection(_))));

        colony.disease_turns = 3;
        colony.premium_food = 4;
        assert!(matches!(
            cure_disease(&mut colony, &mut env),
            Err(ActionError::InsufficientResource { resource: Resource::PremiumFood, .. })
        ));

        colony.premium_food = 5;
        cure_disease(&mut colony, &mut env).expect("cure succeeds");
        assert_eq!(colony.disease_turns, 0);
        assert_eq!(colony.premium_food, 0);
    }

    #[test]
    fn test_cull_yield_parses() {
        assert_eq!("meat".parse::<CullYield>(), Ok(CullYield::Meat));
        assert!("gold".parse::<CullYield>().is_err());
    }
}
