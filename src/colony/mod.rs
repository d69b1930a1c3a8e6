//! Colony aggregate - population tiers, capped resources, facilities, timers
//!
//! Everything the turn pipeline, the combat resolver and the action entry
//! points mutate lives on this one record. All arithmetic on it goes through
//! the helpers below so counts never underflow and capped stores never
//! exceed their caps.

pub mod facility;
pub mod resources;

use serde::{Deserialize, Serialize};

pub use facility::{BuildQueueEntry, FacilityKind, TrainQueueEntry};
pub use resources::{Resource, ResourceBundle, Tier};

use crate::core::config::GameConfig;
use crate::core::types::{ColonyId, Timestamp};
use crate::npc::Personality;

/// Who issues actions for a colony
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    Player,
    Npc(Personality),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colony {
    pub id: ColonyId,
    pub name: String,
    pub controller: Controller,

    // Population
    pub boss_health: u32,
    pub guard: u32,
    pub adult: u32,
    pub child: u32,
    pub baby: u32,

    // Resources and caps
    pub premium_food: u32,
    pub common_food: u32,
    pub meat_stock: u32,
    pub material: u32,
    pub premium_cap: u32,
    pub common_cap: u32,
    pub meat_cap: u32,
    pub material_cap: u32,
    pub population_cap: u32,

    /// 0..=100
    pub morale: u32,

    // Facilities
    pub shelters: u32,
    pub breeding_pits: u32,
    pub storage_pits: u32,
    pub walls: u32,
    pub watchtowers: u32,

    // Status timers
    pub disease_turns: u32,
    pub addiction_streak: u32,
    pub is_addicted: bool,
    pub clean_streak: u32,
    pub gather_penalty_turns: u32,
    pub strike_turns: u32,
    pub consecutive_low_food_turns: u32,

    // Turn economy
    pub action_points: u32,
    pub turn_quota: u32,
    pub last_regen: Timestamp,

    // Commitment trackers
    pub deployed_gather_adults: u32,
    pub deployed_gather_children: u32,
    pub deployed_defense_guards: u32,
    pub deployed_defense_adults: u32,

    pub turn_count: u32,
    pub destroyed: bool,

    pub build_queue: Vec<BuildQueueEntry>,
    pub train_queue: Vec<TrainQueueEntry>,
}

impl Colony {
    /// A fresh colony with the configured starting values
    pub fn founded(
        id: ColonyId,
        name: impl Into<String>,
        controller: Controller,
        config: &GameConfig,
        now: Timestamp,
    ) -> Self {
        let s = &config.starting;
        Self {
            id,
            name: name.into(),
            controller,
            boss_health: s.boss_health,
            guard: s.guards,
            adult: s.adults,
            child: s.children,
            baby: s.babies,
            premium_food: s.premium_food.min(s.premium_cap),
            common_food: s.common_food.min(s.common_cap),
            meat_stock: s.meat_stock.min(s.meat_cap),
            material: s.material.min(s.material_cap),
            premium_cap: s.premium_cap,
            common_cap: s.common_cap,
            meat_cap: s.meat_cap,
            material_cap: s.material_cap,
            population_cap: s.population_cap,
            morale: s.morale.min(100),
            shelters: s.shelters,
            breeding_pits: 0,
            storage_pits: 0,
            walls: 0,
            watchtowers: 0,
            disease_turns: 0,
            addiction_streak: 0,
            is_addicted: false,
            clean_streak: 0,
            gather_penalty_turns: 0,
            strike_turns: 0,
            consecutive_low_food_turns: 0,
            action_points: config.turn.action_points_per_turn,
            turn_quota: config.turn.quota_initial,
            last_regen: now,
            deployed_gather_adults: 0,
            deployed_gather_children: 0,
            deployed_defense_guards: 0,
            deployed_defense_adults: 0,
            turn_count: 0,
            destroyed: false,
            build_queue: Vec::new(),
            train_queue: Vec::new(),
        }
    }

    pub fn is_npc(&self) -> bool {
        matches!(self.controller, Controller::Npc(_))
    }

    pub fn personality(&self) -> Option<Personality> {
        match self.controller {
            Controller::Npc(p) => Some(p),
            Controller::Player => None,
        }
    }

    /// Non-baby population (babies live in the breeding pits)
    pub fn total_population(&self) -> u32 {
        self.guard + self.adult + self.child
    }

    pub fn baby_capacity(&self, per_pit: u32) -> u32 {
        self.breeding_pits * per_pit
    }

    pub fn is_diseased(&self) -> bool {
        self.disease_turns > 0
    }

    pub fn on_strike(&self) -> bool {
        self.strike_turns > 0
    }

    // === RESOURCES ===

    pub fn resource(&self, resource: Resource) -> u32 {
        match resource {
            Resource::PremiumFood => self.premium_food,
            Resource::CommonFood => self.common_food,
            Resource::MeatStock => self.meat_stock,
            Resource::Material => self.material,
        }
    }

    pub fn cap(&self, resource: Resource) -> u32 {
        match resource {
            Resource::PremiumFood => self.premium_cap,
            Resource::CommonFood => self.common_cap,
            Resource::MeatStock => self.meat_cap,
            Resource::Material => self.material_cap,
        }
    }

    fn resource_mut(&mut self, resource: Resource) -> &mut u32 {
        match resource {
            Resource::PremiumFood => &mut self.premium_food,
            Resource::CommonFood => &mut self.common_food,
            Resource::MeatStock => &mut self.meat_stock,
            Resource::Material => &mut self.material,
        }
    }

    /// Add up to the cap, returns amount actually added
    pub fn add_resource(&mut self, resource: Resource, amount: u32) -> u32 {
        let cap = self.cap(resource);
        let slot = self.resource_mut(resource);
        let added = amount.min(cap.saturating_sub(*slot));
        *slot += added;
        added
    }

    /// Remove down to zero, returns amount actually removed
    pub fn remove_resource(&mut self, resource: Resource, amount: u32) -> u32 {
        let slot = self.resource_mut(resource);
        let removed = amount.min(*slot);
        *slot -= removed;
        removed
    }

    pub fn has_resources(&self, bundle: &ResourceBundle) -> bool {
        bundle.entries().all(|(r, amount)| self.resource(r) >= amount)
    }

    // === POPULATION ===

    pub fn population(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Guard => self.guard,
            Tier::Adult => self.adult,
            Tier::Child => self.child,
            Tier::Baby => self.baby,
        }
    }

    fn population_mut(&mut self, tier: Tier) -> &mut u32 {
        match tier {
            Tier::Guard => &mut self.guard,
            Tier::Adult => &mut self.adult,
            Tier::Child => &mut self.child,
            Tier::Baby => &mut self.baby,
        }
    }

    pub fn add_population(&mut self, tier: Tier, amount: u32) {
        let slot = self.population_mut(tier);
        *slot = slot.saturating_add(amount);
    }

    /// Remove down to zero, returns how many were actually removed
    pub fn remove_population(&mut self, tier: Tier, amount: u32) -> u32 {
        let slot = self.population_mut(tier);
        let removed = amount.min(*slot);
        *slot -= removed;
        removed
    }

    // === MORALE / BOSS ===

    pub fn adjust_morale(&mut self, delta: i32) {
        let next = (self.morale as i64 + delta as i64).clamp(0, 100);
        self.morale = next as u32;
    }

    /// `1 + (morale - 50) * k`
    pub fn morale_multiplier(&self, k: f64) -> f64 {
        1.0 + (self.morale as f64 - 50.0) * k
    }

    /// Apply boss damage; returns true if this blow destroyed the colony
    pub fn damage_boss(&mut self, amount: u32) -> bool {
        self.boss_health = self.boss_health.saturating_sub(amount);
        if self.boss_health == 0 && !self.destroyed {
            self.destroyed = true;
            return true;
        }
        false
    }

    // === FACILITIES ===

    pub fn facility_count(&self, kind: FacilityKind) -> u32 {
        match kind {
            FacilityKind::Shelter => self.shelters,
            FacilityKind::BreedingPit => self.breeding_pits,
            FacilityKind::StoragePit => self.storage_pits,
            FacilityKind::Wall => self.walls,
            FacilityKind::Watchtower => self.watchtowers,
        }
    }

    /// Apply the effect of one finished facility
    pub fn complete_facility(&mut self, kind: FacilityKind, config: &GameConfig) {
        let f = &config.facilities;
        match kind {
            FacilityKind::Shelter => {
                self.shelters += 1;
                self.population_cap += f.shelter_population_cap;
            }
            FacilityKind::BreedingPit => self.breeding_pits += 1,
            FacilityKind::StoragePit => {
                self.storage_pits += 1;
                self.premium_cap += f.storage_premium_cap;
                self.common_cap += f.storage_common_cap;
                self.meat_cap += f.storage_meat_cap;
                self.material_cap += f.storage_material_cap;
            }
            FacilityKind::Wall => self.walls += 1,
            FacilityKind::Watchtower => self.watchtowers += 1,
        }
    }

    /// Lose one shelter and the capacity it provided
    pub fn lose_shelter(&mut self, config: &GameConfig) -> bool {
        if self.shelters == 0 {
            return false;
        }
        self.shelters -= 1;
        self.shrink_population_cap(config);
        true
    }

    pub fn shrink_population_cap(&mut self, config: &GameConfig) {
        let f = &config.facilities;
        self.population_cap = self
            .population_cap
            .saturating_sub(f.shelter_population_cap)
            .max(f.min_population_cap);
    }

    // === COMMITMENTS ===

    /// Clamp remembered deployments to the current population
    pub fn clamp_deployments(&mut self) {
        self.deployed_gather_adults = self.deployed_gather_adults.min(self.adult);
        self.deployed_gather_children = self.deployed_gather_children.min(self.child);
        self.deployed_defense_guards = self.deployed_defense_guards.min(self.guard);
        self.deployed_defense_adults = self.deployed_defense_adults.min(self.adult);
    }

    /// Guards and adults not held back for defense
    pub fn available_forces(&self) -> (u32, u32) {
        (
            self.guard.saturating_sub(self.deployed_defense_guards),
            self.adult.saturating_sub(self.deployed_defense_adults),
        )
    }

    /// Describe the first broken invariant, if any
    pub fn check_invariants(&self) -> Result<(), String> {
        for resource in Resource::ALL {
            if self.resource(resource) > self.cap(resource) {
                return Err(format!(
                    "{} {} exceeds cap {}",
                    resource,
                    self.resource(resource),
                    self.cap(resource)
                ));
            }
        }
        if self.morale > 100 {
            return Err(format!("morale {} out of range", self.morale));
        }
        if self.boss_health == 0 && !self.destroyed {
            return Err("boss is dead but colony is not destroyed".into());
        }
        if self.build_queue.iter().any(|e| e.remaining_turns == 0) {
            return Err("finished build entry left in queue".into());
        }
        if self.train_queue.iter().any(|e| e.remaining_turns == 0) {
            return Err("finished training entry left in queue".into());
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn create_test_colony(id: u32) -> Colony {
    Colony::founded(
        ColonyId(id),
        format!("Test Colony {}", id),
        Controller::Player,
        &GameConfig::default(),
        Timestamp(0),
    )
}
