//! Game balance configuration with documented constants
//!
//! Every tunable number of the engine lives here, grouped by the subsystem
//! that reads it. The whole tree deserializes from TOML with `#[serde(default)]`
//! so a config file only needs to name the values it overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::colony::FacilityKind;
use crate::core::error::ConfigError;
use crate::core::types::{Ratio, Span};

/// Complete balance table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub turn: TurnConfig,
    pub starting: StartingConfig,
    pub nutrition: NutritionConfig,
    pub gather: GatherConfig,
    pub cull: CullConfig,
    pub birth: BirthConfig,
    pub facilities: FacilityConfig,
    pub training: TrainingConfig,
    pub growth: GrowthConfig,
    pub combat: CombatConfig,
    pub loot: LootConfig,
    pub disasters: DisasterConfig,
    pub disease: DiseaseConfig,
    pub human_events: HumanEventConfig,
    pub rebellion: RebellionConfig,
    pub addiction: AddictionConfig,
    pub cannibalism: CannibalismConfig,
    pub covert: CovertConfig,
    pub protection: ProtectionConfig,
    pub npc: NpcConfig,
}

// === TURN ECONOMY ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConfig {
    /// Action points granted at the start of every processed turn
    pub action_points_per_turn: u32,
    /// Upper bound of the spendable turn quota
    pub quota_max: u32,
    /// Quota a fresh colony starts with
    pub quota_initial: u32,
    /// Wall-clock seconds needed to regenerate one turn
    pub regen_seconds: u64,
    /// When a player spends a turn, every NPC colony also advances one turn
    pub npc_sync_on_consume: bool,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            action_points_per_turn: 3,
            quota_max: 15,
            quota_initial: 3,
            regen_seconds: 1200,
            npc_sync_on_consume: true,
        }
    }
}

/// Values a newly founded colony starts with
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingConfig {
    pub boss_health: u32,
    pub guards: u32,
    pub adults: u32,
    pub children: u32,
    pub babies: u32,
    pub premium_food: u32,
    pub common_food: u32,
    pub meat_stock: u32,
    pub material: u32,
    pub population_cap: u32,
    pub premium_cap: u32,
    pub common_cap: u32,
    pub meat_cap: u32,
    pub material_cap: u32,
    pub morale: u32,
    pub shelters: u32,
}

impl Default for StartingConfig {
    fn default() -> Self {
        Self {
            boss_health: 100,
            guards: 0,
            adults: 3,
            children: 10,
            babies: 5,
            premium_food: 5,
            common_food: 30,
            meat_stock: 0,
            material: 50,
            population_cap: 20,
            premium_cap: 50,
            common_cap: 200,
            meat_cap: 100,
            material_cap: 100,
            morale: 50,
            shelters: 1,
        }
    }
}

// === RESOURCE ECONOMY ===

/// Nutrition point (NP) values and per-tier upkeep
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionConfig {
    pub np_per_premium: u32,
    pub np_per_meat: u32,
    pub np_per_common: u32,
    pub upkeep_guard: u32,
    pub upkeep_adult: u32,
    pub upkeep_child: u32,
    /// Babies eat one point per this many babies, rounded up
    pub babies_per_np: u32,
    /// Consecutive turns without premium food or meat before morale suffers
    pub low_food_streak_threshold: u32,
    pub low_food_morale_penalty: i32,
    /// Boss damage once nobody is left to starve in its place
    pub starvation_boss_damage: u32,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            np_per_premium: 10,
            np_per_meat: 5,
            np_per_common: 1,
            upkeep_guard: 4,
            upkeep_adult: 3,
            upkeep_child: 1,
            babies_per_np: 2,
            low_food_streak_threshold: 3,
            low_food_morale_penalty: -5,
            starvation_boss_damage: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatherConfig {
    pub adult_common: Span,
    pub adult_material: Span,
    pub adult_premium_chance: f64,
    pub child_common: Span,
    pub child_material: Span,
    pub child_premium_chance: f64,
    /// Common food found is tripled
    pub jackpot_chance: f64,
    pub jackpot_multiplier: u32,
    /// A stray child or baby joins the colony
    pub wildling_chance: f64,
    /// One gathering child is taken (only when children were sent)
    pub predator_chance: f64,
    /// Yield multiplier while the scavenging ground is gone
    pub penalty_multiplier: f64,
    /// Yield multiplier while the colony is addicted
    pub addiction_multiplier: f64,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            adult_common: Span::new(8, 12),
            adult_material: Span::new(3, 5),
            adult_premium_chance: 0.05,
            child_common: Span::new(2, 4),
            child_material: Span::new(1, 2),
            child_premium_chance: 0.02,
            jackpot_chance: 0.03,
            jackpot_multiplier: 3,
            wildling_chance: 0.05,
            predator_chance: 0.03,
            penalty_multiplier: 0.5,
            addiction_multiplier: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CullConfig {
    pub baby_meat: u32,
    pub baby_material: u32,
    pub child_meat: u32,
    pub child_material: u32,
}

impl Default for CullConfig {
    fn default() -> Self {
        Self {
            baby_meat: 1,
            baby_material: 3,
            child_meat: 2,
            child_material: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BirthConfig {
    pub action_points: u32,
    pub np_cost: u32,
    pub children: Span,
    pub babies: Span,
    pub stillborn_chance: f64,
    pub stillborn_morale: i32,
    pub massive_chance: f64,
    pub massive_children: Span,
    pub deformity_chance: f64,
    pub deformity_morale: i32,
    pub mother_death_chance: f64,
    pub mother_death_morale: i32,
    /// Hungry adults eat newborn children when the colony has no food left
    pub starving_cannibalism_chance: f64,
    pub starving_cannibalism_max: u32,
}

impl Default for BirthConfig {
    fn default() -> Self {
        Self {
            action_points: 2,
            np_cost: 30,
            children: Span::new(3, 6),
            babies: Span::new(1, 3),
            stillborn_chance: 0.05,
            stillborn_morale: -5,
            massive_chance: 0.08,
            massive_children: Span::new(8, 12),
            deformity_chance: 0.10,
            deformity_morale: -3,
            mother_death_chance: 0.02,
            mother_death_morale: -10,
            starving_cannibalism_chance: 0.03,
            starving_cannibalism_max: 2,
        }
    }
}

// === FACILITIES ===

/// Cost and build time of one facility kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FacilitySpec {
    pub material_cost: u32,
    pub turns: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityConfig {
    pub shelter: FacilitySpec,
    pub breeding_pit: FacilitySpec,
    pub storage_pit: FacilitySpec,
    pub wall: FacilitySpec,
    pub watchtower: FacilitySpec,

    /// Population cap added by each shelter
    pub shelter_population_cap: u32,
    /// Population cap never drops below this when shelters are lost
    pub min_population_cap: u32,
    /// Baby capacity provided by each breeding pit
    pub breeding_pit_baby_capacity: u32,
    pub storage_premium_cap: u32,
    pub storage_common_cap: u32,
    pub storage_meat_cap: u32,
    pub storage_material_cap: u32,
    /// Defense multiplier added per wall
    pub wall_defense_bonus: f64,
    /// Flat defense multiplier added when at least one watchtower stands
    pub watchtower_defense_bonus: f64,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            shelter: FacilitySpec { material_cost: 30, turns: 3 },
            breeding_pit: FacilitySpec { material_cost: 20, turns: 2 },
            storage_pit: FacilitySpec { material_cost: 25, turns: 2 },
            wall: FacilitySpec { material_cost: 40, turns: 4 },
            watchtower: FacilitySpec { material_cost: 35, turns: 3 },
            shelter_population_cap: 15,
            min_population_cap: 5,
            breeding_pit_baby_capacity: 10,
            storage_premium_cap: 25,
            storage_common_cap: 100,
            storage_meat_cap: 25,
            storage_material_cap: 50,
            wall_defense_bonus: 0.2,
            watchtower_defense_bonus: 0.1,
        }
    }
}

impl FacilityConfig {
    pub fn spec(&self, kind: FacilityKind) -> &FacilitySpec {
        match kind {
            FacilityKind::Shelter => &self.shelter,
            FacilityKind::BreedingPit => &self.breeding_pit,
            FacilityKind::StoragePit => &self.storage_pit,
            FacilityKind::Wall => &self.wall,
            FacilityKind::Watchtower => &self.watchtower,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub np_cost: u32,
    pub turns: u32,
    pub success_chance: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            np_cost: 50,
            turns: 3,
            success_chance: 0.6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Per-child chance to become an adult each turn
    pub child_promotion_chance: f64,
    /// Babies produced by each breeding pit per turn
    pub pit_babies: Span,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            child_promotion_chance: 0.05,
            pit_babies: Span::new(1, 2),
        }
    }
}

// === COMBAT ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub action_points: u32,
    pub power_boss: u32,
    pub power_guard: u32,
    pub power_adult: u32,
    pub power_child: u32,
    /// Morale multiplier slope: `1 + (morale - 50) * k`
    pub morale_factor: f64,
    /// Uniform perturbation applied to each side's power
    pub roll: Ratio,
    pub winner_loss: Ratio,
    pub loser_loss: Ratio,
    /// Defender children suffer this share of the defender's loss rate
    pub child_loss_share: f64,
    pub win_morale_attacker: i32,
    pub win_morale_defender: i32,
    pub loss_morale_attacker: i32,
    pub loss_morale_defender: i32,
    /// Damage to an attacking boss that joined and lost
    pub boss_joined_loss_damage: Span,
    /// Power ratio below which a defeat also hurts a boss that stayed home
    pub rout_ratio: f64,
    pub rout_boss_damage: Span,
    /// Power ratio above which the defender's boss is hurt
    pub decisive_ratio: f64,
    pub decisive_boss_damage: Span,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            action_points: 2,
            power_boss: 100,
            power_guard: 40,
            power_adult: 15,
            power_child: 2,
            morale_factor: 0.002,
            roll: Ratio::new(0.8, 1.2),
            winner_loss: Ratio::new(0.05, 0.2),
            loser_loss: Ratio::new(0.2, 0.5),
            child_loss_share: 0.5,
            win_morale_attacker: 8,
            win_morale_defender: -12,
            loss_morale_attacker: -8,
            loss_morale_defender: 5,
            boss_joined_loss_damage: Span::new(10, 25),
            rout_ratio: 0.3,
            rout_boss_damage: Span::new(3, 10),
            decisive_ratio: 2.0,
            decisive_boss_damage: Span::new(5, 15),
        }
    }
}

/// Fraction of each defender category carried off by a victorious attacker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LootConfig {
    pub premium_food: Ratio,
    pub common_food: Ratio,
    pub material: Ratio,
    pub babies: Ratio,
    pub children: Ratio,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self {
            premium_food: Ratio::new(0.3, 0.6),
            common_food: Ratio::new(0.2, 0.4),
            material: Ratio::new(0.1, 0.3),
            babies: Ratio::new(0.3, 0.5),
            children: Ratio::new(0.1, 0.2),
        }
    }
}

// === CRISIS EVENTS ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisasterConfig {
    /// Storm: one shelter collapses
    pub storm_chance: f64,
    /// Cold snap: share of babies and children freeze
    pub cold_chance: f64,
    pub cold_baby_rate: f64,
    pub cold_child_rate: f64,
    /// Share of cold losses that still happen when walls stand
    pub cold_wall_factor: f64,
    /// Pesticide: share of babies die (needs a breeding pit)
    pub pesticide_chance: f64,
    pub pesticide_baby_rate: f64,
    /// Pests: common food and babies lost
    pub pest_chance: f64,
    pub pest_food_rate: f64,
    pub pest_baby_rate: f64,
    /// Predator strike: a few children are taken
    pub predator_chance: f64,
    pub predator_children: Span,
    /// Scavenging ground removed: gathering penalised for a few turns
    pub ground_removal_chance: f64,
    pub ground_removal_turns: u32,
}

impl Default for DisasterConfig {
    fn default() -> Self {
        Self {
            storm_chance: 0.05,
            cold_chance: 0.03,
            cold_baby_rate: 0.3,
            cold_child_rate: 0.1,
            cold_wall_factor: 0.5,
            pesticide_chance: 0.02,
            pesticide_baby_rate: 0.5,
            pest_chance: 0.04,
            pest_food_rate: 0.3,
            pest_baby_rate: 0.2,
            predator_chance: 0.03,
            predator_children: Span::new(1, 3),
            ground_removal_chance: 0.01,
            ground_removal_turns: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseaseConfig {
    /// Occupancy (non-baby population / cap) at which outbreaks become possible
    pub occupancy_threshold: f64,
    pub min_breeding_pits: u32,
    pub onset_chance: f64,
    pub duration: Span,
    pub baby_mortality: f64,
    pub child_mortality: f64,
    pub cure_premium_cost: u32,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        Self {
            occupancy_threshold: 0.90,
            min_breeding_pits: 3,
            onset_chance: 0.10,
            duration: Span::new(3, 5),
            baby_mortality: 0.15,
            child_mortality: 0.05,
            cure_premium_cost: 5,
        }
    }
}

/// Encounters with humans, checked in declaration order; at most one fires
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanEventConfig {
    pub abduction_chance: f64,
    pub abduction_children: Span,
    pub abduction_morale: i32,
    pub capture_chance: f64,
    pub capture_morale: i32,
    pub vandalism_chance: f64,
    /// Share of vandalism events that destroy a shelter instead of morale
    pub vandalism_destroy_share: f64,
    pub vandalism_morale: i32,
    pub gift_chance: f64,
    pub gift_premium: Span,
    pub gift_common: Span,
    pub gift_morale: i32,
    pub pet_trade_chance: f64,
    pub pet_trade_children: u32,
}

impl Default for HumanEventConfig {
    fn default() -> Self {
        Self {
            abduction_chance: 0.02,
            abduction_children: Span::new(3, 5),
            abduction_morale: -8,
            capture_chance: 0.01,
            capture_morale: -10,
            vandalism_chance: 0.04,
            vandalism_destroy_share: 0.5,
            vandalism_morale: -5,
            gift_chance: 0.05,
            gift_premium: Span::new(3, 5),
            gift_common: Span::new(10, 20),
            gift_morale: 10,
            pet_trade_chance: 0.01,
            pet_trade_children: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RebellionConfig {
    /// Morale at or below which children desert and guards may revolt
    pub morale_threshold: u32,
    pub desertion_chance: f64,
    pub desertion_rate: f64,
    /// Morale at or below which adults may strike
    pub strike_morale_threshold: u32,
    pub strike_chance: f64,
    pub strike_turns: u32,
    /// Boss health at or below which a coup is possible
    pub coup_boss_threshold: u32,
    pub coup_chance: f64,
    pub coup_damage: u32,
}

impl Default for RebellionConfig {
    fn default() -> Self {
        Self {
            morale_threshold: 20,
            desertion_chance: 0.10,
            desertion_rate: 0.15,
            strike_morale_threshold: 30,
            strike_chance: 0.2,
            strike_turns: 2,
            coup_boss_threshold: 30,
            coup_chance: 0.10,
            coup_damage: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AddictionConfig {
    pub trigger_turns: u32,
    pub withdrawal_morale: i32,
    pub cure_turns: u32,
}

impl Default for AddictionConfig {
    fn default() -> Self {
        Self {
            trigger_turns: 3,
            withdrawal_morale: -20,
            cure_turns: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CannibalismConfig {
    pub enabled: bool,
    /// Per-guard chance to eat a child when every food store is empty
    pub guard_feed_chance: f64,
    pub morale_penalty: i32,
}

impl Default for CannibalismConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            guard_feed_chance: 0.2,
            morale_penalty: -15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CovertConfig {
    pub action_points: u32,
    pub travel_turns: u32,
    /// Adults the sender must have before one can leave
    pub min_adults: u32,
    pub detection_chance: f64,
    pub watchtower_detection_bonus: f64,
    pub sabotage_food: Ratio,
    pub sabotage_baby_kill: u32,
}

impl Default for CovertConfig {
    fn default() -> Self {
        Self {
            action_points: 1,
            travel_turns: 3,
            min_adults: 2,
            detection_chance: 0.40,
            watchtower_detection_bonus: 0.30,
            sabotage_food: Ratio::new(0.10, 0.20),
            sabotage_baby_kill: 5,
        }
    }
}

/// Protection mode: weak colonies cannot attack or be attacked
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtectionConfig {
    pub guard_min: u32,
    pub adult_min: u32,
    pub floor_adults: u32,
    pub floor_children: u32,
    pub floor_babies: u32,
    pub floor_common_food: u32,
    pub floor_premium_food: u32,
    pub floor_material: u32,
    pub floor_morale: u32,
    pub floor_boss_health: u32,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            guard_min: 5,
            adult_min: 15,
            floor_adults: 5,
            floor_children: 15,
            floor_babies: 8,
            floor_common_food: 50,
            floor_premium_food: 8,
            floor_material: 80,
            floor_morale: 30,
            floor_boss_health: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    pub initial_count: u32,
    pub names: Vec<String>,
    pub spawn: NpcSpawnConfig,

    // Passive trickle
    pub trickle_common: Span,
    pub trickle_material: Span,
    pub peaceful_baby_chance: f64,
    pub peaceful_babies: Span,
    /// Aggressive and berserk colonies promote an adult to guard
    pub warlike_guard_chance: f64,
    pub defensive_material: Span,
    pub cunning_premium_chance: f64,

    // Decision thresholds
    /// Cunning colonies only attack targets weaker than this share of their own power
    pub cunning_power_ratio: f64,
    /// Stop building walls at this many
    pub wall_target: u32,
    /// Stop training at this many guards
    pub guard_target: u32,
    /// Keep this many adults at work before training
    pub train_min_adults: u32,
    /// Births need this much population headroom
    pub birth_headroom: u32,
    /// Births need this multiple of the birth cost in stored nutrition
    pub birth_food_multiple: u32,
    /// Build a shelter once headroom falls to this
    pub shelter_headroom: u32,
    /// Cull once stored nutrition covers fewer turns than this
    pub cull_reserve_turns: u32,
}

/// Ranges a newly spawned NPC colony is rolled from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcSpawnConfig {
    pub guards: Span,
    pub adults: Span,
    pub children: Span,
    pub babies: Span,
    pub premium_food: Span,
    pub common_food: Span,
    pub meat_stock: Span,
    pub material: Span,
    pub morale: Span,
    pub shelters: Span,
    pub breeding_pits: Span,
    pub walls: Span,
}

impl Default for NpcSpawnConfig {
    fn default() -> Self {
        Self {
            guards: Span::new(1, 3),
            adults: Span::new(3, 8),
            children: Span::new(5, 15),
            babies: Span::new(3, 10),
            premium_food: Span::new(2, 8),
            common_food: Span::new(20, 50),
            meat_stock: Span::new(0, 5),
            material: Span::new(30, 80),
            morale: Span::new(40, 70),
            shelters: Span::new(1, 2),
            breeding_pits: Span::new(0, 2),
            walls: Span::new(0, 1),
        }
    }
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            initial_count: 8,
            spawn: NpcSpawnConfig::default(),
            trickle_common: Span::new(5, 12),
            trickle_material: Span::new(2, 4),
            peaceful_baby_chance: 0.3,
            peaceful_babies: Span::new(1, 2),
            warlike_guard_chance: 0.1,
            defensive_material: Span::new(1, 3),
            cunning_premium_chance: 0.03,
            cunning_power_ratio: 0.7,
            wall_target: 3,
            guard_target: 5,
            train_min_adults: 3,
            birth_headroom: 3,
            birth_food_multiple: 2,
            shelter_headroom: 5,
            cull_reserve_turns: 3,
            names: [
                "Sugar Hill",
                "Cardboard Keep",
                "Happy Thicket",
                "Bloody Burrow",
                "Dumpster Kingdom",
                "Joyful Park",
                "Dark Rampart",
                "Greedy Garden",
                "Weeping Shack",
                "Glutton's Hole",
                "Stormy Alley",
                "Secret Sewer",
                "Eternal Candy",
                "Despair Heap",
                "Blessed Leaf",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (partial) TOML document over the defaults and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.turn.action_points_per_turn == 0 {
            return Err(ConfigError::Invalid("action_points_per_turn must be positive".into()));
        }
        if self.turn.regen_seconds == 0 {
            return Err(ConfigError::Invalid("regen_seconds must be positive".into()));
        }
        if self.turn.quota_initial > self.turn.quota_max {
            return Err(ConfigError::Invalid(format!(
                "quota_initial ({}) exceeds quota_max ({})",
                self.turn.quota_initial, self.turn.quota_max
            )));
        }
        if self.nutrition.np_per_premium == 0
            || self.nutrition.np_per_meat == 0
            || self.nutrition.np_per_common == 0
            || self.nutrition.babies_per_np == 0
        {
            return Err(ConfigError::Invalid("nutrition values must be positive".into()));
        }

        let chances = [
            ("gather.adult_premium_chance", self.gather.adult_premium_chance),
            ("gather.child_premium_chance", self.gather.child_premium_chance),
            ("gather.jackpot_chance", self.gather.jackpot_chance),
            ("gather.wildling_chance", self.gather.wildling_chance),
            ("gather.predator_chance", self.gather.predator_chance),
            ("birth.stillborn_chance", self.birth.stillborn_chance),
            ("birth.massive_chance", self.birth.massive_chance),
            ("birth.deformity_chance", self.birth.deformity_chance),
            ("birth.mother_death_chance", self.birth.mother_death_chance),
            ("birth.starving_cannibalism_chance", self.birth.starving_cannibalism_chance),
            ("training.success_chance", self.training.success_chance),
            ("growth.child_promotion_chance", self.growth.child_promotion_chance),
            ("disasters.storm_chance", self.disasters.storm_chance),
            ("disasters.cold_chance", self.disasters.cold_chance),
            ("disasters.pesticide_chance", self.disasters.pesticide_chance),
            ("disasters.pest_chance", self.disasters.pest_chance),
            ("disasters.predator_chance", self.disasters.predator_chance),
            ("disasters.ground_removal_chance", self.disasters.ground_removal_chance),
            ("disease.onset_chance", self.disease.onset_chance),
            ("human_events.abduction_chance", self.human_events.abduction_chance),
            ("human_events.capture_chance", self.human_events.capture_chance),
            ("human_events.vandalism_chance", self.human_events.vandalism_chance),
            ("human_events.gift_chance", self.human_events.gift_chance),
            ("human_events.pet_trade_chance", self.human_events.pet_trade_chance),
            ("rebellion.desertion_chance", self.rebellion.desertion_chance),
            ("rebellion.strike_chance", self.rebellion.strike_chance),
            ("rebellion.coup_chance", self.rebellion.coup_chance),
            ("cannibalism.guard_feed_chance", self.cannibalism.guard_feed_chance),
            ("covert.detection_chance", self.covert.detection_chance),
            ("npc.peaceful_baby_chance", self.npc.peaceful_baby_chance),
            ("npc.warlike_guard_chance", self.npc.warlike_guard_chance),
            ("npc.cunning_premium_chance", self.npc.cunning_premium_chance),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{} ({}) must be within [0, 1]", name, value)));
            }
        }

        let spans = [
            ("gather.adult_common", self.gather.adult_common),
            ("gather.adult_material", self.gather.adult_material),
            ("gather.child_common", self.gather.child_common),
            ("gather.child_material", self.gather.child_material),
            ("birth.children", self.birth.children),
            ("birth.babies", self.birth.babies),
            ("birth.massive_children", self.birth.massive_children),
            ("growth.pit_babies", self.growth.pit_babies),
            ("combat.boss_joined_loss_damage", self.combat.boss_joined_loss_damage),
            ("combat.rout_boss_damage", self.combat.rout_boss_damage),
            ("combat.decisive_boss_damage", self.combat.decisive_boss_damage),
            ("disasters.predator_children", self.disasters.predator_children),
            ("disease.duration", self.disease.duration),
            ("human_events.abduction_children", self.human_events.abduction_children),
            ("human_events.gift_premium", self.human_events.gift_premium),
            ("human_events.gift_common", self.human_events.gift_common),
            ("npc.trickle_common", self.npc.trickle_common),
            ("npc.trickle_material", self.npc.trickle_material),
            ("npc.peaceful_babies", self.npc.peaceful_babies),
            ("npc.defensive_material", self.npc.defensive_material),
            ("npc.spawn.guards", self.npc.spawn.guards),
            ("npc.spawn.adults", self.npc.spawn.adults),
            ("npc.spawn.children", self.npc.spawn.children),
            ("npc.spawn.babies", self.npc.spawn.babies),
            ("npc.spawn.premium_food", self.npc.spawn.premium_food),
            ("npc.spawn.common_food", self.npc.spawn.common_food),
            ("npc.spawn.meat_stock", self.npc.spawn.meat_stock),
            ("npc.spawn.material", self.npc.spawn.material),
            ("npc.spawn.morale", self.npc.spawn.morale),
            ("npc.spawn.shelters", self.npc.spawn.shelters),
            ("npc.spawn.breeding_pits", self.npc.spawn.breeding_pits),
            ("npc.spawn.walls", self.npc.spawn.walls),
        ];
        for (name, span) in spans {
            if !span.is_ordered() {
                return Err(ConfigError::Invalid(format!(
                    "{} has min {} above max {}",
                    name, span.min, span.max
                )));
            }
        }

        let ratios = [
            ("combat.roll", self.combat.roll),
            ("combat.winner_loss", self.combat.winner_loss),
            ("combat.loser_loss", self.combat.loser_loss),
            ("loot.premium_food", self.loot.premium_food),
            ("loot.common_food", self.loot.common_food),
            ("loot.material", self.loot.material),
            ("loot.babies", self.loot.babies),
            ("loot.children", self.loot.children),
            ("covert.sabotage_food", self.covert.sabotage_food),
        ];
        for (name, ratio) in ratios {
            if !ratio.is_ordered() || ratio.min < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must satisfy 0 <= min <= max (got {}..{})",
                    name, ratio.min, ratio.max
                )));
            }
        }

        if self.combat.roll.min <= 0.0 {
            return Err(ConfigError::Invalid("combat.roll.min must be positive".into()));
        }
        if self.starting.morale > 100 {
            return Err(ConfigError::Invalid("starting.morale must be within [0, 100]".into()));
        }
        if self.npc.spawn.morale.max > 100 {
            return Err(ConfigError::Invalid("npc.spawn.morale must be within [0, 100]".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            [turn]
            regen_seconds = 600

            [combat]
            power_guard = 50
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.turn.regen_seconds, 600);
        assert_eq!(config.turn.quota_max, 15);
        assert_eq!(config.combat.power_guard, 50);
        assert_eq!(config.combat.power_adult, 15);
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let result = GameConfig::from_toml_str(
            r#"
            [disease]
            onset_chance = 1.5
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_inverted_span_rejected() {
        let mut config = GameConfig::default();
        config.birth.children = Span::new(6, 3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_regen_rejected() {
        let mut config = GameConfig::default();
        config.turn.regen_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_facility_spec_lookup() {
        let config = GameConfig::default();
        assert_eq!(config.facilities.spec(FacilityKind::Wall).material_cost, 40);
        assert_eq!(config.facilities.spec(FacilityKind::Shelter).turns, 3);
    }
}
