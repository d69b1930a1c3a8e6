//! Capped resource stores and population tiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored resources, each with an independent cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    PremiumFood,
    CommonFood,
    MeatStock,
    Material,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::PremiumFood,
        Resource::CommonFood,
        Resource::MeatStock,
        Resource::Material,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::PremiumFood => "premium food",
            Resource::CommonFood => "common food",
            Resource::MeatStock => "meat",
            Resource::Material => "material",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Population tiers below the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Guard,
    Adult,
    Child,
    Baby,
}

impl Tier {
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Guard => "guard",
            Tier::Adult => "adult",
            Tier::Child => "child",
            Tier::Baby => "baby",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of resource amounts, used for trade offers and loot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBundle {
    pub premium_food: u32,
    pub common_food: u32,
    pub meat_stock: u32,
    pub material: u32,
}

impl ResourceBundle {
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::PremiumFood => self.premium_food,
            Resource::CommonFood => self.common_food,
            Resource::MeatStock => self.meat_stock,
            Resource::Material => self.material,
        }
    }

    pub fn with(mut self, resource: Resource, amount: u32) -> Self {
        match resource {
            Resource::PremiumFood => self.premium_food = amount,
            Resource::CommonFood => self.common_food = amount,
            Resource::MeatStock => self.meat_stock = amount,
            Resource::Material => self.material = amount,
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        Resource::ALL.iter().all(|r| self.get(*r) == 0)
    }

    /// Non-zero entries in a fixed order
    pub fn entries(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        Resource::ALL
            .iter()
            .map(move |r| (*r, self.get(*r)))
            .filter(|(_, amount)| *amount > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_builder_and_entries() {
        let bundle = ResourceBundle::default()
            .with(Resource::Material, 10)
            .with(Resource::PremiumFood, 2);

        let entries: Vec<_> = bundle.entries().collect();
        assert_eq!(entries, vec![(Resource::PremiumFood, 2), (Resource::Material, 10)]);
        assert!(!bundle.is_empty());
        assert!(ResourceBundle::default().is_empty());
    }

    #[test]
    fn test_resource_display() {
        assert_eq!(Resource::CommonFood.to_string(), "common food");
        assert_eq!(Tier::Baby.to_string(), "baby");
    }
}
