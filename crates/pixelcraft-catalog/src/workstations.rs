//! Workstation definitions and upgrade tiers.
//!
//! A workstation is keyed by the id of the placeable item that backs it. Each
//! upgrade tier unlocks more recipes and grants boosts.

use pixelcraft_common::{ItemId, RecipeId, UpgradeId};
use serde::{Deserialize, Serialize};

use crate::recipes::MaterialRequirement;

/// Highest upgrade tier a workstation can reach.
pub const MAX_UPGRADE_LEVEL: u32 = 4;

// ============================================================================
// Boosts
// ============================================================================

/// Bonus granted by an upgrade tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoostType {
    /// Reduces recipe material cost by 20%.
    ReducedCost,
    /// Widens the success area of skill checks.
    EasierSkillCheck,
    /// Chance to not consume durability on use.
    LuckyNotWaste,
    /// Chance to double crafted output.
    DoubleYield,
    /// Special effect defined per workstation.
    UniqueEffect,
}

impl BoostType {
    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ReducedCost => "Reduced Cost (20%)",
            Self::EasierSkillCheck => "Easier Skill Check",
            Self::LuckyNotWaste => "Lucky Not Waste",
            Self::DoubleYield => "Double Yield",
            Self::UniqueEffect => "Unique Effect",
        }
    }
}

// ============================================================================
// Upgrades
// ============================================================================

/// One upgrade tier of a workstation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    /// Upgrade id.
    #[serde(default)]
    pub id: UpgradeId,
    /// Tier reached (1..=MAX_UPGRADE_LEVEL). Conventionally its position + 1.
    #[serde(default)]
    pub target_level: u32,
    /// Text shown to players.
    #[serde(default)]
    pub effect_description: String,
    /// Boosts granted at this tier.
    #[serde(default)]
    pub boost_types: Vec<BoostType>,
    /// Recipes unlocked at this tier.
    #[serde(default)]
    pub available_recipes_ids: Vec<RecipeId>,
    /// Materials consumed to perform the upgrade.
    #[serde(default)]
    pub upgrade_requirements: Vec<MaterialRequirement>,
}

impl Upgrade {
    /// Create an upgrade tier with nothing attached.
    #[must_use]
    pub fn new(id: impl Into<UpgradeId>, target_level: u32) -> Self {
        Self {
            id: id.into(),
            target_level,
            effect_description: String::new(),
            boost_types: Vec::new(),
            available_recipes_ids: Vec::new(),
            upgrade_requirements: Vec::new(),
        }
    }

    /// Add a boost.
    #[must_use]
    pub fn boost(mut self, boost: BoostType) -> Self {
        if !self.boost_types.contains(&boost) {
            self.boost_types.push(boost);
        }
        self
    }

    /// Unlock a recipe at this tier.
    #[must_use]
    pub fn unlock_recipe(mut self, recipe: impl Into<RecipeId>) -> Self {
        self.available_recipes_ids.push(recipe.into());
        self
    }

    /// Add an upgrade requirement.
    #[must_use]
    pub fn requires(mut self, item_id: impl Into<ItemId>, amount: u32) -> Self {
        self.upgrade_requirements
            .push(MaterialRequirement::new(item_id, amount));
        self
    }
}

// ============================================================================
// Workstation Definition
// ============================================================================

/// A crafting station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workstation {
    /// Id of the placeable item that backs this station.
    pub workstation_def_id: ItemId,
    /// Recipes craftable at the base tier.
    #[serde(default)]
    pub available_recipes: Vec<RecipeId>,
    /// Upgrade tiers in order.
    #[serde(default)]
    pub upgrades: Vec<Upgrade>,
}

impl Workstation {
    /// Create a workstation backed by the given placeable item.
    #[must_use]
    pub fn new(workstation_def_id: impl Into<ItemId>) -> Self {
        Self {
            workstation_def_id: workstation_def_id.into(),
            available_recipes: Vec::new(),
            upgrades: Vec::new(),
        }
    }

    /// Add a base-tier recipe.
    #[must_use]
    pub fn recipe(mut self, recipe: impl Into<RecipeId>) -> Self {
        self.available_recipes.push(recipe.into());
        self
    }

    /// Append an upgrade tier.
    #[must_use]
    pub fn upgrade(mut self, upgrade: Upgrade) -> Self {
        self.upgrades.push(upgrade);
        self
    }

    /// Recipes craftable once the station has reached `level`.
    ///
    /// Level 0 is the unupgraded station.
    #[must_use]
    pub fn recipes_at_level(&self, level: u32) -> Vec<&RecipeId> {
        let mut recipes: Vec<&RecipeId> = self.available_recipes.iter().collect();
        for upgrade in self.upgrades.iter().filter(|u| u.target_level <= level) {
            for recipe in &upgrade.available_recipes_ids {
                if !recipes.contains(&recipe) {
                    recipes.push(recipe);
                }
            }
        }
        recipes
    }
}
