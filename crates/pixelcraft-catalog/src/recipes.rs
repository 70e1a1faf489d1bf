//! Recipe definitions.
//!
//! This module provides:
//! - Recipe data with ordered material requirements
//! - Skilled difficulty bounds and visual difficulty groups

use pixelcraft_common::{ItemId, RecipeId};
use serde::{Deserialize, Serialize};

/// Lowest skilled difficulty.
pub const MIN_DIFFICULTY: u8 = 0;

/// Highest skilled difficulty.
pub const MAX_DIFFICULTY: u8 = 9;

// ============================================================================
// Materials
// ============================================================================

/// An item requirement: used by recipe materials and upgrade requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    /// Required item.
    #[serde(default)]
    pub item_id: ItemId,
    /// Quantity required.
    #[serde(default)]
    pub amount: u32,
}

impl MaterialRequirement {
    /// Create a new requirement.
    #[must_use]
    pub fn new(item_id: impl Into<ItemId>, amount: u32) -> Self {
        Self {
            item_id: item_id.into(),
            amount,
        }
    }
}

// ============================================================================
// Difficulty Groups
// ============================================================================

/// Coarse grouping of skilled difficulty for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyGroup {
    /// Difficulty 0-2.
    Easy,
    /// Difficulty 3-5.
    Medium,
    /// Difficulty 6-9.
    Hard,
}

impl DifficultyGroup {
    /// Group for a difficulty value. Out-of-range values fall back to Easy.
    #[must_use]
    pub fn for_difficulty(difficulty: u8) -> Self {
        match difficulty {
            3..=5 => Self::Medium,
            6..=MAX_DIFFICULTY => Self::Hard,
            _ => Self::Easy,
        }
    }

    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

// ============================================================================
// Recipe Definition
// ============================================================================

/// A crafting recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe id.
    pub id: RecipeId,
    /// Item produced.
    #[serde(default)]
    pub output_item_id: ItemId,
    /// Quantity produced.
    #[serde(default = "default_output_amount")]
    pub output_amount: u32,
    /// Materials consumed, in display order.
    #[serde(default)]
    pub materials: Vec<MaterialRequirement>,
    /// Skill check difficulty (0-9).
    #[serde(default)]
    pub skilled_difficulty: u8,
    /// Whether players know the recipe from the start.
    #[serde(default)]
    pub should_start_visible: bool,
}

const fn default_output_amount() -> u32 {
    1
}

impl Recipe {
    /// Create a recipe producing one of `output`, with no materials yet.
    #[must_use]
    pub fn new(id: impl Into<RecipeId>, output: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            output_item_id: output.into(),
            output_amount: 1,
            materials: Vec::new(),
            skilled_difficulty: MIN_DIFFICULTY,
            should_start_visible: false,
        }
    }

    /// Add a material.
    #[must_use]
    pub fn material(mut self, item_id: impl Into<ItemId>, amount: u32) -> Self {
        self.materials.push(MaterialRequirement::new(item_id, amount));
        self
    }

    /// Set output amount.
    #[must_use]
    pub fn output_amount(mut self, amount: u32) -> Self {
        self.output_amount = amount;
        self
    }

    /// Set skilled difficulty.
    #[must_use]
    pub fn difficulty(mut self, difficulty: u8) -> Self {
        self.skilled_difficulty = difficulty;
        self
    }

    /// Set starting visibility.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.should_start_visible = visible;
        self
    }

    /// Difficulty group for display.
    #[must_use]
    pub fn difficulty_group(&self) -> DifficultyGroup {
        DifficultyGroup::for_difficulty(self.skilled_difficulty)
    }

    /// True if any material requires the given item.
    #[must_use]
    pub fn uses_item(&self, item_id: &str) -> bool {
        self.materials.iter().any(|m| m.item_id.as_str() == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_builder() {
        let recipe = Recipe::new("plank_recipe", "plank")
            .material("log", 1)
            .output_amount(4)
            .difficulty(2);
        assert_eq!(recipe.materials.len(), 1);
        assert_eq!(recipe.output_amount, 4);
        assert!(recipe.uses_item("log"));
        assert!(!recipe.uses_item("Log"));
    }

    #[test]
    fn test_difficulty_groups() {
        assert_eq!(DifficultyGroup::for_difficulty(0), DifficultyGroup::Easy);
        assert_eq!(DifficultyGroup::for_difficulty(2), DifficultyGroup::Easy);
        assert_eq!(DifficultyGroup::for_difficulty(3), DifficultyGroup::Medium);
        assert_eq!(DifficultyGroup::for_difficulty(5), DifficultyGroup::Medium);
        assert_eq!(DifficultyGroup::for_difficulty(6), DifficultyGroup::Hard);
        assert_eq!(DifficultyGroup::for_difficulty(9), DifficultyGroup::Hard);
        assert_eq!(DifficultyGroup::for_difficulty(42), DifficultyGroup::Easy);
        assert_eq!(DifficultyGroup::for_difficulty(4).display_name(), "Medium");
    }

    #[test]
    fn test_deserialize_defaults() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": "r1"}"#).unwrap();
        assert!(recipe.output_item_id.is_empty());
        assert_eq!(recipe.output_amount, 1);
        assert!(recipe.materials.is_empty());
    }
}
