//! Makeshift (hand-crafting) configuration.

use pixelcraft_common::RecipeId;
use serde::{Deserialize, Serialize};

/// Recipes craftable without any workstation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeshiftConfig {
    /// Hand-craftable recipe ids.
    #[serde(default)]
    pub available_recipes: Vec<RecipeId>,
}

impl MakeshiftConfig {
    /// Create an empty config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a recipe is hand-craftable.
    #[must_use]
    pub fn contains(&self, recipe_id: &str) -> bool {
        self.available_recipes.iter().any(|r| r.as_str() == recipe_id)
    }

    /// Add the recipe if absent, remove it if present. Returns true if it is now included.
    pub fn toggle(&mut self, recipe_id: RecipeId) -> bool {
        if let Some(pos) = self.available_recipes.iter().position(|r| *r == recipe_id) {
            self.available_recipes.remove(pos);
            false
        } else {
            self.available_recipes.push(recipe_id);
            true
        }
    }

    /// Number of hand-craftable recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.available_recipes.len()
    }

    /// True if no recipe is hand-craftable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.available_recipes.is_empty()
    }
}
