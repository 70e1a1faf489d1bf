//! Summary counters for each catalog collection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::breakables::BreakableResource;
use crate::items::{Item, ItemType};
use crate::makeshift::MakeshiftConfig;
use crate::recipes::{DifficultyGroup, Recipe};
use crate::workstations::Workstation;

/// Item counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStats {
    /// Number of items.
    pub total: usize,
    /// Items per type. Every type is present, possibly with zero.
    pub by_type: BTreeMap<ItemType, usize>,
}

/// Recipe counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeStats {
    /// Number of recipes.
    pub total: usize,
    /// Mean material count, rounded to one decimal.
    pub average_materials: f64,
    /// Recipes in the Easy group.
    pub easy: usize,
    /// Recipes in the Medium group.
    pub medium: usize,
    /// Recipes in the Hard group.
    pub hard: usize,
}

/// Workstation counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkstationStats {
    /// Number of workstations.
    pub total: usize,
    /// Workstations with at least one upgrade.
    pub with_upgrades: usize,
    /// Base-tier recipes listed across all workstations.
    pub total_recipes: usize,
    /// Mean upgrade count, rounded to one decimal.
    pub average_upgrades: f64,
}

/// Breakable counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakableStats {
    /// Number of breakables.
    pub total: usize,
    /// Breakables with at least one drop entry.
    pub with_drops: usize,
    /// Mean drop entry count, rounded to one decimal.
    pub average_drops: f64,
    /// Mean hardness, rounded to one decimal.
    pub average_hardness: f64,
}

/// Counters for the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Items.
    pub items: ItemStats,
    /// Recipes.
    pub recipes: RecipeStats,
    /// Workstations.
    pub workstations: WorkstationStats,
    /// Hand-craftable recipe count.
    pub makeshift_recipes: usize,
    /// Breakables.
    pub breakables: BreakableStats,
}

fn mean_one_decimal(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (sum / count as f64 * 10.0).round() / 10.0
}

impl ItemStats {
    /// Count items.
    #[must_use]
    pub fn compute(items: &[Item]) -> Self {
        let mut by_type: BTreeMap<ItemType, usize> =
            ItemType::all().iter().map(|&t| (t, 0)).collect();
        for item in items {
            *by_type.entry(item.item_type()).or_insert(0) += 1;
        }
        Self {
            total: items.len(),
            by_type,
        }
    }

    /// Items of one type.
    #[must_use]
    pub fn count(&self, item_type: ItemType) -> usize {
        self.by_type.get(&item_type).copied().unwrap_or(0)
    }
}

impl RecipeStats {
    /// Count recipes.
    #[must_use]
    pub fn compute(recipes: &[Recipe]) -> Self {
        let materials: usize = recipes.iter().map(|r| r.materials.len()).sum();
        let group_count = |group: DifficultyGroup| {
            recipes
                .iter()
                .filter(|r| r.difficulty_group() == group)
                .count()
        };
        Self {
            total: recipes.len(),
            average_materials: mean_one_decimal(materials as f64, recipes.len()),
            easy: group_count(DifficultyGroup::Easy),
            medium: group_count(DifficultyGroup::Medium),
            hard: group_count(DifficultyGroup::Hard),
        }
    }
}

impl WorkstationStats {
    /// Count workstations.
    #[must_use]
    pub fn compute(workstations: &[Workstation]) -> Self {
        let upgrades: usize = workstations.iter().map(|w| w.upgrades.len()).sum();
        Self {
            total: workstations.len(),
            with_upgrades: workstations.iter().filter(|w| !w.upgrades.is_empty()).count(),
            total_recipes: workstations.iter().map(|w| w.available_recipes.len()).sum(),
            average_upgrades: mean_one_decimal(upgrades as f64, workstations.len()),
        }
    }
}

impl BreakableStats {
    /// Count breakables.
    #[must_use]
    pub fn compute(breakables: &[BreakableResource]) -> Self {
        let drops: usize = breakables.iter().map(|b| b.drop_table.len()).sum();
        let hardness: f64 = breakables.iter().map(|b| f64::from(b.hardness)).sum();
        Self {
            total: breakables.len(),
            with_drops: breakables.iter().filter(|b| !b.drop_table.is_empty()).count(),
            average_drops: mean_one_decimal(drops as f64, breakables.len()),
            average_hardness: mean_one_decimal(hardness, breakables.len()),
        }
    }
}

impl CatalogStats {
    /// Count every collection.
    #[must_use]
    pub fn compute(
        items: &[Item],
        recipes: &[Recipe],
        workstations: &[Workstation],
        makeshift: &MakeshiftConfig,
        breakables: &[BreakableResource],
    ) -> Self {
        Self {
            items: ItemStats::compute(items),
            recipes: RecipeStats::compute(recipes),
            workstations: WorkstationStats::compute(workstations),
            makeshift_recipes: makeshift.len(),
            breakables: BreakableStats::compute(breakables),
        }
    }
}
