//! Catalog validation.
//!
//! This module provides:
//! - Structural checks: required fields, numeric ranges, duplicate ids
//! - Referential checks: every id reference resolves to the right kind of entity
//! - A report keyed by entity, with issues in check order
//!
//! Validation never stops early. For each entity all structural checks run
//! before any referential check, so the order of issues inside one entity is
//! stable.

use pixelcraft_common::{EntityKind, ItemId, RecipeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing::{info, warn};

use crate::breakables::BreakableResource;
use crate::catalog::Catalog;
use crate::items::{Item, ItemKind, ItemType, PlaceableBehavior};
use crate::makeshift::MakeshiftConfig;
use crate::naming::{lint_id, IdStyleIssue};
use crate::recipes::{Recipe, MAX_DIFFICULTY};
use crate::workstations::{Workstation, MAX_UPGRADE_LEVEL};

/// Report key used for the single makeshift record.
pub const MAKESHIFT_KEY: &str = "makeshift";

// ============================================================================
// Issues
// ============================================================================

/// Which layer of validation produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    /// Missing field, bad range or duplicate.
    Structural,
    /// Reference that does not resolve to the expected entity.
    Referential,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// Field is missing or empty
    #[error("{field} required")]
    Required {
        /// Field label
        field: String,
    },

    /// Field value is outside its allowed range
    #[error("{field} must be {constraint}")]
    OutOfRange {
        /// Field label
        field: String,
        /// Allowed range, for display
        constraint: String,
    },

    /// Id is used by an earlier entity of the same kind
    #[error("Duplicate {kind} id \"{id}\" (first defined at index {first_index})")]
    DuplicateId {
        /// Collection
        kind: EntityKind,
        /// Repeated id
        id: String,
        /// Position of the first occurrence
        first_index: usize,
    },

    /// Recipe id listed more than once in the same set
    #[error("{field}: recipe \"{id}\" listed more than once")]
    DuplicateEntry {
        /// Set label
        field: String,
        /// Repeated recipe id
        id: RecipeId,
    },

    /// Id does not follow the naming convention
    #[error("{field} \"{id}\": {issue}")]
    IdStyle {
        /// Field label
        field: String,
        /// Offending id
        id: String,
        /// Rule broken
        issue: IdStyleIssue,
    },

    /// Item reference does not resolve
    #[error("{field} \"{id}\" not found in items catalog")]
    UnknownItem {
        /// Field label
        field: String,
        /// Unresolved id
        id: ItemId,
    },

    /// Recipe reference does not resolve
    #[error("{field} \"{id}\" not found in recipes catalog")]
    UnknownRecipe {
        /// Field label
        field: String,
        /// Unresolved id
        id: RecipeId,
    },

    /// Workstation is backed by an item that is not a placeable
    #[error("Item \"{id}\" is not a placeable (type: {actual})")]
    NotPlaceable {
        /// Backing item id
        id: ItemId,
        /// Actual item type
        actual: ItemType,
    },

    /// Workstation is backed by a placeable with another behavior
    #[error("Item \"{id}\" is not a workstation placeable (behavior: {})", behavior_label(.actual))]
    NotWorkstation {
        /// Backing item id
        id: ItemId,
        /// Actual behavior, if set
        actual: Option<PlaceableBehavior>,
    },
}

fn behavior_label(behavior: &Option<PlaceableBehavior>) -> &'static str {
    behavior.map_or("none", PlaceableBehavior::display_name)
}

impl ValidationIssue {
    /// Validation layer that produced the issue.
    #[must_use]
    pub fn category(&self) -> IssueCategory {
        match self {
            Self::Required { .. }
            | Self::OutOfRange { .. }
            | Self::DuplicateId { .. }
            | Self::DuplicateEntry { .. }
            | Self::IdStyle { .. } => IssueCategory::Structural,
            Self::UnknownItem { .. }
            | Self::UnknownRecipe { .. }
            | Self::NotPlaceable { .. }
            | Self::NotWorkstation { .. } => IssueCategory::Referential,
        }
    }

    fn required(field: impl Into<String>) -> Self {
        Self::Required {
            field: field.into(),
        }
    }

    fn out_of_range(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::OutOfRange {
            field: field.into(),
            constraint: constraint.into(),
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// Identity of a validated entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    /// Collection.
    pub kind: EntityKind,
    /// Position in the collection.
    pub index: usize,
    /// Entity id at validation time (may be empty).
    pub id: String,
}

impl EntityKey {
    /// Create a key.
    #[must_use]
    pub fn new(kind: EntityKind, index: usize, id: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            id: id.into(),
        }
    }
}

/// Options that enable optional checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Report ids that break the `lowercase_with_underscores` convention.
    pub lint_ids: bool,
}

/// Issues found in one validation pass. Entities without issues are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    entries: BTreeMap<EntityKey, Vec<ValidationIssue>>,
    checked: usize,
}

impl ValidationReport {
    /// True if no entity has issues.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entities examined.
    #[must_use]
    pub fn checked_entities(&self) -> usize {
        self.checked
    }

    /// Number of entities with at least one issue.
    #[must_use]
    pub fn failing_entities(&self) -> usize {
        self.entries.len()
    }

    /// Total number of issues.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Number of issues in a category.
    #[must_use]
    pub fn count_by_category(&self, category: IssueCategory) -> usize {
        self.entries
            .values()
            .flatten()
            .filter(|issue| issue.category() == category)
            .count()
    }

    /// Issues of the entity at `index` in a collection.
    #[must_use]
    pub fn issues_for(&self, kind: EntityKind, index: usize) -> &[ValidationIssue] {
        // The empty id sorts first, so the range starts at this (kind, index)
        self.entries
            .range(EntityKey::new(kind, index, String::new())..)
            .next()
            .filter(|(key, _)| key.kind == kind && key.index == index)
            .map(|(_, issues)| issues.as_slice())
            .unwrap_or_default()
    }

    /// Issues of the entity at `index`, rendered as messages.
    #[must_use]
    pub fn messages_for(&self, kind: EntityKind, index: usize) -> Vec<String> {
        self.issues_for(kind, index)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Every failing entity with its issues, ordered by kind then index.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityKey, &[ValidationIssue])> {
        self.entries.iter().map(|(key, issues)| (key, issues.as_slice()))
    }

    fn record(&mut self, key: EntityKey, issues: Vec<ValidationIssue>) {
        self.checked += 1;
        if !issues.is_empty() {
            self.entries.insert(key, issues);
        }
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Runs structural and referential checks against a catalog.
pub struct Validator<'a> {
    catalog: &'a Catalog,
    options: ValidationOptions,
}

fn duplicate_entries<'r>(
    field: &str,
    recipes: impl IntoIterator<Item = &'r RecipeId>,
) -> Vec<ValidationIssue> {
    let mut seen = HashSet::new();
    let mut issues = Vec::new();
    for recipe in recipes {
        if !recipe.is_empty() && !seen.insert(recipe.as_str()) {
            issues.push(ValidationIssue::DuplicateEntry {
                field: field.to_string(),
                id: recipe.clone(),
            });
        }
    }
    issues
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

impl<'a> Validator<'a> {
    /// Create a validator.
    #[must_use]
    pub fn new(catalog: &'a Catalog, options: ValidationOptions) -> Self {
        Self { catalog, options }
    }

    /// Validate every entity.
    #[must_use]
    pub fn run(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        let catalog = self.catalog;

        for (index, item) in catalog.items().iter().enumerate() {
            let key = EntityKey::new(EntityKind::Item, index, item.id.as_str());
            report.record(key, self.item(index, item));
        }
        for (index, recipe) in catalog.recipes().iter().enumerate() {
            let key = EntityKey::new(EntityKind::Recipe, index, recipe.id.as_str());
            report.record(key, self.recipe(index, recipe));
        }
        for (index, workstation) in catalog.workstations().iter().enumerate() {
            let key = EntityKey::new(
                EntityKind::Workstation,
                index,
                workstation.workstation_def_id.as_str(),
            );
            report.record(key, self.workstation(index, workstation));
        }
        report.record(
            EntityKey::new(EntityKind::Makeshift, 0, MAKESHIFT_KEY),
            self.makeshift(catalog.makeshift()),
        );
        for (index, breakable) in catalog.breakables().iter().enumerate() {
            let key = EntityKey::new(EntityKind::Breakable, index, breakable.id.as_str());
            report.record(key, self.breakable(index, breakable));
        }

        if report.is_valid() {
            info!("Validation passed: {} entities checked", report.checked_entities());
        } else {
            warn!(
                "Validation found {} issues in {} of {} entities ({} structural, {} referential)",
                report.issue_count(),
                report.failing_entities(),
                report.checked_entities(),
                report.count_by_category(IssueCategory::Structural),
                report.count_by_category(IssueCategory::Referential)
            );
        }
        report
    }

    fn lint(&self, field: &str, id: &str, issues: &mut Vec<ValidationIssue>) {
        if !self.options.lint_ids {
            return;
        }
        issues.extend(lint_id(id).into_iter().map(|issue| ValidationIssue::IdStyle {
            field: field.to_string(),
            id: id.to_string(),
            issue,
        }));
    }

    fn duplicate_id(
        kind: EntityKind,
        id: &str,
        index: usize,
        first: Option<usize>,
    ) -> Option<ValidationIssue> {
        match first {
            Some(first_index) if !id.is_empty() && first_index != index => {
                Some(ValidationIssue::DuplicateId {
                    kind,
                    id: id.to_string(),
                    first_index,
                })
            }
            _ => None,
        }
    }

    fn check_item_ref(&self, field: String, id: &ItemId, issues: &mut Vec<ValidationIssue>) {
        if !id.is_empty() && !self.catalog.index().has_item(id.as_str()) {
            issues.push(ValidationIssue::UnknownItem {
                field,
                id: id.clone(),
            });
        }
    }

    fn check_recipe_ref(&self, field: String, id: &RecipeId, issues: &mut Vec<ValidationIssue>) {
        if !id.is_empty() && !self.catalog.index().has_recipe(id.as_str()) {
            issues.push(ValidationIssue::UnknownRecipe {
                field,
                id: id.clone(),
            });
        }
    }

    /// Issues for one item.
    #[must_use]
    pub fn item(&self, index: usize, item: &Item) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if item.id.is_empty() {
            issues.push(ValidationIssue::required("ID"));
        }
        if item.name.is_empty() {
            issues.push(ValidationIssue::required("Name"));
        }
        if item.description.is_empty() {
            issues.push(ValidationIssue::required("Description"));
        }
        if item.max_stack == 0 {
            issues.push(ValidationIssue::out_of_range("Max stack", ">= 1"));
        }

        match &item.kind {
            ItemKind::Equipment {
                equip_slot,
                base_stat,
                ..
            } => {
                if equip_slot.is_none() {
                    issues.push(ValidationIssue::required("Equip slot"));
                }
                match base_stat {
                    None => issues.push(ValidationIssue::required("Base stat")),
                    Some(stat) if !stat.is_finite() => {
                        issues.push(ValidationIssue::out_of_range("Base stat", "a finite number"));
                    }
                    Some(_) => {}
                }
            }
            ItemKind::Consumable {
                effect_type,
                effect_amount,
                effect_duration,
            } => {
                if effect_type.is_none() {
                    issues.push(ValidationIssue::required("Effect type"));
                }
                for (field, value) in [
                    ("Effect amount", effect_amount),
                    ("Effect duration", effect_duration),
                ] {
                    match value {
                        None => issues.push(ValidationIssue::required(field)),
                        Some(v) if !non_negative(*v) => {
                            issues.push(ValidationIssue::out_of_range(field, ">= 0"));
                        }
                        Some(_) => {}
                    }
                }
            }
            ItemKind::Placeable { behavior_type } => {
                if behavior_type.is_none() {
                    issues.push(ValidationIssue::required("Behavior type"));
                }
            }
            ItemKind::Resource => {}
        }

        let first = self.catalog.index().item(item.id.as_str());
        issues.extend(Self::duplicate_id(EntityKind::Item, item.id.as_str(), index, first));
        self.lint("ID", item.id.as_str(), &mut issues);

        issues
    }

    /// Issues for one recipe.
    #[must_use]
    pub fn recipe(&self, index: usize, recipe: &Recipe) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        // Structural
        if recipe.id.is_empty() {
            issues.push(ValidationIssue::required("ID"));
        }
        if recipe.output_item_id.is_empty() {
            issues.push(ValidationIssue::required("Output item"));
        }
        if recipe.output_amount == 0 {
            issues.push(ValidationIssue::out_of_range("Output amount", ">= 1"));
        }
        if recipe.skilled_difficulty > MAX_DIFFICULTY {
            issues.push(ValidationIssue::out_of_range(
                "Skilled difficulty",
                format!("0-{MAX_DIFFICULTY}"),
            ));
        }
        if recipe.materials.is_empty() {
            issues.push(ValidationIssue::required("At least 1 material"));
        }
        for (i, material) in recipe.materials.iter().enumerate() {
            if material.item_id.is_empty() {
                issues.push(ValidationIssue::required(format!("Material {}: Item ID", i + 1)));
            }
            if material.amount == 0 {
                issues.push(ValidationIssue::out_of_range(
                    format!("Material {}: Amount", i + 1),
                    ">= 1",
                ));
            }
        }
        let first = self.catalog.index().recipe(recipe.id.as_str());
        issues.extend(Self::duplicate_id(EntityKind::Recipe, recipe.id.as_str(), index, first));
        self.lint("ID", recipe.id.as_str(), &mut issues);

        // Referential
        self.check_item_ref("Output item".to_string(), &recipe.output_item_id, &mut issues);
        for (i, material) in recipe.materials.iter().enumerate() {
            self.check_item_ref(format!("Material {}: item", i + 1), &material.item_id, &mut issues);
        }

        issues
    }

    /// Issues for one workstation.
    #[must_use]
    pub fn workstation(&self, index: usize, workstation: &Workstation) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let def_id = &workstation.workstation_def_id;

        // Structural
        if def_id.is_empty() {
            issues.push(ValidationIssue::required("Workstation def ID"));
        }
        for (i, recipe) in workstation.available_recipes.iter().enumerate() {
            if recipe.is_empty() {
                issues.push(ValidationIssue::required(format!("Recipe {}: ID", i + 1)));
            }
        }
        issues.extend(duplicate_entries("available_recipes", &workstation.available_recipes));

        for (i, upgrade) in workstation.upgrades.iter().enumerate() {
            let label = format!("Upgrade {}", i + 1);
            if upgrade.id.is_empty() {
                issues.push(ValidationIssue::required(format!("{label}: ID")));
            }
            if !(1..=MAX_UPGRADE_LEVEL).contains(&upgrade.target_level) {
                issues.push(ValidationIssue::out_of_range(
                    format!("{label}: Target level"),
                    format!("1-{MAX_UPGRADE_LEVEL}"),
                ));
            }
            for (j, recipe) in upgrade.available_recipes_ids.iter().enumerate() {
                if recipe.is_empty() {
                    issues.push(ValidationIssue::required(format!("{label}, Recipe {}: ID", j + 1)));
                }
            }
            issues.extend(duplicate_entries(&label, &upgrade.available_recipes_ids));
            for (j, requirement) in upgrade.upgrade_requirements.iter().enumerate() {
                if requirement.item_id.is_empty() {
                    issues.push(ValidationIssue::required(format!(
                        "{label}, Material {}: Item ID",
                        j + 1
                    )));
                }
                if requirement.amount == 0 {
                    issues.push(ValidationIssue::out_of_range(
                        format!("{label}, Material {}: Amount", j + 1),
                        ">= 1",
                    ));
                }
            }
        }

        let first = self.catalog.index().workstation(def_id.as_str());
        issues.extend(Self::duplicate_id(EntityKind::Workstation, def_id.as_str(), index, first));

        // Referential
        if !def_id.is_empty() {
            match self.catalog.item(def_id.as_str()) {
                None => issues.push(ValidationIssue::UnknownItem {
                    field: "Workstation def ID".to_string(),
                    id: def_id.clone(),
                }),
                Some(item) if item.item_type() != ItemType::Placeable => {
                    issues.push(ValidationIssue::NotPlaceable {
                        id: def_id.clone(),
                        actual: item.item_type(),
                    });
                }
                Some(item) if !item.is_workstation_placeable() => {
                    issues.push(ValidationIssue::NotWorkstation {
                        id: def_id.clone(),
                        actual: item.placeable_behavior(),
                    });
                }
                Some(_) => {}
            }
        }
        for recipe in &workstation.available_recipes {
            self.check_recipe_ref("available_recipes: Recipe".to_string(), recipe, &mut issues);
        }
        for (i, upgrade) in workstation.upgrades.iter().enumerate() {
            for recipe in &upgrade.available_recipes_ids {
                self.check_recipe_ref(format!("Upgrade {}: Recipe", i + 1), recipe, &mut issues);
            }
            for (j, requirement) in upgrade.upgrade_requirements.iter().enumerate() {
                self.check_item_ref(
                    format!("Upgrade {}, Material {}: item", i + 1, j + 1),
                    &requirement.item_id,
                    &mut issues,
                );
            }
        }

        issues
    }

    /// Issues for the makeshift config.
    #[must_use]
    pub fn makeshift(&self, makeshift: &MakeshiftConfig) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for (i, recipe) in makeshift.available_recipes.iter().enumerate() {
            if recipe.is_empty() {
                issues.push(ValidationIssue::required(format!("Recipe {}: ID", i + 1)));
            }
        }
        issues.extend(duplicate_entries("available_recipes", &makeshift.available_recipes));

        for (i, recipe) in makeshift.available_recipes.iter().enumerate() {
            self.check_recipe_ref(format!("Recipe {}:", i + 1), recipe, &mut issues);
        }

        issues
    }

    /// Issues for one breakable resource.
    #[must_use]
    pub fn breakable(&self, index: usize, breakable: &BreakableResource) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        // Structural
        if breakable.id.is_empty() {
            issues.push(ValidationIssue::required("ID"));
        }
        if !non_negative(breakable.hardness) {
            issues.push(ValidationIssue::out_of_range("Hardness", "a finite number >= 0"));
        }
        if !non_negative(breakable.regen_seconds) {
            issues.push(ValidationIssue::out_of_range("Regen seconds", "a finite number >= 0"));
        }
        for (i, entry) in breakable.drop_table.iter().enumerate() {
            let label = format!("Drop {}", i + 1);
            if entry.item_id.is_empty() {
                issues.push(ValidationIssue::required(format!("{label}: Item ID")));
            }
            if entry.weight == 0 {
                issues.push(ValidationIssue::out_of_range(format!("{label}: Weight"), ">= 1"));
            }
            if entry.min_amount == 0 {
                issues.push(ValidationIssue::out_of_range(format!("{label}: Min amount"), ">= 1"));
            }
            if entry.max_amount < entry.min_amount {
                issues.push(ValidationIssue::out_of_range(
                    format!("{label}: Max amount"),
                    ">= min amount",
                ));
            }
        }
        let first = self.catalog.index().breakable(breakable.id.as_str());
        issues.extend(Self::duplicate_id(EntityKind::Breakable, breakable.id.as_str(), index, first));
        self.lint("ID", breakable.id.as_str(), &mut issues);

        // Referential
        for (i, entry) in breakable.drop_table.iter().enumerate() {
            self.check_item_ref(format!("Drop {}: Item", i + 1), &entry.item_id, &mut issues);
        }

        issues
    }
}

/// Validate a whole catalog.
#[must_use]
pub fn validate_catalog(catalog: &Catalog, options: ValidationOptions) -> ValidationReport {
    Validator::new(catalog, options).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakables::DropEntry;
    use crate::items::{EquipSlot, PlaceableBehavior};
    use crate::workstations::Upgrade;

    fn base_items() -> Vec<Item> {
        vec![
            Item::resource("wood", "Wood").with_description("Logs"),
            Item::resource("stone", "Stone").with_description("Rocks"),
            Item::placeable("workbench", "Workbench", PlaceableBehavior::Workstation)
                .with_description("Crafting table"),
            Item::placeable("chest", "Chest", PlaceableBehavior::Storage).with_description("Storage"),
            Item::equipment("axe", "Axe", EquipSlot::HarvestingTool, 3.0).with_description("Chops"),
        ]
    }

    fn valid_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.replace_items(base_items());
        catalog.replace_recipes(vec![
            Recipe::new("axe_recipe", "axe").material("wood", 2).material("stone", 1),
        ]);
        catalog.replace_workstations(vec![Workstation::new("workbench")
            .recipe("axe_recipe")
            .upgrade(Upgrade::new("workbench_1", 1).requires("stone", 5))]);
        catalog.replace_makeshift(MakeshiftConfig {
            available_recipes: vec![RecipeId::new("axe_recipe")],
        });
        catalog.replace_breakables(vec![
            BreakableResource::new("rock").drop_entry(DropEntry::new("stone", 3).amount(1, 2)),
        ]);
        catalog
    }

    #[test]
    fn test_valid_catalog_passes() {
        let report = validate_catalog(&valid_catalog(), ValidationOptions::default());
        assert!(report.is_valid(), "{:?}", report);
        assert_eq!(report.checked_entities(), 5 + 1 + 1 + 1 + 1);
    }

    #[test]
    fn test_missing_output_reported_once() {
        let mut catalog = valid_catalog();
        catalog.replace_recipes(vec![Recipe::new("ghost", "missing")
            .material("nope_1", 1)
            .material("nope_2", 0)]);
        let report = validate_catalog(&catalog, ValidationOptions::default());
        let issues = report.issues_for(EntityKind::Recipe, 0);

        let output_errors = issues
            .iter()
            .filter(|i| matches!(i, ValidationIssue::UnknownItem { field, .. } if field == "Output item"))
            .count();
        assert_eq!(output_errors, 1);
        assert_eq!(
            issues.iter().filter(|i| matches!(i, ValidationIssue::UnknownItem { .. })).count(),
            3
        );
    }

    #[test]
    fn test_structural_before_referential() {
        let mut catalog = valid_catalog();
        catalog.replace_recipes(vec![Recipe::new("r", "missing").material("", 0).material("ghost", 1)]);
        let report = validate_catalog(&catalog, ValidationOptions::default());
        let categories: Vec<IssueCategory> = report
            .issues_for(EntityKind::Recipe, 0)
            .iter()
            .map(ValidationIssue::category)
            .collect();
        let first_referential = categories
            .iter()
            .position(|c| *c == IssueCategory::Referential)
            .unwrap();
        assert!(categories[..first_referential].iter().all(|c| *c == IssueCategory::Structural));
        assert!(categories[first_referential..].iter().all(|c| *c == IssueCategory::Referential));
        assert_eq!(report.messages_for(EntityKind::Recipe, 0)[0], "Material 1: Item ID required");
    }

    #[test]
    fn test_workstation_backing_item_kinds() {
        let mut catalog = valid_catalog();
        catalog.replace_workstations(vec![
            Workstation::new("chest"),
            Workstation::new("wood"),
            Workstation::new("nothing"),
        ]);
        let report = validate_catalog(&catalog, ValidationOptions::default());

        assert_eq!(
            report.issues_for(EntityKind::Workstation, 0),
            &[ValidationIssue::NotWorkstation {
                id: ItemId::new("chest"),
                actual: Some(PlaceableBehavior::Storage),
            }]
        );
        assert_eq!(
            report.issues_for(EntityKind::Workstation, 1),
            &[ValidationIssue::NotPlaceable {
                id: ItemId::new("wood"),
                actual: ItemType::Resource,
            }]
        );
        assert!(matches!(
            report.issues_for(EntityKind::Workstation, 2),
            [ValidationIssue::UnknownItem { .. }]
        ));
        assert_eq!(
            report.messages_for(EntityKind::Workstation, 1)[0],
            "Item \"wood\" is not a placeable (type: Resource)"
        );
    }

    #[test]
    fn test_upgrade_checks() {
        let mut catalog = valid_catalog();
        catalog.replace_workstations(vec![Workstation::new("workbench").upgrade(
            Upgrade::new("", 5)
                .unlock_recipe("axe_recipe")
                .unlock_recipe("axe_recipe")
                .unlock_recipe("ghost")
                .requires("stone", 0),
        )]);
        let report = validate_catalog(&catalog, ValidationOptions::default());
        let messages = report.messages_for(EntityKind::Workstation, 0);
        assert_eq!(
            messages,
            vec![
                "Upgrade 1: ID required".to_string(),
                "Upgrade 1: Target level must be 1-4".to_string(),
                "Upgrade 1: recipe \"axe_recipe\" listed more than once".to_string(),
                "Upgrade 1, Material 1: Amount must be >= 1".to_string(),
                "Upgrade 1: Recipe \"ghost\" not found in recipes catalog".to_string(),
            ]
        );
    }

    #[test]
    fn test_item_variant_fields() {
        let mut potion = Item::new("potion", "Potion", ItemType::Consumable).with_description("Heals");
        potion.kind = ItemKind::Consumable {
            effect_type: None,
            effect_amount: Some(-1.0),
            effect_duration: None,
        };
        let mut catalog = valid_catalog();
        catalog.add_item(potion).unwrap();
        let report = validate_catalog(&catalog, ValidationOptions::default());
        assert_eq!(
            report.messages_for(EntityKind::Item, 5),
            vec![
                "Effect type required".to_string(),
                "Effect amount must be >= 0".to_string(),
                "Effect duration required".to_string(),
            ]
        );
    }

    #[test]
    fn test_duplicate_ids_flag_later_occurrences() {
        let mut catalog = valid_catalog();
        let mut items = base_items();
        items.push(Item::resource("wood", "More Wood").with_description("Again"));
        catalog.replace_items(items);
        let report = validate_catalog(&catalog, ValidationOptions::default());
        assert!(report.issues_for(EntityKind::Item, 0).is_empty());
        assert_eq!(
            report.issues_for(EntityKind::Item, 5),
            &[ValidationIssue::DuplicateId {
                kind: EntityKind::Item,
                id: "wood".to_string(),
                first_index: 0,
            }]
        );
    }

    #[test]
    fn test_breakable_checks() {
        let mut catalog = valid_catalog();
        let mut rock = BreakableResource::new("rock")
            .drop_entry(DropEntry::new("stone", 0).amount(3, 2))
            .drop_entry(DropEntry::new("gold", 1));
        rock.hardness = -1.0;
        catalog.replace_breakables(vec![rock]);
        let report = validate_catalog(&catalog, ValidationOptions::default());
        assert_eq!(
            report.messages_for(EntityKind::Breakable, 0),
            vec![
                "Hardness must be a finite number >= 0".to_string(),
                "Drop 1: Weight must be >= 1".to_string(),
                "Drop 1: Max amount must be >= min amount".to_string(),
                "Drop 2: Item \"gold\" not found in items catalog".to_string(),
            ]
        );
    }

    #[test]
    fn test_makeshift_references() {
        let mut catalog = valid_catalog();
        catalog.replace_makeshift(MakeshiftConfig {
            available_recipes: vec![RecipeId::new("ghost"), RecipeId::new("")],
        });
        let report = validate_catalog(&catalog, ValidationOptions::default());
        let issues = report.issues_for(EntityKind::Makeshift, 0);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].category(), IssueCategory::Structural);
        assert_eq!(issues[1].category(), IssueCategory::Referential);
    }

    #[test]
    fn test_issues_for_addresses_exact_entity() {
        let mut catalog = valid_catalog();
        catalog.replace_items(vec![
            Item::resource("", "Nameless").with_description("No id"),
            Item::resource("wood", "Wood").with_description("Logs"),
            Item::resource("zinc", "").with_description("No name"),
        ]);
        catalog.replace_recipes(Vec::new());
        catalog.replace_workstations(Vec::new());
        catalog.replace_makeshift(MakeshiftConfig::default());
        catalog.replace_breakables(vec![BreakableResource::new("")]);
        let report = validate_catalog(&catalog, ValidationOptions::default());

        assert_eq!(report.messages_for(EntityKind::Item, 0), vec!["ID required".to_string()]);
        assert!(report.issues_for(EntityKind::Item, 1).is_empty());
        assert_eq!(report.messages_for(EntityKind::Item, 2), vec!["Name required".to_string()]);
        assert!(report.issues_for(EntityKind::Item, 3).is_empty());
        assert!(report.issues_for(EntityKind::Recipe, 0).is_empty());
        assert_eq!(report.messages_for(EntityKind::Breakable, 0), vec!["ID required".to_string()]);
    }

    #[test]
    fn test_id_lint_is_optional() {
        let mut catalog = valid_catalog();
        catalog.add_item(Item::resource("Iron Ore", "Iron Ore").with_description("Ore")).unwrap();

        let plain = validate_catalog(&catalog, ValidationOptions::default());
        assert!(plain.is_valid());

        let linted = validate_catalog(&catalog, ValidationOptions { lint_ids: true });
        assert_eq!(linted.issues_for(EntityKind::Item, 5).len(), 3);
        assert_eq!(linted.failing_entities(), 1);
    }
}
