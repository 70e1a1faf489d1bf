//! The catalog context.
//!
//! [`Catalog`] owns the five collections and the [`ReferenceIndex`] derived
//! from them. Every mutation goes through it and rebuilds the index before
//! returning, so lookups and validation never see stale positions.

use pixelcraft_common::{CatalogError, CatalogResult, EntityKind, RecipeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::balance::{balance_report, BalanceReport, BalanceThresholds};
use crate::breakables::BreakableResource;
use crate::index::ReferenceIndex;
use crate::items::{Item, ItemType};
use crate::makeshift::MakeshiftConfig;
use crate::naming::{find_duplicate_ids, id_from_name, next_copy_id, unique_id};
use crate::progression::ProgressionCurve;
use crate::recipes::Recipe;
use crate::stats::CatalogStats;
use crate::validation::{validate_catalog, ValidationOptions, ValidationReport};
use crate::workstations::Workstation;

// ============================================================================
// Keyed Entries
// ============================================================================

/// An entity stored in a keyed collection.
trait Keyed: Clone {
    const KIND: EntityKind;

    fn key(&self) -> &str;

    fn set_key(&mut self, key: String);
}

impl Keyed for Item {
    const KIND: EntityKind = EntityKind::Item;

    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn set_key(&mut self, key: String) {
        self.id = key.into();
    }
}

impl Keyed for Recipe {
    const KIND: EntityKind = EntityKind::Recipe;

    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn set_key(&mut self, key: String) {
        self.id = key.into();
    }
}

impl Keyed for Workstation {
    const KIND: EntityKind = EntityKind::Workstation;

    fn key(&self) -> &str {
        self.workstation_def_id.as_str()
    }

    fn set_key(&mut self, key: String) {
        self.workstation_def_id = key.into();
    }
}

impl Keyed for BreakableResource {
    const KIND: EntityKind = EntityKind::Breakable;

    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn set_key(&mut self, key: String) {
        self.id = key.into();
    }
}

fn check_index<T: Keyed>(entries: &[T], index: usize) -> CatalogResult<()> {
    if index < entries.len() {
        Ok(())
    } else {
        Err(CatalogError::IndexOutOfBounds {
            kind: T::KIND,
            index,
            len: entries.len(),
        })
    }
}

/// Reject empty keys and keys held by an entry other than `skip`.
fn check_key<T: Keyed>(entries: &[T], key: &str, skip: Option<usize>) -> CatalogResult<()> {
    if key.is_empty() {
        return Err(CatalogError::EmptyId { kind: T::KIND });
    }
    let taken = entries
        .iter()
        .enumerate()
        .any(|(i, e)| Some(i) != skip && e.key() == key);
    if taken {
        return Err(CatalogError::DuplicateId {
            kind: T::KIND,
            id: key.to_string(),
        });
    }
    Ok(())
}

fn add_entry<T: Keyed>(entries: &mut Vec<T>, entry: T) -> CatalogResult<usize> {
    check_key(entries, entry.key(), None)?;
    entries.push(entry);
    Ok(entries.len() - 1)
}

fn update_entry<T: Keyed>(entries: &mut [T], index: usize, entry: T) -> CatalogResult<()> {
    check_index(entries, index)?;
    check_key(entries, entry.key(), Some(index))?;
    entries[index] = entry;
    Ok(())
}

fn remove_entry<T: Keyed>(entries: &mut Vec<T>, index: usize) -> CatalogResult<T> {
    check_index(entries, index)?;
    Ok(entries.remove(index))
}

fn duplicate_entry<T: Keyed>(entries: &mut Vec<T>, index: usize) -> CatalogResult<usize> {
    check_index(entries, index)?;
    let mut copy = entries[index].clone();
    let key = next_copy_id(copy.key(), |candidate| entries.iter().any(|e| e.key() == candidate));
    copy.set_key(key);
    entries.push(copy);
    Ok(entries.len() - 1)
}

// ============================================================================
// Catalog Data
// ============================================================================

/// Plain serializable form of a catalog, as handed over by an importer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    /// Item definitions.
    pub items: Vec<Item>,
    /// Recipes.
    pub recipes: Vec<Recipe>,
    /// Workstations.
    pub workstations: Vec<Workstation>,
    /// Hand-craftable recipes.
    pub makeshift: MakeshiftConfig,
    /// Breakable resources.
    pub breakables: Vec<BreakableResource>,
}

// ============================================================================
// Catalog
// ============================================================================

/// All catalog collections plus their lookup index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    recipes: Vec<Recipe>,
    workstations: Vec<Workstation>,
    makeshift: MakeshiftConfig,
    breakables: Vec<BreakableResource>,
    index: ReferenceIndex,
    generation: u64,
}

impl From<CatalogData> for Catalog {
    fn from(data: CatalogData) -> Self {
        let mut catalog = Self {
            items: data.items,
            recipes: data.recipes,
            workstations: data.workstations,
            makeshift: data.makeshift,
            breakables: data.breakables,
            index: ReferenceIndex::default(),
            generation: 0,
        };
        catalog.reindex();
        catalog
    }
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the collections out.
    #[must_use]
    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            items: self.items.clone(),
            recipes: self.recipes.clone(),
            workstations: self.workstations.clone(),
            makeshift: self.makeshift.clone(),
            breakables: self.breakables.clone(),
        }
    }

    fn reindex(&mut self) {
        self.index = ReferenceIndex::build(
            &self.items,
            &self.recipes,
            &self.workstations,
            &self.breakables,
        );
    }

    fn touch(&mut self, change: &str) {
        self.generation += 1;
        self.reindex();
        debug!("Catalog {change} (generation {})", self.generation);
    }

    // --- Accessors ---

    /// Items in catalog order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Recipes in catalog order.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Workstations in catalog order.
    #[must_use]
    pub fn workstations(&self) -> &[Workstation] {
        &self.workstations
    }

    /// Hand-crafting config.
    #[must_use]
    pub fn makeshift(&self) -> &MakeshiftConfig {
        &self.makeshift
    }

    /// Breakables in catalog order.
    #[must_use]
    pub fn breakables(&self) -> &[BreakableResource] {
        &self.breakables
    }

    /// Current lookup index.
    #[must_use]
    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }

    /// Number of successful mutations so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.index.item(id).map(|i| &self.items[i])
    }

    /// Recipe by id.
    #[must_use]
    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.index.recipe(id).map(|i| &self.recipes[i])
    }

    /// Workstation by backing item id.
    #[must_use]
    pub fn workstation(&self, def_id: &str) -> Option<&Workstation> {
        self.index.workstation(def_id).map(|i| &self.workstations[i])
    }

    /// Breakable by id.
    #[must_use]
    pub fn breakable(&self, id: &str) -> Option<&BreakableResource> {
        self.index.breakable(id).map(|i| &self.breakables[i])
    }

    /// True if every collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.recipes.is_empty()
            && self.workstations.is_empty()
            && self.makeshift.is_empty()
            && self.breakables.is_empty()
    }

    fn keys(&self, kind: EntityKind) -> Vec<&str> {
        match kind {
            EntityKind::Item => self.items.iter().map(Keyed::key).collect(),
            EntityKind::Recipe => self.recipes.iter().map(Keyed::key).collect(),
            EntityKind::Workstation => self.workstations.iter().map(Keyed::key).collect(),
            EntityKind::Breakable => self.breakables.iter().map(Keyed::key).collect(),
            EntityKind::Makeshift => Vec::new(),
        }
    }

    fn is_taken(&self, kind: EntityKind, id: &str) -> bool {
        match kind {
            EntityKind::Item => self.index.item(id).is_some(),
            EntityKind::Recipe => self.index.recipe(id).is_some(),
            EntityKind::Workstation => self.index.workstation(id).is_some(),
            EntityKind::Breakable => self.index.breakable(id).is_some(),
            EntityKind::Makeshift => false,
        }
    }

    /// Free id derived from a display name, e.g. `"Iron Sword"` -> `iron_sword`
    /// (or `iron_sword_2` when taken).
    ///
    /// Returns `None` for the makeshift config, which has no id, and for names
    /// with no usable characters.
    #[must_use]
    pub fn suggest_id(&self, kind: EntityKind, name: &str) -> Option<String> {
        if kind == EntityKind::Makeshift {
            return None;
        }
        let base = id_from_name(name)?;
        Some(unique_id(&base, |candidate| self.is_taken(kind, candidate)))
    }

    /// Ids held by more than one entity of a collection, in order of first repeat.
    #[must_use]
    pub fn duplicate_ids(&self, kind: EntityKind) -> Vec<String> {
        find_duplicate_ids(self.keys(kind))
            .into_iter()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    // --- Bulk replacement ---

    /// Replace all items. Duplicate ids are kept and reported by validation.
    pub fn replace_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.touch("items replaced");
    }

    /// Replace all recipes.
    pub fn replace_recipes(&mut self, recipes: Vec<Recipe>) {
        self.recipes = recipes;
        self.touch("recipes replaced");
    }

    /// Replace all workstations.
    pub fn replace_workstations(&mut self, workstations: Vec<Workstation>) {
        self.workstations = workstations;
        self.touch("workstations replaced");
    }

    /// Replace the makeshift config.
    pub fn replace_makeshift(&mut self, makeshift: MakeshiftConfig) {
        self.makeshift = makeshift;
        self.touch("makeshift replaced");
    }

    /// Replace all breakables.
    pub fn replace_breakables(&mut self, breakables: Vec<BreakableResource>) {
        self.breakables = breakables;
        self.touch("breakables replaced");
    }

    /// Clear every collection.
    pub fn reset(&mut self) {
        self.items.clear();
        self.recipes.clear();
        self.workstations.clear();
        self.makeshift = MakeshiftConfig::default();
        self.breakables.clear();
        self.touch("reset");
    }

    // --- Items ---

    /// Append an item. Returns its index.
    pub fn add_item(&mut self, item: Item) -> CatalogResult<usize> {
        let index = add_entry(&mut self.items, item)?;
        self.touch("item added");
        Ok(index)
    }

    /// Overwrite the item at `index`.
    pub fn update_item(&mut self, index: usize, item: Item) -> CatalogResult<()> {
        update_entry(&mut self.items, index, item)?;
        self.touch("item updated");
        Ok(())
    }

    /// Change an item's type, dropping the old type's fields.
    pub fn set_item_type(&mut self, index: usize, item_type: ItemType) -> CatalogResult<()> {
        check_index(&self.items, index)?;
        self.items[index].set_type(item_type);
        self.touch("item type changed");
        Ok(())
    }

    /// Remove and return the item at `index`. References to it are left dangling.
    pub fn remove_item(&mut self, index: usize) -> CatalogResult<Item> {
        let item = remove_entry(&mut self.items, index)?;
        self.touch("item removed");
        Ok(item)
    }

    /// Append a copy of the item at `index` under a fresh id. Returns the copy's index.
    pub fn duplicate_item(&mut self, index: usize) -> CatalogResult<usize> {
        let copy = duplicate_entry(&mut self.items, index)?;
        self.touch("item duplicated");
        Ok(copy)
    }

    // --- Recipes ---

    /// Append a recipe. Returns its index.
    pub fn add_recipe(&mut self, recipe: Recipe) -> CatalogResult<usize> {
        let index = add_entry(&mut self.recipes, recipe)?;
        self.touch("recipe added");
        Ok(index)
    }

    /// Overwrite the recipe at `index`.
    pub fn update_recipe(&mut self, index: usize, recipe: Recipe) -> CatalogResult<()> {
        update_entry(&mut self.recipes, index, recipe)?;
        self.touch("recipe updated");
        Ok(())
    }

    /// Remove and return the recipe at `index`.
    pub fn remove_recipe(&mut self, index: usize) -> CatalogResult<Recipe> {
        let recipe = remove_entry(&mut self.recipes, index)?;
        self.touch("recipe removed");
        Ok(recipe)
    }

    /// Append a copy of the recipe at `index` under a fresh id.
    pub fn duplicate_recipe(&mut self, index: usize) -> CatalogResult<usize> {
        let copy = duplicate_entry(&mut self.recipes, index)?;
        self.touch("recipe duplicated");
        Ok(copy)
    }

    // --- Workstations ---

    /// Append a workstation. Its backing item id must be unused by other workstations.
    pub fn add_workstation(&mut self, workstation: Workstation) -> CatalogResult<usize> {
        let index = add_entry(&mut self.workstations, workstation)?;
        self.touch("workstation added");
        Ok(index)
    }

    /// Overwrite the workstation at `index`.
    pub fn update_workstation(&mut self, index: usize, workstation: Workstation) -> CatalogResult<()> {
        update_entry(&mut self.workstations, index, workstation)?;
        self.touch("workstation updated");
        Ok(())
    }

    /// Remove and return the workstation at `index`.
    pub fn remove_workstation(&mut self, index: usize) -> CatalogResult<Workstation> {
        let workstation = remove_entry(&mut self.workstations, index)?;
        self.touch("workstation removed");
        Ok(workstation)
    }

    /// Append a copy of the workstation at `index` under a fresh backing id.
    pub fn duplicate_workstation(&mut self, index: usize) -> CatalogResult<usize> {
        let copy = duplicate_entry(&mut self.workstations, index)?;
        self.touch("workstation duplicated");
        Ok(copy)
    }

    // --- Makeshift ---

    /// Add the recipe to the hand-craftable set, or remove it if present.
    /// Returns true if the recipe is now included.
    pub fn toggle_makeshift_recipe(&mut self, recipe_id: impl Into<RecipeId>) -> CatalogResult<bool> {
        let recipe_id = recipe_id.into();
        if recipe_id.is_empty() {
            return Err(CatalogError::EmptyId {
                kind: EntityKind::Makeshift,
            });
        }
        let included = self.makeshift.toggle(recipe_id);
        self.touch("makeshift toggled");
        Ok(included)
    }

    // --- Breakables ---

    /// Append a breakable. Returns its index.
    pub fn add_breakable(&mut self, breakable: BreakableResource) -> CatalogResult<usize> {
        let index = add_entry(&mut self.breakables, breakable)?;
        self.touch("breakable added");
        Ok(index)
    }

    /// Overwrite the breakable at `index`.
    pub fn update_breakable(&mut self, index: usize, breakable: BreakableResource) -> CatalogResult<()> {
        update_entry(&mut self.breakables, index, breakable)?;
        self.touch("breakable updated");
        Ok(())
    }

    /// Remove and return the breakable at `index`.
    pub fn remove_breakable(&mut self, index: usize) -> CatalogResult<BreakableResource> {
        let breakable = remove_entry(&mut self.breakables, index)?;
        self.touch("breakable removed");
        Ok(breakable)
    }

    /// Append a copy of the breakable at `index` under a fresh id.
    pub fn duplicate_breakable(&mut self, index: usize) -> CatalogResult<usize> {
        let copy = duplicate_entry(&mut self.breakables, index)?;
        self.touch("breakable duplicated");
        Ok(copy)
    }

    // --- Derived views ---

    /// Run every validation check.
    #[must_use]
    pub fn validate(&self, options: ValidationOptions) -> ValidationReport {
        validate_catalog(self, options)
    }

    /// Per-collection counters.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::compute(
            &self.items,
            &self.recipes,
            &self.workstations,
            &self.makeshift,
            &self.breakables,
        )
    }

    /// XP balance analysis of the items against a curve.
    #[must_use]
    pub fn balance_report(&self, curve: &ProgressionCurve, thresholds: &BalanceThresholds) -> BalanceReport {
        balance_report(&self.items, curve, thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemKind, PlaceableBehavior};

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.replace_items(vec![
            Item::resource("wood", "Wood").with_description("Logs"),
            Item::resource("plank", "Plank").with_description("Boards"),
            Item::placeable("workbench", "Workbench", PlaceableBehavior::Workstation)
                .with_description("Table"),
        ]);
        catalog.replace_recipes(vec![Recipe::new("plank_recipe", "plank").material("wood", 1)]);
        catalog
    }

    #[test]
    fn test_lookup_through_index() {
        let catalog = catalog();
        assert_eq!(catalog.item("plank").map(|i| i.name.as_str()), Some("Plank"));
        assert!(catalog.item("Plank").is_none());
        assert!(catalog.recipe("plank_recipe").is_some());
        assert_eq!(catalog.generation(), 2);
    }

    #[test]
    fn test_add_rejects_empty_and_duplicate_ids() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.add_item(Item::resource("", "Nameless")),
            Err(CatalogError::EmptyId {
                kind: EntityKind::Item
            })
        );
        assert_eq!(
            catalog.add_item(Item::resource("wood", "Wood")),
            Err(CatalogError::DuplicateId {
                kind: EntityKind::Item,
                id: "wood".to_string(),
            })
        );
        assert_eq!(catalog.generation(), 2);
    }

    #[test]
    fn test_index_refreshed_after_remove() {
        let mut catalog = catalog();
        let removed = catalog.remove_item(0).unwrap();
        assert_eq!(removed.id.as_str(), "wood");
        assert!(catalog.item("wood").is_none());
        assert_eq!(catalog.index().item("plank"), Some(0));
    }

    #[test]
    fn test_out_of_range_index() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.remove_recipe(5),
            Err(CatalogError::IndexOutOfBounds {
                kind: EntityKind::Recipe,
                index: 5,
                len: 1,
            })
        );
        assert!(catalog.update_breakable(0, BreakableResource::new("rock")).is_err());
    }

    #[test]
    fn test_update_allows_same_id_but_not_collision() {
        let mut catalog = catalog();
        let mut wood = catalog.items()[0].clone();
        wood.name = "Oak".to_string();
        assert!(catalog.update_item(0, wood).is_ok());
        assert_eq!(catalog.items()[0].name, "Oak");

        let clash = Item::resource("plank", "Plank");
        assert!(matches!(
            catalog.update_item(0, clash),
            Err(CatalogError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_duplicate_assigns_free_ids() {
        let mut catalog = catalog();
        let first = catalog.duplicate_item(0).unwrap();
        let second = catalog.duplicate_item(0).unwrap();
        assert_eq!(catalog.items()[first].id.as_str(), "wood_copy");
        assert_eq!(catalog.items()[second].id.as_str(), "wood_copy_2");
        assert_eq!(catalog.item("wood_copy_2").map(|i| i.name.as_str()), Some("Wood"));
    }

    #[test]
    fn test_duplicate_then_validate_matches_original() {
        let mut catalog = catalog();
        // Broken on purpose: unknown material
        catalog
            .add_recipe(Recipe::new("bad", "plank").material("ghost", 1))
            .unwrap();
        let copy = catalog.duplicate_recipe(1).unwrap();

        let report = catalog.validate(ValidationOptions::default());
        assert_eq!(
            report.issues_for(EntityKind::Recipe, 1),
            report.issues_for(EntityKind::Recipe, copy)
        );
        assert!(!report
            .issues_for(EntityKind::Recipe, copy)
            .iter()
            .any(|i| matches!(i, crate::validation::ValidationIssue::DuplicateId { .. })));
    }

    #[test]
    fn test_suggest_id_avoids_taken_ids() {
        let mut catalog = catalog();
        assert_eq!(catalog.suggest_id(EntityKind::Item, "Iron Sword").as_deref(), Some("iron_sword"));
        assert_eq!(catalog.suggest_id(EntityKind::Item, "Plank").as_deref(), Some("plank_2"));
        // Ids are per collection
        assert_eq!(catalog.suggest_id(EntityKind::Breakable, "Plank").as_deref(), Some("plank"));
        assert_eq!(catalog.suggest_id(EntityKind::Item, "???"), None);
        assert_eq!(catalog.suggest_id(EntityKind::Makeshift, "Plank"), None);

        let id = catalog.suggest_id(EntityKind::Item, "Wood").unwrap();
        assert_eq!(id, "wood_2");
        catalog.add_item(Item::resource(id.as_str(), "Wood")).unwrap();
        assert_eq!(catalog.suggest_id(EntityKind::Item, "Wood").as_deref(), Some("wood_3"));
    }

    #[test]
    fn test_duplicate_ids_after_import() {
        let mut catalog = catalog();
        assert!(catalog.duplicate_ids(EntityKind::Item).is_empty());
        catalog.replace_items(vec![
            Item::resource("wood", "Wood"),
            Item::resource("", "Blank"),
            Item::resource("wood", "Wood Again"),
            Item::resource("", "Blank Again"),
        ]);
        assert_eq!(catalog.duplicate_ids(EntityKind::Item), vec!["wood".to_string()]);
        assert!(catalog.duplicate_ids(EntityKind::Makeshift).is_empty());
    }

    #[test]
    fn test_set_item_type_clears_payload() {
        let mut catalog = catalog();
        catalog.set_item_type(2, ItemType::Resource).unwrap();
        assert_eq!(catalog.items()[2].kind, ItemKind::Resource);
        catalog.set_item_type(2, ItemType::Placeable).unwrap();
        assert_eq!(catalog.items()[2].placeable_behavior(), None);
    }

    #[test]
    fn test_toggle_makeshift() {
        let mut catalog = catalog();
        assert_eq!(catalog.toggle_makeshift_recipe("plank_recipe"), Ok(true));
        assert!(catalog.makeshift().contains("plank_recipe"));
        assert_eq!(catalog.toggle_makeshift_recipe("plank_recipe"), Ok(false));
        assert!(catalog.toggle_makeshift_recipe("").is_err());
    }

    #[test]
    fn test_reset_and_round_trip_data() {
        let mut catalog = catalog();
        let data = catalog.to_data();
        let restored = Catalog::from(data.clone());
        assert_eq!(restored.to_data(), data);
        assert_eq!(restored.generation(), 0);

        catalog.reset();
        assert!(catalog.is_empty());
        assert!(catalog.item("wood").is_none());
    }
}
