//! Id lookup index over the catalog collections.

use ahash::AHashMap;
use tracing::debug;

use crate::breakables::BreakableResource;
use crate::items::Item;
use crate::recipes::Recipe;
use crate::workstations::Workstation;

/// id → position maps for every keyed collection.
///
/// Workstations are keyed by `workstation_def_id`. When an id occurs more than
/// once, the first occurrence is the one indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    items: AHashMap<String, usize>,
    recipes: AHashMap<String, usize>,
    workstations: AHashMap<String, usize>,
    breakables: AHashMap<String, usize>,
}

fn positions<'a>(ids: impl Iterator<Item = &'a str>) -> AHashMap<String, usize> {
    let mut map = AHashMap::new();
    for (position, id) in ids.enumerate() {
        map.entry(id.to_string()).or_insert(position);
    }
    map
}

impl ReferenceIndex {
    /// Build the index from scratch.
    #[must_use]
    pub fn build(
        items: &[Item],
        recipes: &[Recipe],
        workstations: &[Workstation],
        breakables: &[BreakableResource],
    ) -> Self {
        let index = Self {
            items: positions(items.iter().map(|i| i.id.as_str())),
            recipes: positions(recipes.iter().map(|r| r.id.as_str())),
            workstations: positions(workstations.iter().map(|w| w.workstation_def_id.as_str())),
            breakables: positions(breakables.iter().map(|b| b.id.as_str())),
        };
        debug!(
            "Indexed {} items, {} recipes, {} workstations, {} breakables",
            index.items.len(),
            index.recipes.len(),
            index.workstations.len(),
            index.breakables.len()
        );
        index
    }

    /// Position of the item with this id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<usize> {
        self.items.get(id).copied()
    }

    /// Position of the recipe with this id.
    #[must_use]
    pub fn recipe(&self, id: &str) -> Option<usize> {
        self.recipes.get(id).copied()
    }

    /// Position of the workstation backed by this item id.
    #[must_use]
    pub fn workstation(&self, def_id: &str) -> Option<usize> {
        self.workstations.get(def_id).copied()
    }

    /// Position of the breakable with this id.
    #[must_use]
    pub fn breakable(&self, id: &str) -> Option<usize> {
        self.breakables.get(id).copied()
    }

    /// True if an item with this id exists.
    #[must_use]
    pub fn has_item(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// True if a recipe with this id exists.
    #[must_use]
    pub fn has_recipe(&self, id: &str) -> bool {
        self.recipes.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_occurrence_wins() {
        let items = vec![
            Item::resource("wood", "Wood"),
            Item::resource("stone", "Stone"),
            Item::resource("wood", "Other Wood"),
        ];
        let index = ReferenceIndex::build(&items, &[], &[], &[]);
        assert_eq!(index.item("wood"), Some(0));
        assert_eq!(index.item("stone"), Some(1));
        assert_eq!(index.item("Wood"), None);
    }

    #[test]
    fn test_workstations_keyed_by_def_id() {
        let stations = vec![Workstation::new("anvil"), Workstation::new("loom")];
        let index = ReferenceIndex::build(&[], &[], &stations, &[]);
        assert_eq!(index.workstation("loom"), Some(1));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let recipes = vec![Recipe::new("a", "x"), Recipe::new("b", "y")];
        let breakables = vec![BreakableResource::new("rock")];
        let first = ReferenceIndex::build(&[], &recipes, &[], &breakables);
        let second = ReferenceIndex::build(&[], &recipes, &[], &breakables);
        assert_eq!(first, second);
        assert!(first.has_recipe("b"));
        assert_eq!(first.breakable("rock"), Some(0));
    }

    proptest! {
        #[test]
        fn prop_lookup_matches_linear_find(
            ids in proptest::collection::vec("[a-c]{1,2}", 0..20),
            lookup in "[a-c]{1,2}",
        ) {
            let items: Vec<Item> = ids.iter().map(|id| Item::resource(id.as_str(), "")).collect();
            let index = ReferenceIndex::build(&items, &[], &[], &[]);
            let expected = items.iter().position(|i| i.id.as_str() == lookup);
            prop_assert_eq!(index.item(&lookup), expected);
        }
    }
}
