//! Breakable resources and their drop tables.

use pixelcraft_common::{BreakableId, ItemId};
use serde::{Deserialize, Serialize};

use crate::drops::{self, ProbabilityView};

/// One weighted entry of a drop table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropEntry {
    /// Item dropped.
    #[serde(default)]
    pub item_id: ItemId,
    /// Relative weight.
    #[serde(default = "default_one")]
    pub weight: u32,
    /// Smallest amount dropped.
    #[serde(default = "default_one")]
    pub min_amount: u32,
    /// Largest amount dropped.
    #[serde(default = "default_one")]
    pub max_amount: u32,
}

const fn default_one() -> u32 {
    1
}

impl DropEntry {
    /// Create an entry dropping exactly one of the item.
    #[must_use]
    pub fn new(item_id: impl Into<ItemId>, weight: u32) -> Self {
        Self {
            item_id: item_id.into(),
            weight,
            min_amount: 1,
            max_amount: 1,
        }
    }

    /// Set the amount range.
    #[must_use]
    pub fn amount(mut self, min: u32, max: u32) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }
}

/// A resource node that yields loot when broken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakableResource {
    /// Unique id.
    pub id: BreakableId,
    /// Effort needed to break.
    #[serde(default)]
    pub hardness: f32,
    /// Seconds until it regenerates after breaking (0 = instant).
    #[serde(default)]
    pub regen_seconds: f32,
    /// Weighted loot entries. One entry is picked per break.
    #[serde(default)]
    pub drop_table: Vec<DropEntry>,
}

impl BreakableResource {
    /// Default hardness for new resources.
    pub const DEFAULT_HARDNESS: f32 = 10.0;

    /// Default regeneration time for new resources.
    pub const DEFAULT_REGEN_SECONDS: f32 = 60.0;

    /// Create a resource with default hardness and regen time.
    #[must_use]
    pub fn new(id: impl Into<BreakableId>) -> Self {
        Self {
            id: id.into(),
            hardness: Self::DEFAULT_HARDNESS,
            regen_seconds: Self::DEFAULT_REGEN_SECONDS,
            drop_table: Vec::new(),
        }
    }

    /// Append a drop entry.
    #[must_use]
    pub fn drop_entry(mut self, entry: DropEntry) -> Self {
        self.drop_table.push(entry);
        self
    }

    /// Sum of all entry weights.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        drops::total_weight(&self.drop_table)
    }

    /// Resolved drop chances for display.
    #[must_use]
    pub fn probability_view(&self) -> ProbabilityView {
        drops::probability_view(&self.drop_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_weight() {
        let rock = BreakableResource::new("rock")
            .drop_entry(DropEntry::new("stone", 7))
            .drop_entry(DropEntry::new("flint", 3).amount(1, 2));
        assert_eq!(rock.total_weight(), 10);
        assert!(rock.probability_view().is_distribution());
    }

    #[test]
    fn test_deserialize_entry_defaults() {
        let entry: DropEntry = serde_json::from_str(r#"{"item_id": "stone"}"#).unwrap();
        assert_eq!(entry, DropEntry::new("stone", 1));
    }
}
