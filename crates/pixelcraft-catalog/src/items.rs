//! Item definitions.
//!
//! This module provides:
//! - The item record with its type-specific payload
//! - Equipment slots, consumable effects and placeable behaviors
//! - Helpers used by validation and balance reporting

use pixelcraft_common::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Default stack size for new items.
pub const DEFAULT_MAX_STACK: u32 = 99;

// ============================================================================
// Item Types
// ============================================================================

/// Discriminant of [`ItemKind`], used for filtering and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemType {
    /// Wearable or wieldable gear.
    Equipment,
    /// Raw material.
    Resource,
    /// Single-use item with an effect.
    Consumable,
    /// Item that can be placed in the world.
    Placeable,
}

impl ItemType {
    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Equipment => "Equipment",
            Self::Resource => "Resource",
            Self::Consumable => "Consumable",
            Self::Placeable => "Placeable",
        }
    }

    /// Get all item types.
    #[must_use]
    pub fn all() -> &'static [ItemType] {
        &[Self::Equipment, Self::Resource, Self::Consumable, Self::Placeable]
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Slot an equipment item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    /// Body armor.
    Armor,
    /// Weapon hand.
    Weapon,
    /// Pickaxes, axes and similar tools.
    HarvestingTool,
}

impl EquipSlot {
    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Armor => "Armor",
            Self::Weapon => "Weapon",
            Self::HarvestingTool => "Harvesting Tool",
        }
    }
}

/// Effect applied when a consumable is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    /// Heals gradually over the effect duration.
    HealOverTime,
    /// Heals immediately.
    InstantHeal,
    /// Increases movement speed.
    SpeedBoost,
    /// Increases damage dealt.
    DamageBoost,
    /// Raises maximum health.
    MaxHealthBoost,
    /// Increases harvesting yield.
    HarvestingBoost,
}

impl EffectType {
    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::HealOverTime => "Heal Over Time",
            Self::InstantHeal => "Instant Heal",
            Self::SpeedBoost => "Speed Boost",
            Self::DamageBoost => "Damage Boost",
            Self::MaxHealthBoost => "Max Health Boost",
            Self::HarvestingBoost => "Harvesting Boost",
        }
    }
}

/// What a placed item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceableBehavior {
    /// Can craft items with recipes.
    Workstation,
    /// Can store items.
    Storage,
    /// No interaction.
    Decoration,
    /// Custom interaction defined per placeable.
    Interactive,
    /// Generates resources over time.
    Generator,
}

impl PlaceableBehavior {
    /// Get display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Workstation => "Workstation",
            Self::Storage => "Storage",
            Self::Decoration => "Decoration",
            Self::Interactive => "Interactive",
            Self::Generator => "Generator",
        }
    }
}

impl fmt::Display for PlaceableBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Item Payload
// ============================================================================

/// Type-specific item fields.
///
/// Only the active variant's fields exist. Fields that an incomplete record
/// may leave unset are `Option` so validation can report them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ItemKind {
    /// Wearable or wieldable gear.
    Equipment {
        /// Slot the item occupies.
        #[serde(default)]
        equip_slot: Option<EquipSlot>,
        /// Armor value, damage or tool power.
        #[serde(default)]
        base_stat: Option<f32>,
        /// Never loses durability.
        #[serde(default)]
        is_unbreakable: bool,
        /// Player level needed to craft.
        #[serde(default)]
        required_level_to_craft: u32,
        /// XP granted when crafted.
        #[serde(default)]
        exp_after_craft: u32,
    },
    /// Raw material.
    #[default]
    Resource,
    /// Single-use item with an effect.
    Consumable {
        /// Effect applied on use.
        #[serde(default)]
        effect_type: Option<EffectType>,
        /// Effect strength.
        #[serde(default)]
        effect_amount: Option<f32>,
        /// Effect duration in seconds.
        #[serde(default)]
        effect_duration: Option<f32>,
    },
    /// Item that can be placed in the world.
    Placeable {
        /// What the placed item does.
        #[serde(default)]
        behavior_type: Option<PlaceableBehavior>,
    },
}

impl ItemKind {
    /// Get the discriminant.
    #[must_use]
    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Equipment { .. } => ItemType::Equipment,
            Self::Resource => ItemType::Resource,
            Self::Consumable { .. } => ItemType::Consumable,
            Self::Placeable { .. } => ItemType::Placeable,
        }
    }

    /// Empty payload for a freshly selected type.
    ///
    /// Switching an item's type replaces the whole payload, so no field of the
    /// previous type survives.
    #[must_use]
    pub fn blank(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Equipment => Self::Equipment {
                equip_slot: None,
                base_stat: None,
                is_unbreakable: false,
                required_level_to_craft: 0,
                exp_after_craft: 0,
            },
            ItemType::Resource => Self::Resource,
            ItemType::Consumable => Self::Consumable {
                effect_type: None,
                effect_amount: None,
                effect_duration: None,
            },
            ItemType::Placeable => Self::Placeable {
                behavior_type: None,
            },
        }
    }
}

// ============================================================================
// Item Definition
// ============================================================================

/// An item definition in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item id.
    pub id: ItemId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Description text.
    #[serde(default)]
    pub description: String,
    /// Maximum stack size.
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    /// Free-form designer metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Type and type-specific fields.
    #[serde(flatten)]
    pub kind: ItemKind,
}

const fn default_max_stack() -> u32 {
    DEFAULT_MAX_STACK
}

impl Item {
    /// Create an item with the given type and an empty payload.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            max_stack: DEFAULT_MAX_STACK,
            metadata: BTreeMap::new(),
            kind: ItemKind::blank(item_type),
        }
    }

    /// Create a resource item.
    #[must_use]
    pub fn resource(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self::new(id, name, ItemType::Resource)
    }

    /// Create an equipment item.
    #[must_use]
    pub fn equipment(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        slot: EquipSlot,
        base_stat: f32,
    ) -> Self {
        let mut item = Self::new(id, name, ItemType::Equipment);
        item.kind = ItemKind::Equipment {
            equip_slot: Some(slot),
            base_stat: Some(base_stat),
            is_unbreakable: false,
            required_level_to_craft: 0,
            exp_after_craft: 0,
        };
        item
    }

    /// Create a consumable item.
    #[must_use]
    pub fn consumable(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        effect: EffectType,
        amount: f32,
        duration: f32,
    ) -> Self {
        let mut item = Self::new(id, name, ItemType::Consumable);
        item.kind = ItemKind::Consumable {
            effect_type: Some(effect),
            effect_amount: Some(amount),
            effect_duration: Some(duration),
        };
        item
    }

    /// Create a placeable item.
    #[must_use]
    pub fn placeable(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        behavior: PlaceableBehavior,
    ) -> Self {
        let mut item = Self::new(id, name, ItemType::Placeable);
        item.kind = ItemKind::Placeable {
            behavior_type: Some(behavior),
        };
        item
    }

    /// Set description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set crafting level and XP reward. Has no effect on non-equipment.
    #[must_use]
    pub fn with_crafting_xp(mut self, required_level: u32, exp: u32) -> Self {
        if let ItemKind::Equipment {
            required_level_to_craft,
            exp_after_craft,
            ..
        } = &mut self.kind
        {
            *required_level_to_craft = required_level;
            *exp_after_craft = exp;
        }
        self
    }

    /// Get the item type.
    #[must_use]
    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    /// Change type, discarding the previous type's fields.
    pub fn set_type(&mut self, item_type: ItemType) {
        if self.item_type() != item_type {
            self.kind = ItemKind::blank(item_type);
        }
    }

    /// Placeable behavior, if this is a placeable with one set.
    #[must_use]
    pub fn placeable_behavior(&self) -> Option<PlaceableBehavior> {
        match self.kind {
            ItemKind::Placeable { behavior_type } => behavior_type,
            _ => None,
        }
    }

    /// True if this item can back a workstation.
    #[must_use]
    pub fn is_workstation_placeable(&self) -> bool {
        self.placeable_behavior() == Some(PlaceableBehavior::Workstation)
    }

    /// Crafting level and XP reward, for equipment only.
    #[must_use]
    pub fn crafting_xp(&self) -> Option<(u32, u32)> {
        match self.kind {
            ItemKind::Equipment {
                required_level_to_craft,
                exp_after_craft,
                ..
            } => Some((required_level_to_craft, exp_after_craft)),
            _ => None,
        }
    }

    /// Name for display, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}
