//! ID types for catalog entities.
//!
//! Catalog ids are plain strings chosen by designers. They are compared with
//! exact, case-sensitive equality and never normalized.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the id is empty (i.e. not set).
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Consumes the id, returning the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Unique identifier for an item definition.
    ItemId
);

string_id!(
    /// Unique identifier for a recipe.
    RecipeId
);

string_id!(
    /// Identifier for a workstation upgrade tier.
    UpgradeId
);

string_id!(
    /// Unique identifier for a breakable resource.
    BreakableId
);

/// The five catalog collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Item definitions.
    Item,
    /// Crafting recipes.
    Recipe,
    /// Workstations and their upgrade tiers.
    Workstation,
    /// The no-workstation recipe set.
    Makeshift,
    /// Breakable resources with drop tables.
    Breakable,
}

impl EntityKind {
    /// Get display name for this kind.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Recipe => "recipe",
            Self::Workstation => "workstation",
            Self::Makeshift => "makeshift config",
            Self::Breakable => "breakable resource",
        }
    }

    /// Get all kinds in catalog order.
    #[must_use]
    pub fn all() -> &'static [EntityKind] {
        &[
            Self::Item,
            Self::Recipe,
            Self::Workstation,
            Self::Makeshift,
            Self::Breakable,
        ]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
