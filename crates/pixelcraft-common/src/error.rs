//! Error types for the PixelCraft catalog engine.
//!
//! Validation findings are not errors in this sense: they are collected into a
//! report. The types here cover contract failures of catalog mutations,
//! rejected configuration and degenerate drop tables.

use thiserror::Error;

use crate::ids::EntityKind;

/// Top-level error type for catalog operations.
#[derive(Debug, Error)]
pub enum PixelcraftError {
    /// Catalog mutation errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Drop table resolution errors
    #[error("Drop error: {0}")]
    Drop(#[from] DropError),
}

/// Errors raised by catalog mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Index does not point at an existing entity
    #[error("No {kind} at index {index} (collection has {len})")]
    IndexOutOfBounds {
        /// Collection that was addressed
        kind: EntityKind,
        /// Requested index
        index: usize,
        /// Current collection length
        len: usize,
    },

    /// Entity id is already taken
    #[error("Duplicate {kind} id \"{id}\"")]
    DuplicateId {
        /// Collection that was addressed
        kind: EntityKind,
        /// Conflicting id
        id: String,
    },

    /// Entity id is empty
    #[error("Cannot insert {kind} with an empty id")]
    EmptyId {
        /// Collection that was addressed
        kind: EntityKind,
    },
}

/// Errors raised while building or parsing configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Multiplier is negative, NaN or infinite
    #[error("Invalid {name}: {value} (must be a finite number >= 0)")]
    InvalidMultiplier {
        /// Multiplier field name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Both multipliers are zero, every level costs nothing
    #[error("Progression curve is flat: quadratic and linear multipliers are both zero")]
    FlatCurve,

    /// Level 1 rounds to zero XP, so the first levels would cost nothing
    #[error("Level 1 requires 0 XP (quadratic {quadratic} + linear {linear} rounds to 0)")]
    ZeroFirstLevel {
        /// Quadratic multiplier
        quadratic: f64,
        /// Linear multiplier
        linear: f64,
    },

    /// Max level must be at least 1
    #[error("Max level must be at least 1")]
    ZeroMaxLevel,

    /// Max level exceeds the supported cap
    #[error("Max level {max_level} exceeds the supported cap of {cap}")]
    MaxLevelTooHigh {
        /// Requested max level
        max_level: u32,
        /// Highest supported max level
        cap: u32,
    },

    /// Balance threshold is negative, NaN or infinite
    #[error("Invalid balance threshold {name}: {value}")]
    InvalidThreshold {
        /// Threshold field name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Config text could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}

/// Errors raised by drop table resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DropError {
    /// Table is empty or every weight is zero
    #[error("Drop table has no probability distribution ({entries} entries, total weight 0)")]
    NoDistribution {
        /// Number of entries in the table
        entries: usize,
    },
}

/// Result type alias for catalog operations.
pub type PixelcraftResult<T> = Result<T, PixelcraftError>;

/// Result type alias for catalog mutations.
pub type CatalogResult<T> = Result<T, CatalogError>;
