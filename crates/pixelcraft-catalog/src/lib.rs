//! # PixelCraft Catalog
//!
//! Integrity checks and balance calculations for a crafting game catalog.
//!
//! This crate provides:
//! - Catalog records (items, recipes, workstations, makeshift config, breakables)
//! - The catalog context with its id index and mutation operations
//! - Structural and referential validation
//! - Weighted drop table resolution
//! - XP progression curve with its inverse and balance analysis
//! - Summary statistics and TOML configuration
//!
//! The crate performs no I/O. Records arrive through serde from whatever
//! loader the host uses.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod balance;
pub mod breakables;
pub mod catalog;
pub mod config;
pub mod drops;
pub mod index;
pub mod items;
pub mod makeshift;
pub mod naming;
pub mod progression;
pub mod recipes;
pub mod stats;
pub mod validation;
pub mod workstations;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::balance::*;
    pub use crate::breakables::*;
    pub use crate::catalog::*;
    pub use crate::config::*;
    pub use crate::drops::*;
    pub use crate::index::*;
    pub use crate::items::*;
    pub use crate::makeshift::*;
    pub use crate::naming::*;
    pub use crate::progression::*;
    pub use crate::recipes::*;
    pub use crate::stats::*;
    pub use crate::validation::*;
    pub use crate::workstations::*;
    pub use pixelcraft_common::prelude::*;
}

pub use prelude::*;
