//! # PixelCraft Common
//!
//! Shared types for the PixelCraft catalog engine.
//!
//! This crate provides the foundational types used by every catalog subsystem:
//! - String-backed id newtypes (ItemId, RecipeId, ...)
//! - Entity kinds for report keys and error messages
//! - Error types and result aliases
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;
