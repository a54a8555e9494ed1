//! # hoverscope-core
//!
//! Core types for the hoverscope workspace: the entity records every other
//! crate passes around.
//!
//! This crate provides:
//! - **Categories**: `Category` (instrument, survey, simulation, model, person)
//! - **Profiles**: `ProfileKey`, the display-order profile a category renders with
//! - **Records**: `EntityRecord`, one merged catalog entry
//!
//! The engine crate (`hoverscope`) and the CLI both depend on `hoverscope-core`
//! so that serialized records look the same everywhere.

pub mod entity;

// Re-exports for convenience
pub use entity::{
    is_reserved_field, Category, EntityRecord, ProfileKey, ALIASES_FIELD, DESCRIPTION_FIELD,
    ID_FIELD, NAME_FIELD, ORDER_KEY_FIELD, RESERVED_FIELDS,
};
