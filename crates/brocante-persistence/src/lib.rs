//! Brocante Persistence - Database entities
//!
//! This crate provides the SeaORM entity definitions for every table in the
//! marketplace schema. Services in `brocante-attribute` and
//! `brocante-catalog` compose queries against these entities.

pub mod entity;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export entity prelude
pub use entity::prelude::*;
