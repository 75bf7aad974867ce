//! Brocante Attribute - the dynamic per-category attribute system
//!
//! Categories carry admin-configured attribute definitions (typed custom
//! fields); listings carry at most one value per definition. This crate is
//! the single authority for typing those values:
//! - [`model`]: value types, the `TypedValue` tagged union, definition views
//! - [`validate`]: type-directed validation of raw submissions
//! - [`format`]: display rendering of stored values (never fails)
//! - [`service`]: definition and value stores on top of SeaORM

pub mod format;
pub mod model;
pub mod service;
pub mod validate;

pub use model::{DateGranularity, TypedValue, ValidationError, ValueType};
pub use validate::validate;
