//! Domain models for the attribute system

pub mod definition;
pub mod value;

pub use definition::{DefinitionSpec, DefinitionView, StoredValueView, UpsertOutcome};
pub use value::{DateGranularity, TypedValue, ValidationError, ValueType};
