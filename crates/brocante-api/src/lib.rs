//! Brocante API - Wire-level models shared by the HTTP layer and clients

pub mod model;
pub mod validation;

pub use model::{Page, SortOrder};
