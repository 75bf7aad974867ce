//! Brocante Catalog - categories, listings, and everything around them
//!
//! This crate owns the read/write services for the marketplace catalog:
//! - [`service::category`]: category and sub-category management
//! - [`service::listing`]: listing CRUD plus the search query builder
//! - [`service::wishlist`]: per-user saved listings
//! - [`service::seller_request`]: the become-a-seller workflow

pub mod model;
pub mod service;

pub use model::{ListingCard, SearchFilter};
