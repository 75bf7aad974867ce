//! Catalog data models

pub mod category;
pub mod listing;

pub use category::{CategoryView, SubCategoryView};
pub use listing::{ListingCard, ListingForm, SearchFilter};

/// Seller-request workflow states
pub const SELLER_REQUEST_PENDING: &str = "pending";
pub const SELLER_REQUEST_APPROVED: &str = "approved";
pub const SELLER_REQUEST_REJECTED: &str = "rejected";
