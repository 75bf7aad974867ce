//! API handlers

pub mod attribute;
pub mod category;
pub mod listing;
pub mod seller;
pub mod wishlist;
