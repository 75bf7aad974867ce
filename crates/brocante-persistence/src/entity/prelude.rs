//! Re-exports of all entities under their table names

pub use super::attribute_definition::Entity as AttributeDefinition;
pub use super::attribute_value::Entity as AttributeValue;
pub use super::category::Entity as Category;
pub use super::listing::Entity as Listing;
pub use super::seller_request::Entity as SellerRequest;
pub use super::sub_category::Entity as SubCategory;
pub use super::user::Entity as User;
pub use super::wishlist_item::Entity as WishlistItem;
