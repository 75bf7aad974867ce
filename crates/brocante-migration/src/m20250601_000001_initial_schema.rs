use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create category table
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Category::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_uniq(Category::Name))
                    .col(string_null(Category::Icon))
                    .col(date_time(Category::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create sub_category table
        manager
            .create_table(
                Table::create()
                    .table(SubCategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubCategory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(SubCategory::CategoryId))
                    .col(string(SubCategory::Name))
                    .col(date_time(SubCategory::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sub_category-category")
                            .from(SubCategory::Table, SubCategory::CategoryId)
                            .to(Category::Table, Category::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq-sub_category-category-name")
                    .table(SubCategory::Table)
                    .col(SubCategory::CategoryId)
                    .col(SubCategory::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create user table
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_uniq(User::Username))
                    .col(string(User::Password))
                    .col(string_null(User::Email))
                    .col(string(User::Role))
                    .col(boolean(User::Enabled))
                    .col(date_time(User::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create listing table
        manager
            .create_table(
                Table::create()
                    .table(Listing::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Listing::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_uniq(Listing::Reference))
                    .col(big_integer(Listing::UserId))
                    .col(big_integer(Listing::CategoryId))
                    .col(big_integer_null(Listing::SubCategoryId))
                    .col(string(Listing::Title))
                    .col(text(Listing::Description))
                    .col(double(Listing::Price))
                    .col(string(Listing::City))
                    .col(string_null(Listing::Brand))
                    .col(string_null(Listing::Condition))
                    .col(big_integer(Listing::Views).default(0))
                    .col(boolean(Listing::IsActive).default(true))
                    .col(date_time(Listing::PublishedAt))
                    .col(date_time(Listing::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-listing-user")
                            .from(Listing::Table, Listing::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-listing-category")
                            .from(Listing::Table, Listing::CategoryId)
                            .to(Category::Table, Category::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-listing-sub_category")
                            .from(Listing::Table, Listing::SubCategoryId)
                            .to(SubCategory::Table, SubCategory::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-listing-category")
                    .table(Listing::Table)
                    .col(Listing::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-listing-city")
                    .table(Listing::Table)
                    .col(Listing::City)
                    .to_owned(),
            )
            .await?;

        // Create attribute_definition table
        manager
            .create_table(
                Table::create()
                    .table(AttributeDefinition::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttributeDefinition::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(AttributeDefinition::CategoryId))
                    .col(string(AttributeDefinition::Name))
                    .col(string(AttributeDefinition::ValueType))
                    .col(text_null(AttributeDefinition::Options))
                    .col(boolean(AttributeDefinition::Required))
                    .col(integer(AttributeDefinition::SortOrder).default(0))
                    .col(string_null(AttributeDefinition::Placeholder))
                    .col(text_null(AttributeDefinition::Description))
                    .col(boolean(AttributeDefinition::IsActive).default(true))
                    .col(string_null(AttributeDefinition::DateFormat))
                    .col(date_null(AttributeDefinition::MinDate))
                    .col(date_null(AttributeDefinition::MaxDate))
                    .col(date_time(AttributeDefinition::CreatedAt))
                    .col(date_time(AttributeDefinition::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attribute_definition-category")
                            .from(AttributeDefinition::Table, AttributeDefinition::CategoryId)
                            .to(Category::Table, Category::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one definition per (category, name)
        manager
            .create_index(
                Index::create()
                    .name("uniq-attribute_definition-category-name")
                    .table(AttributeDefinition::Table)
                    .col(AttributeDefinition::CategoryId)
                    .col(AttributeDefinition::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create attribute_value table
        manager
            .create_table(
                Table::create()
                    .table(AttributeValue::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttributeValue::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(AttributeValue::ListingId))
                    .col(big_integer(AttributeValue::AttributeId))
                    .col(string(AttributeValue::Kind))
                    .col(string(AttributeValue::Value))
                    .col(date_time(AttributeValue::CreatedAt))
                    .col(date_time(AttributeValue::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attribute_value-listing")
                            .from(AttributeValue::Table, AttributeValue::ListingId)
                            .to(Listing::Table, Listing::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attribute_value-attribute_definition")
                            .from(AttributeValue::Table, AttributeValue::AttributeId)
                            .to(AttributeDefinition::Table, AttributeDefinition::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one value per (listing, attribute)
        manager
            .create_index(
                Index::create()
                    .name("uniq-attribute_value-listing-attribute")
                    .table(AttributeValue::Table)
                    .col(AttributeValue::ListingId)
                    .col(AttributeValue::AttributeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-attribute_value-attribute")
                    .table(AttributeValue::Table)
                    .col(AttributeValue::AttributeId)
                    .to_owned(),
            )
            .await?;

        // Create wishlist_item table
        manager
            .create_table(
                Table::create()
                    .table(WishlistItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WishlistItem::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(WishlistItem::UserId))
                    .col(big_integer(WishlistItem::ListingId))
                    .col(date_time(WishlistItem::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-wishlist_item-user")
                            .from(WishlistItem::Table, WishlistItem::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-wishlist_item-listing")
                            .from(WishlistItem::Table, WishlistItem::ListingId)
                            .to(Listing::Table, Listing::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq-wishlist_item-user-listing")
                    .table(WishlistItem::Table)
                    .col(WishlistItem::UserId)
                    .col(WishlistItem::ListingId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create seller_request table
        manager
            .create_table(
                Table::create()
                    .table(SellerRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SellerRequest::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(SellerRequest::UserId))
                    .col(string(SellerRequest::ShopName))
                    .col(text_null(SellerRequest::Message))
                    .col(string(SellerRequest::Status))
                    .col(date_time(SellerRequest::CreatedAt))
                    .col(date_time_null(SellerRequest::DecidedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-seller_request-user")
                            .from(SellerRequest::Table, SellerRequest::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SellerRequest::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WishlistItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttributeValue::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttributeDefinition::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Listing::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubCategory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Category {
    Table,
    Id,
    Name,
    Icon,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SubCategory {
    Table,
    Id,
    CategoryId,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Username,
    Password,
    Email,
    Role,
    Enabled,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Listing {
    Table,
    Id,
    Reference,
    UserId,
    CategoryId,
    SubCategoryId,
    Title,
    Description,
    Price,
    City,
    Brand,
    Condition,
    Views,
    IsActive,
    PublishedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttributeDefinition {
    Table,
    Id,
    CategoryId,
    Name,
    ValueType,
    Options,
    Required,
    SortOrder,
    Placeholder,
    Description,
    IsActive,
    DateFormat,
    MinDate,
    MaxDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttributeValue {
    Table,
    Id,
    ListingId,
    AttributeId,
    Kind,
    Value,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WishlistItem {
    Table,
    Id,
    UserId,
    ListingId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SellerRequest {
    Table,
    Id,
    UserId,
    ShopName,
    Message,
    Status,
    CreatedAt,
    DecidedAt,
}
