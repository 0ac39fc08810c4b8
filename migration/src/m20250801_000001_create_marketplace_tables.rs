use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum FoodyRestaurants {
    Table,
    Id,
    Title,
    Phone,
    Address,
    Lat,
    Lng,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FoodyApiKeys {
    Table,
    RestaurantId,
    ApiKey,
}

#[derive(DeriveIden)]
enum FoodyOffers {
    Table,
    Id,
    RestaurantId,
    Title,
    Description,
    PriceCents,
    OriginalPriceCents,
    QtyTotal,
    QtyLeft,
    ExpiresAt,
    ArchivedAt,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FoodyRestaurants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FoodyRestaurants::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FoodyRestaurants::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FoodyRestaurants::Phone).string_len(50).null())
                    .col(
                        ColumnDef::new(FoodyRestaurants::Address)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(FoodyRestaurants::Lat).string_len(64).null())
                    .col(ColumnDef::new(FoodyRestaurants::Lng).string_len(64).null())
                    .col(
                        ColumnDef::new(FoodyRestaurants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FoodyApiKeys::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FoodyApiKeys::RestaurantId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FoodyApiKeys::ApiKey)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_foody_api_keys_restaurant")
                            .from(FoodyApiKeys::Table, FoodyApiKeys::RestaurantId)
                            .to(FoodyRestaurants::Table, FoodyRestaurants::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FoodyOffers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FoodyOffers::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FoodyOffers::RestaurantId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FoodyOffers::Title).string_len(200).not_null())
                    .col(ColumnDef::new(FoodyOffers::Description).text().null())
                    .col(
                        ColumnDef::new(FoodyOffers::PriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FoodyOffers::OriginalPriceCents)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FoodyOffers::QtyTotal)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(FoodyOffers::QtyLeft)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(FoodyOffers::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FoodyOffers::ArchivedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FoodyOffers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_foody_offers_restaurant")
                            .from(FoodyOffers::Table, FoodyOffers::RestaurantId)
                            .to(FoodyRestaurants::Table, FoodyRestaurants::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_foody_offers_restaurant_id")
                    .table(FoodyOffers::Table)
                    .col(FoodyOffers::RestaurantId)
                    .to_owned(),
            )
            .await?;
        // covers the public feed scan: archived IS NULL AND expires_at > now
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_foody_offers_archived_expires")
                    .table(FoodyOffers::Table)
                    .col(FoodyOffers::ArchivedAt)
                    .col(FoodyOffers::ExpiresAt)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FoodyOffers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FoodyApiKeys::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FoodyRestaurants::Table).to_owned())
            .await?;
        Ok(())
    }
}
