//! Create fare_calculations table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FareCalculations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FareCalculations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FareCalculations::DistanceM)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FareCalculations::VehicleType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FareCalculations::TotalFareCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FareCalculations::Breakdown).text().not_null())
                    .col(
                        ColumnDef::new(FareCalculations::LineItems)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(FareCalculations::ClientId)
                            .string_len(100)
                            .not_null()
                            .default("anonymous"),
                    )
                    .col(ColumnDef::new(FareCalculations::ClientIp).string_len(45))
                    .col(ColumnDef::new(FareCalculations::UserAgent).text())
                    .col(
                        ColumnDef::new(FareCalculations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_fare_calculations_created_at", FareCalculations::CreatedAt),
            ("idx_fare_calculations_client_id", FareCalculations::ClientId),
            ("idx_fare_calculations_vehicle_type", FareCalculations::VehicleType),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(FareCalculations::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FareCalculations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum FareCalculations {
    Table,
    Id,
    DistanceM,
    VehicleType,
    TotalFareCents,
    Breakdown,
    LineItems,
    ClientId,
    ClientIp,
    UserAgent,
    CreatedAt,
}
