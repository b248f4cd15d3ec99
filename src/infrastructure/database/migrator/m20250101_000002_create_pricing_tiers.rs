//! Create pricing_tiers table with the default schedule

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_vehicle_types::VehicleTypes;
use crate::infrastructure::database::seed::{DEFAULT_SCHEDULE, VEHICLE_TYPES};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PricingTiers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PricingTiers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::VehicleType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::MinDistanceM)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(PricingTiers::MaxDistanceM).big_integer())
                    .col(
                        ColumnDef::new(PricingTiers::BaseFareCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::PerKmRateCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PricingTiers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pricing_tiers_vehicle_type")
                            .from(PricingTiers::Table, PricingTiers::VehicleType)
                            .to(VehicleTypes::Table, VehicleTypes::Name)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Calculation reads one vehicle's active tiers in order
        manager
            .create_index(
                Index::create()
                    .name("idx_pricing_tiers_vehicle_active_min")
                    .table(PricingTiers::Table)
                    .col(PricingTiers::VehicleType)
                    .col(PricingTiers::IsActive)
                    .col(PricingTiers::MinDistanceM)
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(PricingTiers::Table).columns([
            PricingTiers::VehicleType,
            PricingTiers::MinDistanceM,
            PricingTiers::MaxDistanceM,
            PricingTiers::BaseFareCents,
            PricingTiers::PerKmRateCents,
            PricingTiers::IsActive,
            PricingTiers::CreatedAt,
            PricingTiers::UpdatedAt,
        ]);
        for (vehicle_type, _, _) in VEHICLE_TYPES {
            for tier in DEFAULT_SCHEDULE {
                insert.values_panic([
                    (*vehicle_type).into(),
                    tier.min_distance_m.into(),
                    tier.max_distance_m.into(),
                    tier.base_fare_cents.into(),
                    tier.per_km_rate_cents.into(),
                    true.into(),
                    chrono::Utc::now().to_rfc3339().into(),
                    chrono::Utc::now().to_rfc3339().into(),
                ]);
            }
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PricingTiers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PricingTiers {
    Table,
    Id,
    VehicleType,
    MinDistanceM,
    MaxDistanceM,
    BaseFareCents,
    PerKmRateCents,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
