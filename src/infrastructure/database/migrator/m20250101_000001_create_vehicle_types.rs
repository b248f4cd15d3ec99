//! Create vehicle_types table

use sea_orm_migration::prelude::*;

use crate::infrastructure::database::seed::VEHICLE_TYPES;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VehicleTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehicleTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VehicleTypes::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(VehicleTypes::DisplayName).string().not_null())
                    .col(ColumnDef::new(VehicleTypes::Icon).string_len(50))
                    .col(
                        ColumnDef::new(VehicleTypes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(VehicleTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert();
        insert.into_table(VehicleTypes::Table).columns([
            VehicleTypes::Name,
            VehicleTypes::DisplayName,
            VehicleTypes::Icon,
            VehicleTypes::IsActive,
            VehicleTypes::CreatedAt,
        ]);
        for (name, display_name, icon) in VEHICLE_TYPES {
            insert.values_panic([
                (*name).into(),
                (*display_name).into(),
                (*icon).into(),
                true.into(),
                chrono::Utc::now().to_rfc3339().into(),
            ]);
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehicleTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum VehicleTypes {
    Table,
    Id,
    Name,
    DisplayName,
    Icon,
    IsActive,
    CreatedAt,
}
