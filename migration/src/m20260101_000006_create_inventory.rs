use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create inventory table
        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inventory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inventory::Name).string().not_null())
                    .col(ColumnDef::new(Inventory::Type).string())
                    .col(ColumnDef::new(Inventory::SerialNumber).string().unique_key())
                    .col(ColumnDef::new(Inventory::Description).string())
                    .col(
                        ColumnDef::new(Inventory::Status)
                            .string()
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(Inventory::CurrentLocation).string())
                    .col(ColumnDef::new(Inventory::AssignedToEmployeeId).integer())
                    .col(ColumnDef::new(Inventory::AssignedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Inventory::AssignedReason).string())
                    .col(
                        ColumnDef::new(Inventory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Inventory::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create inventory_logs table
        manager
            .create_table(
                Table::create()
                    .table(InventoryLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InventoryLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InventoryLogs::InventoryId).integer().not_null())
                    .col(ColumnDef::new(InventoryLogs::Action).string().not_null())
                    .col(ColumnDef::new(InventoryLogs::EmployeeId).integer())
                    .col(ColumnDef::new(InventoryLogs::FromLocation).string())
                    .col(ColumnDef::new(InventoryLogs::ToLocation).string())
                    .col(ColumnDef::new(InventoryLogs::Reason).string())
                    .col(ColumnDef::new(InventoryLogs::PerformedBy).string())
                    .col(
                        ColumnDef::new(InventoryLogs::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InventoryLogs::Notes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_logs_inventory")
                            .from(InventoryLogs::Table, InventoryLogs::InventoryId)
                            .to(Inventory::Table, Inventory::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InventoryLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Inventory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Inventory {
    Table,
    Id,
    Name,
    Type,
    SerialNumber,
    Description,
    Status,
    CurrentLocation,
    AssignedToEmployeeId,
    AssignedDate,
    AssignedReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InventoryLogs {
    Table,
    Id,
    InventoryId,
    Action,
    EmployeeId,
    FromLocation,
    ToLocation,
    Reason,
    PerformedBy,
    Timestamp,
    Notes,
}
