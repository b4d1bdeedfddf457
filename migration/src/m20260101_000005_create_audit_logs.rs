use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create status_history table (append-only workflow trail)
        manager
            .create_table(
                Table::create()
                    .table(StatusHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StatusHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StatusHistory::ServiceRequestId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StatusHistory::Status).string().not_null())
                    .col(ColumnDef::new(StatusHistory::Notes).string())
                    .col(ColumnDef::new(StatusHistory::ChangedBy).string())
                    .col(
                        ColumnDef::new(StatusHistory::ChangedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_status_history_service_request")
                            .from(StatusHistory::Table, StatusHistory::ServiceRequestId)
                            .to(ServiceRequests::Table, ServiceRequests::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create activity_logs table (append-only field-level trail)
        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLogs::EntityType).string().not_null())
                    .col(ColumnDef::new(ActivityLogs::EntityId).integer().not_null())
                    .col(ColumnDef::new(ActivityLogs::Action).string().not_null())
                    .col(ColumnDef::new(ActivityLogs::FieldName).string())
                    .col(ColumnDef::new(ActivityLogs::OldValue).string())
                    .col(ColumnDef::new(ActivityLogs::NewValue).string())
                    .col(ColumnDef::new(ActivityLogs::Reason).string())
                    .col(ColumnDef::new(ActivityLogs::PerformedBy).string())
                    .col(
                        ColumnDef::new(ActivityLogs::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActivityLogs::Metadata).string())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StatusHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StatusHistory {
    Table,
    Id,
    ServiceRequestId,
    Status,
    Notes,
    ChangedBy,
    ChangedAt,
}

#[derive(DeriveIden)]
enum ActivityLogs {
    Table,
    Id,
    EntityType,
    EntityId,
    Action,
    FieldName,
    OldValue,
    NewValue,
    Reason,
    PerformedBy,
    Timestamp,
    Metadata,
}

#[derive(DeriveIden)]
enum ServiceRequests {
    Table,
    Id,
}
