use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create testbed_tasks table
        manager
            .create_table(
                Table::create()
                    .table(TestbedTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestbedTasks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TestbedTasks::ServiceRequestId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TestbedTasks::TestbedId).integer().not_null())
                    .col(ColumnDef::new(TestbedTasks::AssignedEmployeeId).integer())
                    .col(
                        ColumnDef::new(TestbedTasks::Status)
                            .string()
                            .not_null()
                            .default("queued"),
                    )
                    .col(
                        ColumnDef::new(TestbedTasks::Priority)
                            .string()
                            .not_null()
                            .default("normal"),
                    )
                    .col(
                        ColumnDef::new(TestbedTasks::ScheduledStartDate)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(TestbedTasks::ScheduledEndDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(TestbedTasks::ActualStartDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(TestbedTasks::ActualEndDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(TestbedTasks::QueuePosition)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(TestbedTasks::Notes).string())
                    .col(
                        ColumnDef::new(TestbedTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TestbedTasks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_testbed_tasks_service_request")
                            .from(TestbedTasks::Table, TestbedTasks::ServiceRequestId)
                            .to(ServiceRequests::Table, ServiceRequests::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_testbed_tasks_test_bed")
                            .from(TestbedTasks::Table, TestbedTasks::TestbedId)
                            .to(TestBeds::Table, TestBeds::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create testbed_task_transfers table
        manager
            .create_table(
                Table::create()
                    .table(TestbedTaskTransfers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestbedTaskTransfers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TestbedTaskTransfers::TaskId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestbedTaskTransfers::FromTestbedId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestbedTaskTransfers::ToTestbedId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TestbedTaskTransfers::Reason).string().not_null())
                    .col(ColumnDef::new(TestbedTaskTransfers::TransferredBy).string())
                    .col(
                        ColumnDef::new(TestbedTaskTransfers::TransferredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TestbedTaskTransfers::Notes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_testbed_task_transfers_task")
                            .from(TestbedTaskTransfers::Table, TestbedTaskTransfers::TaskId)
                            .to(TestbedTasks::Table, TestbedTasks::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestbedTaskTransfers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TestbedTasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TestbedTasks {
    Table,
    Id,
    ServiceRequestId,
    TestbedId,
    AssignedEmployeeId,
    Status,
    Priority,
    ScheduledStartDate,
    ScheduledEndDate,
    ActualStartDate,
    ActualEndDate,
    QueuePosition,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TestbedTaskTransfers {
    Table,
    Id,
    TaskId,
    FromTestbedId,
    ToTestbedId,
    Reason,
    TransferredBy,
    TransferredAt,
    Notes,
}

#[derive(DeriveIden)]
enum ServiceRequests {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum TestBeds {
    Table,
    Id,
}
