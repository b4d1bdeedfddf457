use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Queue scans and the one-active-task-per-bed check
        manager
            .create_index(
                Index::create()
                    .name("idx_testbed_tasks_testbed_status")
                    .table(TestbedTasks::Table)
                    .col(TestbedTasks::TestbedId)
                    .col(TestbedTasks::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_testbed_tasks_service_request")
                    .table(TestbedTasks::Table)
                    .col(TestbedTasks::ServiceRequestId)
                    .to_owned(),
            )
            .await?;

        // Job-card prefix lookups for the daily sequence
        manager
            .create_index(
                Index::create()
                    .name("idx_service_requests_job_card_number")
                    .table(ServiceRequests::Table)
                    .col(ServiceRequests::JobCardNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_status_history_service_request")
                    .table(StatusHistory::Table)
                    .col(StatusHistory::ServiceRequestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_logs_entity")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::EntityType)
                    .col(ActivityLogs::EntityId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_testbed_task_transfers_task")
                    .table(TestbedTaskTransfers::Table)
                    .col(TestbedTaskTransfers::TaskId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_testbed_task_transfers_task").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_activity_logs_entity").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_status_history_service_request")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_service_requests_job_card_number")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_testbed_tasks_service_request")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_testbed_tasks_testbed_status")
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum TestbedTasks {
    Table,
    TestbedId,
    Status,
    ServiceRequestId,
}

#[derive(DeriveIden)]
enum ServiceRequests {
    Table,
    JobCardNumber,
}

#[derive(DeriveIden)]
enum StatusHistory {
    Table,
    ServiceRequestId,
}

#[derive(DeriveIden)]
enum ActivityLogs {
    Table,
    EntityType,
    EntityId,
}

#[derive(DeriveIden)]
enum TestbedTaskTransfers {
    Table,
    TaskId,
}
