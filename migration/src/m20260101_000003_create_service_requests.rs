use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create service_requests table (SRF / job cards)
        manager
            .create_table(
                Table::create()
                    .table(ServiceRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::JobCardNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ServiceRequests::CompanyId).integer().not_null())
                    .col(ColumnDef::new(ServiceRequests::ContactPersonId).integer())
                    .col(ColumnDef::new(ServiceRequests::ProductName).string().not_null())
                    .col(ColumnDef::new(ServiceRequests::ProductDescription).string())
                    .col(ColumnDef::new(ServiceRequests::Quantity).integer())
                    .col(ColumnDef::new(ServiceRequests::TestType).string())
                    .col(ColumnDef::new(ServiceRequests::SpecialRequirements).string())
                    .col(
                        ColumnDef::new(ServiceRequests::Status)
                            .string()
                            .not_null()
                            .default("requested"),
                    )
                    .col(ColumnDef::new(ServiceRequests::RequestedDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(ServiceRequests::AgreedDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ServiceRequests::MaterialReceivedDate)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::TestingStartDate)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(ServiceRequests::TestingEndDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(ServiceRequests::CompletionDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(ServiceRequests::AssignedEmployeeId).integer())
                    .col(ColumnDef::new(ServiceRequests::AssignedTestbedId).integer())
                    .col(ColumnDef::new(ServiceRequests::DcNumber).string())
                    .col(
                        ColumnDef::new(ServiceRequests::DcVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ServiceRequests::Notes).string())
                    .col(
                        ColumnDef::new(ServiceRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_requests_company")
                            .from(ServiceRequests::Table, ServiceRequests::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServiceRequests {
    Table,
    Id,
    JobCardNumber,
    CompanyId,
    ContactPersonId,
    ProductName,
    ProductDescription,
    Quantity,
    TestType,
    SpecialRequirements,
    Status,
    RequestedDate,
    AgreedDate,
    MaterialReceivedDate,
    TestingStartDate,
    TestingEndDate,
    CompletionDate,
    AssignedEmployeeId,
    AssignedTestbedId,
    DcNumber,
    DcVerified,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
}
