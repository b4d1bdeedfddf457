use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestBeds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestBeds::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TestBeds::Name).string().not_null())
                    .col(ColumnDef::new(TestBeds::Description).string())
                    .col(ColumnDef::new(TestBeds::Location).string())
                    .col(
                        ColumnDef::new(TestBeds::Status)
                            .string()
                            .not_null()
                            .default("available"),
                    )
                    .col(
                        ColumnDef::new(TestBeds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestBeds::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TestBeds {
    Table,
    Id,
    Name,
    Description,
    Location,
    Status,
    CreatedAt,
}
