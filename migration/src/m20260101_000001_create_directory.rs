use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create companies table
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::Address).string())
                    .col(ColumnDef::new(Companies::Phone).string())
                    .col(ColumnDef::new(Companies::Email).string())
                    .col(ColumnDef::new(Companies::Remarks).string())
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create contact_persons table
        manager
            .create_table(
                Table::create()
                    .table(ContactPersons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactPersons::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactPersons::CompanyId).integer().not_null())
                    .col(ColumnDef::new(ContactPersons::Name).string().not_null())
                    .col(ColumnDef::new(ContactPersons::Designation).string())
                    .col(ColumnDef::new(ContactPersons::Phone).string())
                    .col(ColumnDef::new(ContactPersons::Email).string().not_null())
                    .col(
                        ColumnDef::new(ContactPersons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_persons_company")
                            .from(ContactPersons::Table, ContactPersons::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Create employees table
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Name).string().not_null())
                    .col(ColumnDef::new(Employees::Designation).string())
                    .col(ColumnDef::new(Employees::Email).string().not_null())
                    .col(ColumnDef::new(Employees::Phone).string())
                    .col(ColumnDef::new(Employees::Department).string())
                    .col(ColumnDef::new(Employees::EmployeeCode).string().unique_key())
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
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
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ContactPersons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    Name,
    Address,
    Phone,
    Email,
    Remarks,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ContactPersons {
    Table,
    Id,
    CompanyId,
    Name,
    Designation,
    Phone,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Name,
    Designation,
    Email,
    Phone,
    Department,
    EmployeeCode,
    CreatedAt,
}
