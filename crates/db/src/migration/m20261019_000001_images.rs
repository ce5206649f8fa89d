//! Images migration.
//!
//! Creates the images metadata table. Built with the schema builder rather
//! than raw SQL so the same migration runs on Postgres and SQLite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Images::ImageId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Images::Title).text().not_null())
                    .col(ColumnDef::new(Images::Description).text().not_null())
                    .col(ColumnDef::new(Images::StorageUrl).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Images::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Images {
    Table,
    ImageId,
    Title,
    Description,
    StorageUrl,
}
