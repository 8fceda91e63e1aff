//! Migration: Create the document and index tables of the record store.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Records::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Records::Collection).string().not_null())
                    .col(ColumnDef::new(Records::Id).string().not_null())
                    .col(ColumnDef::new(Records::Body).text().not_null())
                    .primary_key(
                        Index::create()
                            .col(Records::Collection)
                            .col(Records::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RecordIndexes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RecordIndexes::Collection).string().not_null())
                    .col(ColumnDef::new(RecordIndexes::IndexName).string().not_null())
                    .col(ColumnDef::new(RecordIndexes::RecordId).string().not_null())
                    .col(ColumnDef::new(RecordIndexes::IndexValue).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(RecordIndexes::Collection)
                            .col(RecordIndexes::IndexName)
                            .col(RecordIndexes::RecordId),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups always go collection + index + value
        manager
            .create_index(
                Index::create()
                    .name("idx_record_indexes_lookup")
                    .table(RecordIndexes::Table)
                    .col(RecordIndexes::Collection)
                    .col(RecordIndexes::IndexName)
                    .col(RecordIndexes::IndexValue)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecordIndexes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Records::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Records {
    Table,
    Collection,
    Id,
    Body,
}

#[derive(Iden)]
enum RecordIndexes {
    Table,
    Collection,
    IndexName,
    RecordId,
    IndexValue,
}
