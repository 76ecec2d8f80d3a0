//! Create `operator` table.
//!
//! Telecom providers; phones point at them through `phone.operator_id`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Operator::Table)
                    .if_not_exists()
                    .col(uuid(Operator::Id).primary_key())
                    .col(string_len(Operator::Name, 256).not_null())
                    .col(text_null(Operator::LogoBase64))
                    .col(timestamp_with_time_zone(Operator::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Operator::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Operator { Table, Id, Name, LogoBase64, CreatedAt }
