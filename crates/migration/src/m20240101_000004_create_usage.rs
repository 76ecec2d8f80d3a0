//! Create `usage` table.
//! Records that a phone registered with a service; references are soft, like `phone.operator_id`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usage::Table)
                    .if_not_exists()
                    .col(uuid(Usage::Id).primary_key())
                    .col(uuid(Usage::PhoneId).not_null())
                    .col(uuid(Usage::ServiceId).not_null())
                    .col(timestamp_with_time_zone(Usage::UsedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Usage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Usage { Table, Id, PhoneId, ServiceId, UsedAt }
