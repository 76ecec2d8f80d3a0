//! Create `phone` table.
//!
//! `number` holds the canonical `+7 DDD DDD DD DD` form. `operator_id` has no
//! foreign key; deleting an operator leaves its phones in place.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Phone::Table)
                    .if_not_exists()
                    .col(uuid(Phone::Id).primary_key())
                    .col(string_len(Phone::Number, 16).not_null())
                    .col(uuid(Phone::OperatorId).not_null())
                    .col(timestamp_with_time_zone(Phone::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Phone::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Phone { Table, Id, Number, OperatorId, CreatedAt }
