use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Phone: canonical number is unique
        manager
            .create_index(
                Index::create()
                    .name("uniq_phone_number")
                    .table(Phone::Table)
                    .col(Phone::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Phone: index on operator_id
        manager
            .create_index(
                Index::create()
                    .name("idx_phone_operator")
                    .table(Phone::Table)
                    .col(Phone::OperatorId)
                    .to_owned(),
            )
            .await?;

        // Usage: composite unique (phone_id, service_id)
        manager
            .create_index(
                Index::create()
                    .name("uniq_usage_phone_service")
                    .table(Usage::Table)
                    .col(Usage::PhoneId)
                    .col(Usage::ServiceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Service: name lookups from search
        manager
            .create_index(
                Index::create()
                    .name("idx_service_name")
                    .table(Service::Table)
                    .col(Service::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_service_name").table(Service::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("uniq_usage_phone_service").table(Usage::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_phone_operator").table(Phone::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("uniq_phone_number").table(Phone::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Phone { Table, Number, OperatorId }

#[derive(DeriveIden)]
enum Usage { Table, PhoneId, ServiceId }

#[derive(DeriveIden)]
enum Service { Table, Name }
