//! Wiring from configuration to ready-to-use services.

use anyhow::Context;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use tracing::info;

use crate::named_service::{OperatorService, ServiceCatalog};
use crate::phone_service::PhoneService;
use crate::repository::Repositories;
use crate::search_service::SearchService;
use crate::usage_service::UsageService;

/// Open the configured backend. Postgres is migrated up before use; the file
/// backend creates its data directory when missing.
pub async fn open_repositories(cfg: &AppConfig) -> anyhow::Result<Repositories> {
    match cfg.backend() {
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await.context("connect database")?;
            models::db::test_connection(&db).await.context("database ping")?;
            migration::Migrator::up(&db, None).await.context("run migrations")?;
            info!("storage backend: postgres");
            Ok(Repositories::seaorm(db))
        }
        StorageBackend::File => {
            common::env::ensure_data_dir(&cfg.storage.data_dir).await?;
            let repos = Repositories::file(&cfg.storage.data_dir).await?;
            info!(data_dir = %cfg.storage.data_dir, "storage backend: file");
            Ok(repos)
        }
    }
}

/// Every business service over one set of repositories.
#[derive(Clone)]
pub struct AppServices {
    pub operators: OperatorService,
    pub services: ServiceCatalog,
    pub phones: PhoneService,
    pub usages: UsageService,
    pub search: SearchService,
}

impl AppServices {
    pub fn new(repos: Repositories) -> Self {
        Self {
            operators: OperatorService::new(repos.operators.clone()),
            services: ServiceCatalog::new(repos.services.clone()),
            phones: PhoneService::new(repos.phones.clone(), repos.operators.clone()),
            usages: UsageService::new(repos.usages.clone(), repos.phones.clone(), repos.services.clone()),
            search: SearchService::new(repos.phones, repos.services),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Repositories::in_memory())
    }
}
