#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use models::db::{connect_with_config, DatabaseConfig, DATABASE_URL};

static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    DatabaseConfig { url: DATABASE_URL.clone(), min_connections: 1, connect_timeout_secs: 5, acquire_timeout_secs: 10, ..DatabaseConfig::default() }
}

/// Migrated Postgres connection, or `None` when `SKIP_DB_TESTS` is set or no
/// database answers.
pub async fn get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    // migrate once per test process with a throwaway connection
    let migrated = *MIGRATED
        .get_or_init(|| async {
            let Ok(db) = connect_with_config(&test_config()).await else { return false };
            migration::Migrator::up(&db, None).await.is_ok()
        })
        .await;
    if !migrated {
        eprintln!("skip: database unavailable");
        return None;
    }
    connect_with_config(&test_config()).await.ok()
}
