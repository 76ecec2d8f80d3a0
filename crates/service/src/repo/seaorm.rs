use async_trait::async_trait;
use common::phone::PhoneNumber;
use models::{operator, phone, service, usage};
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::repository::{
    conflict_detail, NamedRepository, PhoneRepository, Repositories, UsageRepository, DUPLICATE_NUMBER, DUPLICATE_USAGE,
};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::from(models::errors::ModelError::from_db(e))
}

/// Lowercased `%needle%` with LIKE metacharacters escaped, compared against `LOWER(col)`.
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn like_pattern(needle: &str) -> LikeExpr {
    LikeExpr::new(contains_pattern(needle)).escape('\\')
}

impl Repositories {
    /// All four repositories over one connection pool.
    pub fn seaorm(db: DatabaseConnection) -> Self {
        use std::sync::Arc;
        Self {
            operators: Arc::new(SeaOrmOperatorRepository { db: db.clone() }),
            services: Arc::new(SeaOrmServiceRepository { db: db.clone() }),
            phones: Arc::new(SeaOrmPhoneRepository { db: db.clone() }),
            usages: Arc::new(SeaOrmUsageRepository { db }),
        }
    }
}

pub struct SeaOrmOperatorRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl NamedRepository<operator::Model> for SeaOrmOperatorRepository {
    async fn list(&self) -> Result<Vec<operator::Model>, ServiceError> {
        operator::Entity::find()
            .order_by_asc(operator::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn create(&self, name: &str, logo_base64: Option<String>) -> Result<operator::Model, ServiceError> {
        Ok(operator::create(&self.db, name, logo_base64).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<operator::Model>, ServiceError> {
        operator::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn update(&self, id: Uuid, name: &str, logo_base64: Option<String>) -> Result<Option<operator::Model>, ServiceError> {
        Ok(operator::replace(&self.db, id, name, logo_base64).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = operator::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn search_name(&self, needle: &str, limit: u64) -> Result<Vec<operator::Model>, ServiceError> {
        operator::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(operator::Column::Name))).like(like_pattern(needle)))
            .order_by_asc(operator::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

pub struct SeaOrmServiceRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl NamedRepository<service::Model> for SeaOrmServiceRepository {
    async fn list(&self) -> Result<Vec<service::Model>, ServiceError> {
        service::Entity::find()
            .order_by_asc(service::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn create(&self, name: &str, logo_base64: Option<String>) -> Result<service::Model, ServiceError> {
        Ok(service::create(&self.db, name, logo_base64).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<service::Model>, ServiceError> {
        service::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn update(&self, id: Uuid, name: &str, logo_base64: Option<String>) -> Result<Option<service::Model>, ServiceError> {
        Ok(service::replace(&self.db, id, name, logo_base64).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = service::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn search_name(&self, needle: &str, limit: u64) -> Result<Vec<service::Model>, ServiceError> {
        service::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(service::Column::Name))).like(like_pattern(needle)))
            .order_by_asc(service::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

pub struct SeaOrmPhoneRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl PhoneRepository for SeaOrmPhoneRepository {
    async fn list(&self) -> Result<Vec<phone::Model>, ServiceError> {
        phone::Entity::find()
            .order_by_asc(phone::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn create(&self, number: &PhoneNumber, operator_id: Uuid) -> Result<phone::Model, ServiceError> {
        // uniq_phone_number turns a lost race into ModelError::Duplicate -> Conflict
        phone::create(&self.db, number, operator_id)
            .await
            .map_err(|e| conflict_detail(DUPLICATE_NUMBER)(e.into()))
    }

    async fn get(&self, id: Uuid) -> Result<Option<phone::Model>, ServiceError> {
        phone::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn update(&self, id: Uuid, number: &PhoneNumber, operator_id: Uuid) -> Result<Option<phone::Model>, ServiceError> {
        phone::replace(&self.db, id, number, operator_id)
            .await
            .map_err(|e| conflict_detail(DUPLICATE_NUMBER)(e.into()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = phone::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn find_by_number(&self, number: &PhoneNumber) -> Result<Option<phone::Model>, ServiceError> {
        phone::Entity::find()
            .filter(phone::Column::Number.eq(number.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    async fn search_number(&self, needle: &str, limit: u64) -> Result<Vec<phone::Model>, ServiceError> {
        phone::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(phone::Column::Number))).like(like_pattern(needle)))
            .order_by_asc(phone::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

pub struct SeaOrmUsageRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl UsageRepository for SeaOrmUsageRepository {
    async fn list(&self) -> Result<Vec<usage::Model>, ServiceError> {
        usage::Entity::find()
            .order_by_asc(usage::Column::UsedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn create(&self, phone_id: Uuid, service_id: Uuid) -> Result<usage::Model, ServiceError> {
        usage::create(&self.db, phone_id, service_id)
            .await
            .map_err(|e| conflict_detail(DUPLICATE_USAGE)(e.into()))
    }

    async fn get(&self, id: Uuid) -> Result<Option<usage::Model>, ServiceError> {
        usage::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = usage::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn find_pair(&self, phone_id: Uuid, service_id: Uuid) -> Result<Option<usage::Model>, ServiceError> {
        usage::Entity::find()
            .filter(usage::Column::PhoneId.eq(phone_id))
            .filter(usage::Column::ServiceId.eq(service_id))
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}
