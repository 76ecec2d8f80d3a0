//! Operators and services share one lifecycle: create, read, full replace,
//! delete. [`NamedRecordService`] implements it once for both.

use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::{operator, service};

use crate::domain::NamedInput;
use crate::errors::ServiceError;
use crate::ids::parse_id;
use crate::repository::{NamedRecord, NamedRepository};

pub struct NamedRecordService<M: NamedRecord> {
    repo: Arc<dyn NamedRepository<M>>,
}

pub type OperatorService = NamedRecordService<operator::Model>;
pub type ServiceCatalog = NamedRecordService<service::Model>;

impl<M: NamedRecord> Clone for NamedRecordService<M> {
    fn clone(&self) -> Self {
        Self { repo: self.repo.clone() }
    }
}

impl<M: NamedRecord> NamedRecordService<M> {
    pub fn new(repo: Arc<dyn NamedRepository<M>>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, input), fields(kind = %M::KIND, name = %input.name))]
    pub async fn create(&self, input: NamedInput) -> Result<M, ServiceError> {
        let created = self.repo.create(&input.name, input.logo_base64).await?;
        info!(id = %created.id(), "record_created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<M>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, raw_id: &str) -> Result<M, ServiceError> {
        let id = parse_id(M::KIND, raw_id)?;
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found(M::KIND))
    }

    #[instrument(skip(self, input), fields(kind = %M::KIND))]
    pub async fn update(&self, raw_id: &str, input: NamedInput) -> Result<M, ServiceError> {
        let id = parse_id(M::KIND, raw_id)?;
        let updated = self
            .repo
            .update(id, &input.name, input.logo_base64)
            .await?
            .ok_or_else(|| ServiceError::not_found(M::KIND))?;
        info!(%id, "record_updated");
        Ok(updated)
    }

    /// Removes only the record itself; phones or usages pointing at it stay.
    #[instrument(skip(self), fields(kind = %M::KIND))]
    pub async fn delete(&self, raw_id: &str) -> Result<Uuid, ServiceError> {
        let id = parse_id(M::KIND, raw_id)?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(M::KIND));
        }
        info!(%id, "record_deleted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repositories;

    fn input(name: &str) -> NamedInput {
        NamedInput { name: name.into(), logo_base64: None }
    }

    #[tokio::test]
    async fn operator_lifecycle() -> Result<(), anyhow::Error> {
        let svc = OperatorService::new(Repositories::in_memory().operators);
        let op = svc.create(NamedInput { name: "MTS".into(), logo_base64: Some("aWNvbg==".into()) }).await?;
        assert_eq!(svc.get(&op.id.to_string()).await?.name, "MTS");

        let upd = svc.update(&op.id.to_string(), input("MTS Russia")).await?;
        assert_eq!(upd.name, "MTS Russia");
        assert_eq!(upd.logo_base64, None);

        assert_eq!(svc.list().await?.len(), 1);
        assert_eq!(svc.delete(&op.id.to_string()).await?, op.id);
        assert!(matches!(svc.get(&op.id.to_string()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(&op.id.to_string()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn bad_ids_and_blank_names_are_rejected() -> Result<(), anyhow::Error> {
        let svc = ServiceCatalog::new(Repositories::in_memory().services);
        assert!(matches!(svc.get("invalid-id").await, Err(ServiceError::InvalidIdentifier(_))));
        assert!(matches!(svc.update("nope", input("x")).await, Err(ServiceError::InvalidIdentifier(_))));
        assert!(matches!(svc.create(input("   ")).await, Err(ServiceError::Validation(_))));

        let missing = Uuid::new_v4().to_string();
        match svc.update(&missing, input("Telegram")).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "Service not found"),
            other => panic!("unexpected {other:?}"),
        }
        Ok(())
    }
}
