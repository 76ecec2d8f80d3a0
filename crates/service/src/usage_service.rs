use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::{service, usage};

use crate::domain::UsageInput;
use crate::errors::ServiceError;
use crate::ids::{parse_id, RecordKind};
use crate::repository::{NamedRepository, PhoneRepository, UsageRepository, DUPLICATE_USAGE};

/// Records which phone registered with which service. Create, read and delete
/// only; there is no update.
#[derive(Clone)]
pub struct UsageService {
    usages: Arc<dyn UsageRepository>,
    phones: Arc<dyn PhoneRepository>,
    services: Arc<dyn NamedRepository<service::Model>>,
}

impl UsageService {
    pub fn new(
        usages: Arc<dyn UsageRepository>,
        phones: Arc<dyn PhoneRepository>,
        services: Arc<dyn NamedRepository<service::Model>>,
    ) -> Self {
        Self { usages, phones, services }
    }

    #[instrument(skip(self, input), fields(phone_id = %input.phone_id, service_id = %input.service_id))]
    pub async fn create(&self, input: UsageInput) -> Result<usage::Model, ServiceError> {
        let phone_id = parse_id(RecordKind::Phone, &input.phone_id)?;
        let service_id = parse_id(RecordKind::Service, &input.service_id)?;

        if self.phones.get(phone_id).await?.is_none() {
            return Err(ServiceError::not_found(RecordKind::Phone));
        }
        if self.services.get(service_id).await?.is_none() {
            return Err(ServiceError::not_found(RecordKind::Service));
        }
        if self.usages.find_pair(phone_id, service_id).await?.is_some() {
            return Err(ServiceError::Conflict(DUPLICATE_USAGE.into()));
        }

        let created = self.usages.create(phone_id, service_id).await?;
        info!(id = %created.id, "usage_recorded");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<usage::Model>, ServiceError> {
        self.usages.list().await
    }

    pub async fn get(&self, raw_id: &str) -> Result<usage::Model, ServiceError> {
        let id = parse_id(RecordKind::Usage, raw_id)?;
        self.usages.get(id).await?.ok_or_else(|| ServiceError::not_found(RecordKind::Usage))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<Uuid, ServiceError> {
        let id = parse_id(RecordKind::Usage, raw_id)?;
        if !self.usages.delete(id).await? {
            return Err(ServiceError::not_found(RecordKind::Usage));
        }
        info!(%id, "usage_deleted");
        Ok(id)
    }
}
