use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use common::phone::normalize;
use models::{operator, phone};

use crate::domain::PhoneInput;
use crate::errors::ServiceError;
use crate::ids::{parse_id, RecordKind};
use crate::repository::{NamedRepository, PhoneRepository, DUPLICATE_NUMBER};

/// Phone records. Numbers are normalized before any lookup or write, and the
/// referenced operator must exist at the time of the write.
#[derive(Clone)]
pub struct PhoneService {
    phones: Arc<dyn PhoneRepository>,
    operators: Arc<dyn NamedRepository<operator::Model>>,
}

impl PhoneService {
    pub fn new(phones: Arc<dyn PhoneRepository>, operators: Arc<dyn NamedRepository<operator::Model>>) -> Self {
        Self { phones, operators }
    }

    async fn require_operator(&self, raw: &str) -> Result<Uuid, ServiceError> {
        let id = parse_id(RecordKind::Operator, raw)?;
        if self.operators.get(id).await?.is_none() {
            return Err(ServiceError::not_found(RecordKind::Operator));
        }
        Ok(id)
    }

    #[instrument(skip(self, input), fields(raw = %input.number))]
    pub async fn create(&self, input: PhoneInput) -> Result<phone::Model, ServiceError> {
        let number = normalize(&input.number)?;
        let operator_id = self.require_operator(&input.operator_id).await?;
        if let Some(existing) = self.phones.find_by_number(&number).await? {
            debug!(existing = %existing.id, "duplicate number");
            return Err(ServiceError::Conflict(DUPLICATE_NUMBER.into()));
        }
        let created = self.phones.create(&number, operator_id).await?;
        info!(id = %created.id, number = %created.number, "phone_created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<phone::Model>, ServiceError> {
        self.phones.list().await
    }

    pub async fn get(&self, raw_id: &str) -> Result<phone::Model, ServiceError> {
        let id = parse_id(RecordKind::Phone, raw_id)?;
        self.phones.get(id).await?.ok_or_else(|| ServiceError::not_found(RecordKind::Phone))
    }

    /// Full replace. Keeping the phone's own number is allowed; taking one
    /// that belongs to another phone is a conflict.
    #[instrument(skip(self, input), fields(raw = %input.number))]
    pub async fn update(&self, raw_id: &str, input: PhoneInput) -> Result<phone::Model, ServiceError> {
        let id = parse_id(RecordKind::Phone, raw_id)?;
        let number = normalize(&input.number)?;
        let operator_id = self.require_operator(&input.operator_id).await?;
        if self.phones.get(id).await?.is_none() {
            return Err(ServiceError::not_found(RecordKind::Phone));
        }
        if let Some(holder) = self.phones.find_by_number(&number).await? {
            if holder.id != id {
                return Err(ServiceError::Conflict(DUPLICATE_NUMBER.into()));
            }
        }
        let updated = self
            .phones
            .update(id, &number, operator_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(RecordKind::Phone))?;
        info!(%id, number = %updated.number, "phone_updated");
        Ok(updated)
    }

    /// Usage rows that reference the phone are left in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<Uuid, ServiceError> {
        let id = parse_id(RecordKind::Phone, raw_id)?;
        if !self.phones.delete(id).await? {
            return Err(ServiceError::not_found(RecordKind::Phone));
        }
        info!(%id, "phone_deleted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repositories;

    async fn setup() -> Result<(PhoneService, Uuid), anyhow::Error> {
        let repos = Repositories::in_memory();
        let op = repos.operators.create("MTS", None).await?;
        Ok((PhoneService::new(repos.phones, repos.operators), op.id))
    }

    fn input(number: &str, op: Uuid) -> PhoneInput {
        PhoneInput { number: number.into(), operator_id: op.to_string() }
    }

    #[tokio::test]
    async fn stores_canonical_number_and_rejects_equivalent_duplicate() -> Result<(), anyhow::Error> {
        let (svc, op) = setup().await?;
        let p = svc.create(input("89651091162", op)).await?;
        assert_eq!(p.number, "+7 965 109 11 62");
        assert_eq!(p.operator_id, op);

        match svc.create(input("+79651091162", op)).await {
            Err(ServiceError::Conflict(msg)) => assert_eq!(msg, "Phone number already exists"),
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(svc.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn create_checks_run_in_order() -> Result<(), anyhow::Error> {
        let (svc, op) = setup().await?;
        // invalid number wins over a bad operator id
        assert!(matches!(svc.create(PhoneInput { number: "123".into(), operator_id: "x".into() }).await, Err(ServiceError::InvalidPhone(_))));
        assert!(matches!(
            svc.create(PhoneInput { number: "9651091162".into(), operator_id: "x".into() }).await,
            Err(ServiceError::InvalidIdentifier(_))
        ));
        match svc.create(input("9651091162", Uuid::new_v4())).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "Operator not found"),
            other => panic!("expected not found, got {other:?}"),
        }
        svc.create(input("9651091162", op)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_allows_own_number_and_rejects_foreign_one() -> Result<(), anyhow::Error> {
        let (svc, op) = setup().await?;
        let a = svc.create(input("9651091162", op)).await?;
        let b = svc.create(input("9161234567", op)).await?;

        let same = svc.update(&b.id.to_string(), input("8 (916) 123-45-67", op)).await?;
        assert_eq!(same.number, "+7 916 123 45 67");
        assert_eq!(same.created_at, b.created_at);

        assert!(matches!(svc.update(&b.id.to_string(), input("+79651091162", op)).await, Err(ServiceError::Conflict(_))));
        assert!(matches!(svc.update(&Uuid::new_v4().to_string(), input("9000000000", op)).await, Err(ServiceError::NotFound(_))));

        let moved = svc.update(&a.id.to_string(), input("9000000000", op)).await?;
        assert_eq!(moved.number, "+7 900 000 00 00");
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> Result<(), anyhow::Error> {
        let (svc, op) = setup().await?;
        let p = svc.create(input("9651091162", op)).await?;
        svc.delete(&p.id.to_string()).await?;
        match svc.get(&p.id.to_string()).await {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "Phone not found"),
            other => panic!("expected not found, got {other:?}"),
        }
        assert!(matches!(svc.delete("invalid-id").await, Err(ServiceError::InvalidIdentifier(_))));
        Ok(())
    }
}
