//! JSON-file (or purely in-memory) repositories.
//!
//! Each record kind lives in its own [`JsonMapStore`] keyed by id. Uniqueness
//! checks run inside the store's write lock, so concurrent creates of the same
//! phone number or usage pair cannot both succeed.

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use common::phone::PhoneNumber;
use models::{operator, phone, service, usage};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::repository::{
    contains_ci, NamedRecord, NamedRepository, PhoneRepository, Repositories, UsageRepository, DUPLICATE_NUMBER,
    DUPLICATE_USAGE,
};
use crate::storage::json_map_store::JsonMapStore;

impl Repositories {
    /// Repositories persisted as `operators.json`, `services.json`, `phones.json`
    /// and `usage.json` under `data_dir`.
    pub async fn file(data_dir: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let dir = data_dir.as_ref();
        Ok(Self::from_stores(
            JsonMapStore::new(dir.join("operators.json")).await?,
            JsonMapStore::new(dir.join("services.json")).await?,
            JsonMapStore::new(dir.join("phones.json")).await?,
            JsonMapStore::new(dir.join("usage.json")).await?,
        ))
    }

    /// Repositories that keep everything in process memory.
    pub fn in_memory() -> Self {
        Self::from_stores(
            JsonMapStore::in_memory(),
            JsonMapStore::in_memory(),
            JsonMapStore::in_memory(),
            JsonMapStore::in_memory(),
        )
    }

    fn from_stores(
        operators: Arc<JsonMapStore<Uuid, operator::Model>>,
        services: Arc<JsonMapStore<Uuid, service::Model>>,
        phones: Arc<JsonMapStore<Uuid, phone::Model>>,
        usages: Arc<JsonMapStore<Uuid, usage::Model>>,
    ) -> Self {
        Self {
            operators: Arc::new(FileNamedRepository { store: operators }),
            services: Arc::new(FileNamedRepository { store: services }),
            phones: Arc::new(FilePhoneRepository { store: phones }),
            usages: Arc::new(FileUsageRepository { store: usages }),
        }
    }
}

fn cap(limit: u64) -> usize {
    usize::try_from(limit).unwrap_or(usize::MAX)
}

pub struct FileNamedRepository<M> {
    store: Arc<JsonMapStore<Uuid, M>>,
}

fn sort_named<M: NamedRecord>(rows: &mut [M]) {
    rows.sort_by_key(|m| (m.created_at(), m.id()));
}

#[async_trait]
impl<M: NamedRecord> NamedRepository<M> for FileNamedRepository<M> {
    async fn list(&self) -> Result<Vec<M>, ServiceError> {
        let mut rows = self.store.values().await;
        sort_named(&mut rows);
        Ok(rows)
    }

    async fn create(&self, name: &str, logo_base64: Option<String>) -> Result<M, ServiceError> {
        let record = M::new_record(name, logo_base64)?;
        let out = record.clone();
        self.store.update_map(move |m| { m.insert(record.id(), record); Ok(()) }).await?;
        Ok(out)
    }

    async fn get(&self, id: Uuid) -> Result<Option<M>, ServiceError> {
        Ok(self.store.get(&id).await)
    }

    async fn update(&self, id: Uuid, name: &str, logo_base64: Option<String>) -> Result<Option<M>, ServiceError> {
        models::validate_name(name)?;
        self.store
            .update_map(|m| {
                Ok(m.get_mut(&id).map(|rec| {
                    rec.replace_fields(name, logo_base64);
                    rec.clone()
                }))
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.store.remove(&id).await
    }

    async fn search_name(&self, needle: &str, limit: u64) -> Result<Vec<M>, ServiceError> {
        let mut hits = self.store.filter(|m| contains_ci(m.name(), needle)).await;
        sort_named(&mut hits);
        hits.truncate(cap(limit));
        Ok(hits)
    }
}

pub struct FilePhoneRepository {
    store: Arc<JsonMapStore<Uuid, phone::Model>>,
}

fn sort_phones(rows: &mut [phone::Model]) {
    rows.sort_by_key(|p| (p.created_at, p.id));
}

fn duplicate_number() -> ServiceError {
    ServiceError::Conflict(DUPLICATE_NUMBER.into())
}

#[async_trait]
impl PhoneRepository for FilePhoneRepository {
    async fn list(&self) -> Result<Vec<phone::Model>, ServiceError> {
        let mut rows = self.store.values().await;
        sort_phones(&mut rows);
        Ok(rows)
    }

    async fn create(&self, number: &PhoneNumber, operator_id: Uuid) -> Result<phone::Model, ServiceError> {
        let record = phone::Model::new(number, operator_id);
        self.store
            .update_map(move |m| {
                if m.values().any(|p| p.number == record.number) {
                    return Err(duplicate_number());
                }
                m.insert(record.id, record.clone());
                Ok(record)
            })
            .await
    }

    async fn get(&self, id: Uuid) -> Result<Option<phone::Model>, ServiceError> {
        Ok(self.store.get(&id).await)
    }

    async fn update(&self, id: Uuid, number: &PhoneNumber, operator_id: Uuid) -> Result<Option<phone::Model>, ServiceError> {
        self.store
            .update_map(|m| {
                if m.values().any(|p| p.id != id && p.number == number.as_str()) {
                    return Err(duplicate_number());
                }
                Ok(m.get_mut(&id).map(|rec| {
                    rec.number = number.as_str().to_string();
                    rec.operator_id = operator_id;
                    rec.clone()
                }))
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.store.remove(&id).await
    }

    async fn find_by_number(&self, number: &PhoneNumber) -> Result<Option<phone::Model>, ServiceError> {
        Ok(self.store.filter(|p| p.number == number.as_str()).await.into_iter().next())
    }

    async fn search_number(&self, needle: &str, limit: u64) -> Result<Vec<phone::Model>, ServiceError> {
        let mut hits = self.store.filter(|p| contains_ci(&p.number, needle)).await;
        sort_phones(&mut hits);
        hits.truncate(cap(limit));
        Ok(hits)
    }
}

pub struct FileUsageRepository {
    store: Arc<JsonMapStore<Uuid, usage::Model>>,
}

#[async_trait]
impl UsageRepository for FileUsageRepository {
    async fn list(&self) -> Result<Vec<usage::Model>, ServiceError> {
        let mut rows = self.store.values().await;
        rows.sort_by_key(|u| (u.used_at, u.id));
        Ok(rows)
    }

    async fn create(&self, phone_id: Uuid, service_id: Uuid) -> Result<usage::Model, ServiceError> {
        let record = usage::Model::new(phone_id, service_id);
        self.store
            .update_map(move |m| {
                if m.values().any(|u| u.phone_id == phone_id && u.service_id == service_id) {
                    return Err(ServiceError::Conflict(DUPLICATE_USAGE.into()));
                }
                m.insert(record.id, record.clone());
                Ok(record)
            })
            .await
    }

    async fn get(&self, id: Uuid) -> Result<Option<usage::Model>, ServiceError> {
        Ok(self.store.get(&id).await)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.store.remove(&id).await
    }

    async fn find_pair(&self, phone_id: Uuid, service_id: Uuid) -> Result<Option<usage::Model>, ServiceError> {
        Ok(self
            .store
            .filter(|u| u.phone_id == phone_id && u.service_id == service_id)
            .await
            .into_iter()
            .next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::phone::normalize;

    #[tokio::test]
    async fn named_repository_lists_in_creation_order() -> Result<(), anyhow::Error> {
        let repos = Repositories::in_memory();
        for name in ["MTS", "Beeline", "MegaFon", "Tele2"] {
            repos.operators.create(name, None).await?;
        }
        let names: Vec<String> = repos.operators.list().await?.into_iter().map(|o| o.name).collect();
        assert_eq!(names, ["MTS", "Beeline", "MegaFon", "Tele2"]);

        let hits = repos.operators.search_name("mega", 10).await?;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "MegaFon");
        assert_eq!(repos.operators.search_name("e", 2).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn named_repository_update_and_delete() -> Result<(), anyhow::Error> {
        let repos = Repositories::in_memory();
        let s = repos.services.create("VK", Some("bG9nbw==".into())).await?;

        let updated = repos.services.update(s.id, "VKontakte", None).await?.expect("exists");
        assert_eq!(updated.name, "VKontakte");
        assert_eq!(updated.logo_base64, None);
        assert_eq!(updated.created_at, s.created_at);

        assert!(repos.services.update(Uuid::new_v4(), "x", None).await?.is_none());
        assert!(matches!(repos.services.update(s.id, " ", None).await, Err(ServiceError::Validation(_))));

        assert!(repos.services.delete(s.id).await?);
        assert!(repos.services.get(s.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn phone_numbers_are_unique_inside_the_store() -> Result<(), anyhow::Error> {
        let repos = Repositories::in_memory();
        let op = Uuid::new_v4();
        let a = normalize("89651091162")?;
        let b = normalize("9161234567")?;

        let first = repos.phones.create(&a, op).await?;
        assert!(matches!(repos.phones.create(&a, op).await, Err(ServiceError::Conflict(_))));

        let second = repos.phones.create(&b, op).await?;
        // moving the second phone onto the first number is a conflict, keeping its own is not
        assert!(matches!(repos.phones.update(second.id, &a, op).await, Err(ServiceError::Conflict(_))));
        let same = repos.phones.update(second.id, &b, Uuid::new_v4()).await?.expect("exists");
        assert_ne!(same.operator_id, op);

        assert_eq!(repos.phones.find_by_number(&a).await?.map(|p| p.id), Some(first.id));
        assert_eq!(repos.phones.search_number("916", 10).await?.len(), 1);
        assert_eq!(repos.phones.list().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_of_one_number_yield_one_record() -> Result<(), anyhow::Error> {
        let repos = Repositories::in_memory();
        let n = normalize("+7 999 000 00 00")?;
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let phones = repos.phones.clone();
            let n = n.clone();
            tasks.push(tokio::spawn(async move { phones.create(&n, Uuid::new_v4()).await }));
        }
        let mut ok = 0;
        for t in tasks {
            if t.await?.is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(repos.phones.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn usage_pairs_are_unique() -> Result<(), anyhow::Error> {
        let repos = Repositories::in_memory();
        let (p, s) = (Uuid::new_v4(), Uuid::new_v4());
        let u = repos.usages.create(p, s).await?;
        assert!(matches!(repos.usages.create(p, s).await, Err(ServiceError::Conflict(_))));
        repos.usages.create(p, Uuid::new_v4()).await?;
        assert_eq!(repos.usages.find_pair(p, s).await?.map(|x| x.id), Some(u.id));
        assert!(repos.usages.delete(u.id).await?);
        assert!(repos.usages.find_pair(p, s).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn file_backend_survives_reopen() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("upn_repo_{}", Uuid::new_v4()));
        let repos = Repositories::file(&dir).await?;
        let op = repos.operators.create("MTS", None).await?;
        let p = repos.phones.create(&normalize("9651091162")?, op.id).await?;
        drop(repos);

        let reopened = Repositories::file(&dir).await?;
        assert_eq!(reopened.operators.get(op.id).await?.map(|o| o.name), Some("MTS".to_string()));
        assert_eq!(reopened.phones.get(p.id).await?.map(|x| x.number), Some("+7 965 109 11 62".to_string()));
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
