//! Record store contract consumed by the services.
//!
//! Two backends implement these traits: [`crate::repo::seaorm`] over
//! PostgreSQL and [`crate::repo::file`] over JSON files or plain memory.
//! Substring searches are case-insensitive and capped by `limit`; every list
//! comes back ordered by creation time.

use std::sync::Arc;

use async_trait::async_trait;
use common::phone::PhoneNumber;
use models::{errors::ModelError, operator, phone, service, usage};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::ids::RecordKind;

/// Shape shared by operators and services: a display name plus an optional logo.
pub trait NamedRecord: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: RecordKind;

    fn new_record(name: &str, logo_base64: Option<String>) -> Result<Self, ModelError>;
    fn id(&self) -> Uuid;
    fn name(&self) -> &str;
    fn created_at(&self) -> DateTimeWithTimeZone;
    fn replace_fields(&mut self, name: &str, logo_base64: Option<String>);
}

impl NamedRecord for operator::Model {
    const KIND: RecordKind = RecordKind::Operator;

    fn new_record(name: &str, logo_base64: Option<String>) -> Result<Self, ModelError> { operator::Model::new(name, logo_base64) }
    fn id(&self) -> Uuid { self.id }
    fn name(&self) -> &str { &self.name }
    fn created_at(&self) -> DateTimeWithTimeZone { self.created_at }
    fn replace_fields(&mut self, name: &str, logo_base64: Option<String>) {
        self.name = name.to_string();
        self.logo_base64 = logo_base64;
    }
}

impl NamedRecord for service::Model {
    const KIND: RecordKind = RecordKind::Service;

    fn new_record(name: &str, logo_base64: Option<String>) -> Result<Self, ModelError> { service::Model::new(name, logo_base64) }
    fn id(&self) -> Uuid { self.id }
    fn name(&self) -> &str { &self.name }
    fn created_at(&self) -> DateTimeWithTimeZone { self.created_at }
    fn replace_fields(&mut self, name: &str, logo_base64: Option<String>) {
        self.name = name.to_string();
        self.logo_base64 = logo_base64;
    }
}

#[async_trait]
pub trait NamedRepository<M: NamedRecord>: Send + Sync {
    async fn list(&self) -> Result<Vec<M>, ServiceError>;
    async fn create(&self, name: &str, logo_base64: Option<String>) -> Result<M, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<M>, ServiceError>;
    /// Full replace of the mutable fields; `None` when the id is unknown.
    async fn update(&self, id: Uuid, name: &str, logo_base64: Option<String>) -> Result<Option<M>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn search_name(&self, needle: &str, limit: u64) -> Result<Vec<M>, ServiceError>;
}

#[async_trait]
pub trait PhoneRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<phone::Model>, ServiceError>;
    /// Fails with [`ServiceError::Conflict`] when the number is already stored.
    async fn create(&self, number: &PhoneNumber, operator_id: Uuid) -> Result<phone::Model, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<phone::Model>, ServiceError>;
    async fn update(&self, id: Uuid, number: &PhoneNumber, operator_id: Uuid) -> Result<Option<phone::Model>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn find_by_number(&self, number: &PhoneNumber) -> Result<Option<phone::Model>, ServiceError>;
    async fn search_number(&self, needle: &str, limit: u64) -> Result<Vec<phone::Model>, ServiceError>;
}

#[async_trait]
pub trait UsageRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<usage::Model>, ServiceError>;
    /// Fails with [`ServiceError::Conflict`] when the pair is already recorded.
    async fn create(&self, phone_id: Uuid, service_id: Uuid) -> Result<usage::Model, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<usage::Model>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn find_pair(&self, phone_id: Uuid, service_id: Uuid) -> Result<Option<usage::Model>, ServiceError>;
}

/// One handle per record kind, shared by every service and request.
#[derive(Clone)]
pub struct Repositories {
    pub operators: Arc<dyn NamedRepository<operator::Model>>,
    pub services: Arc<dyn NamedRepository<service::Model>>,
    pub phones: Arc<dyn PhoneRepository>,
    pub usages: Arc<dyn UsageRepository>,
}

pub(crate) const DUPLICATE_NUMBER: &str = "Phone number already exists";
pub(crate) const DUPLICATE_USAGE: &str = "Usage already recorded";

/// Replace the detail of a [`ServiceError::Conflict`] so both backends report duplicates alike.
pub(crate) fn conflict_detail(detail: &'static str) -> impl FnOnce(ServiceError) -> ServiceError {
    move |e| match e {
        ServiceError::Conflict(_) => ServiceError::Conflict(detail.into()),
        other => other,
    }
}

/// Case-insensitive substring test used by the in-process backend.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
