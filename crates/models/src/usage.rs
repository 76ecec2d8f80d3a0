use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, phone, service};

/// One phone registered with one service. Never updated, only created or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usage")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub phone_id: Uuid,
    pub service_id: Uuid,
    pub used_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Phone, Service }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Phone => Entity::belongs_to(phone::Entity)
                .from(Column::PhoneId)
                .to(phone::Column::Id)
                .into(),
            Relation::Service => Entity::belongs_to(service::Entity)
                .from(Column::ServiceId)
                .to(service::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(phone_id: Uuid, service_id: Uuid) -> Self {
        Self { id: Uuid::new_v4(), phone_id, service_id, used_at: Utc::now().into() }
    }
}

pub async fn create(db: &DatabaseConnection, phone_id: Uuid, service_id: Uuid) -> Result<Model, ModelError> {
    let m = Model::new(phone_id, service_id);
    let am = ActiveModel {
        id: Set(m.id),
        phone_id: Set(m.phone_id),
        service_id: Set(m.service_id),
        used_at: Set(m.used_at),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}
