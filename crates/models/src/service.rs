//! Apps and platforms a phone number can be registered with.
use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub logo_base64: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Fresh record with a generated id and the current time.
    pub fn new(name: &str, logo_base64: Option<String>) -> Result<Self, ModelError> {
        crate::validate_name(name)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            logo_base64,
            created_at: Utc::now().into(),
        })
    }

    fn into_insert(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            name: Set(self.name),
            logo_base64: Set(self.logo_base64),
            created_at: Set(self.created_at),
        }
    }
}

pub async fn create(db: &DatabaseConnection, name: &str, logo_base64: Option<String>) -> Result<Model, ModelError> {
    let model = Model::new(name, logo_base64)?;
    model.into_insert().insert(db).await.map_err(ModelError::from_db)
}

/// Replace the mutable fields; `None` when the id is unknown.
pub async fn replace(db: &DatabaseConnection, id: Uuid, name: &str, logo_base64: Option<String>) -> Result<Option<Model>, ModelError> {
    crate::validate_name(name)?;
    let Some(found) = Entity::find_by_id(id).one(db).await.map_err(ModelError::from_db)? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.name = Set(name.to_string());
    am.logo_base64 = Set(logo_base64);
    am.update(db).await.map(Some).map_err(ModelError::from_db)
}
