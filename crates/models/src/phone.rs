use common::phone::PhoneNumber;
use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, operator};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "phone")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Canonical `+7 DDD DDD DD DD` form.
    #[sea_orm(unique)]
    pub number: String,
    pub operator_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Operator }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Operator => Entity::belongs_to(operator::Entity)
                .from(Column::OperatorId)
                .to(operator::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The number is taken already normalized, so raw input can never be stored.
    pub fn new(number: &PhoneNumber, operator_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.as_str().to_string(),
            operator_id,
            created_at: Utc::now().into(),
        }
    }

    fn into_insert(self) -> ActiveModel {
        ActiveModel {
            id: Set(self.id),
            number: Set(self.number),
            operator_id: Set(self.operator_id),
            created_at: Set(self.created_at),
        }
    }
}

pub async fn create(db: &DatabaseConnection, number: &PhoneNumber, operator_id: Uuid) -> Result<Model, ModelError> {
    Model::new(number, operator_id).into_insert().insert(db).await.map_err(ModelError::from_db)
}

pub async fn replace(db: &DatabaseConnection, id: Uuid, number: &PhoneNumber, operator_id: Uuid) -> Result<Option<Model>, ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await.map_err(ModelError::from_db)? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.number = Set(number.as_str().to_string());
    am.operator_id = Set(operator_id);
    am.update(db).await.map(Some).map_err(ModelError::from_db)
}
