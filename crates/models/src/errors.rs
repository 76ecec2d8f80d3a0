use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("duplicate: {0}")]
    Duplicate(String),
}

impl ModelError {
    /// Map a SeaORM error, surfacing unique index violations as [`ModelError::Duplicate`].
    pub fn from_db(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => Self::Duplicate(msg),
            _ => Self::Db(err.to_string()),
        }
    }
}
