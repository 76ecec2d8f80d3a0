use common::phone::InvalidFormat;
use models::errors::ModelError;
use thiserror::Error;

use crate::ids::{InvalidIdentifier, RecordKind};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    InvalidPhone(#[from] InvalidFormat),
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(kind: RecordKind) -> Self { Self::NotFound(format!("{} not found", kind.label())) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Duplicate(msg) => Self::Conflict(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}
