//! SeaORM entities for the tracked records plus the validation shared by
//! every storage backend.
//!
//! Each entity module exposes a `Model::new(...)` constructor that stamps the
//! generated id and creation time; callers never supply those fields.

pub mod errors;
pub mod db;
pub mod operator;
pub mod service;
pub mod phone;
pub mod usage;

use errors::ModelError;

/// Display names of operators and services must not be blank.
pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
