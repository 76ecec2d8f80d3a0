//! Business layer of the phone tracker.
//! - Repository traits with a Postgres (SeaORM) and a JSON-file backend.
//! - Services that parse ids, normalize numbers and enforce uniqueness before
//!   touching storage.
//! - Ordered phone matching for search.

pub mod errors;
pub mod ids;
pub mod domain;
pub mod repository;
pub mod repo;
pub mod storage;
pub mod named_service;
pub mod phone_service;
pub mod usage_service;
pub mod search_service;
pub mod runtime;
#[cfg(test)]
pub mod test_support;

pub use runtime::AppServices;
