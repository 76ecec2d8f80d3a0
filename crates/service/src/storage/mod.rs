//! Storage abstractions for service layer
//!
//! Reusable map store backing the file/in-memory repositories.

pub mod json_map_store;
