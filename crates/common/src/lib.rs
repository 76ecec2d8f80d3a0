//! Shared building blocks for the UPN workspace: logging setup, runtime
//! directory checks, small response types and the phone number normalizer.

pub mod types;
pub mod utils;
pub mod env;
pub mod phone;
