//! Repository backends.

pub mod seaorm;
pub mod file;
