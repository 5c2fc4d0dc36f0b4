//! intake-core
//!
//! Pure domain types for clinical intake forms: id partitioning, the
//! body-part vocabulary, and the pain body map with its embedded JSON payload.
//! No database dependency; storage lives in `intake-storage`.

pub mod body_part;
pub mod error;
pub mod ids;
pub mod models;
