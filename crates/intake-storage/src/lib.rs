//! intake-storage
//!
//! SQLite persistence for intake forms. One table per form kind, a generic
//! [`store::FormStore`] for CRUD, and transactional CSV bulk import.

pub mod db;
pub mod error;
pub mod forms;
pub mod import;
pub mod record;
pub mod schema;
pub mod store;
pub mod time;

pub use db::Database;
pub use error::{StorageError, StorageResult};
pub use import::ImportSummary;
pub use record::FormRecord;
pub use store::FormStore;
