//! SQLite database handle.

use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use intake_core::models::pain_map::PainBodyMap;

use crate::error::StorageResult;
use crate::record::FormRecord;
use crate::schema;
use crate::store::FormStore;

/// Owns the connection every form store borrows.
///
/// Not meant to be shared across threads; callers serialise access.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database file and its tables.
    pub fn open(path: &Path) -> StorageResult<Self> {
        info!("Opening SQLite database at {:?}", path);
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        Self::init(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        debug!("Opening in-memory SQLite database");
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StorageResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn forms<T: FormRecord>(&self) -> FormStore<'_, T> {
        FormStore::new(&self.conn)
    }

    pub fn pain_maps(&self) -> FormStore<'_, PainBodyMap> {
        self.forms()
    }
}
