use thiserror::Error;

use intake_core::ids::FormKind;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt row {id} in {table}: {reason}")]
    CorruptRow {
        table: &'static str,
        id: i64,
        reason: String,
    },

    #[error("id {id} is outside the {kind} id block")]
    IdOutOfRange { kind: FormKind, id: i64 },

    #[error("{0} id block is exhausted")]
    IdsExhausted(FormKind),
}

pub type StorageResult<T> = Result<T, StorageError>;
