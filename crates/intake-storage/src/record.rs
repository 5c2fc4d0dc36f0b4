//! Row-mapping contract shared by every stored form.

use jiff::Timestamp;
use rusqlite::Row;
use rusqlite::types::Value;

use intake_core::error::{ValidationError, ValidationResult};
use intake_core::ids::FormKind;

use crate::error::{StorageError, StorageResult};
use crate::import::CsvRow;
use crate::schema;
use crate::time;

/// A form-specific column, stored between `form_type` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    /// Type and constraints, e.g. `TEXT NOT NULL DEFAULT ''`.
    pub sql: String,
}

impl ColumnDef {
    pub fn new(name: &'static str, sql: impl Into<String>) -> Self {
        Self {
            name,
            sql: sql.into(),
        }
    }
}

/// An entity with the common relational shell (id, case, timestamps) plus
/// form-specific columns.
pub trait FormRecord: Sized {
    fn kind() -> FormKind;

    fn table() -> &'static str {
        schema::table_name(Self::kind())
    }

    /// Form-specific columns, in bind order.
    fn column_defs() -> Vec<ColumnDef>;

    fn data_columns() -> Vec<&'static str> {
        Self::column_defs().into_iter().map(|c| c.name).collect()
    }

    /// Headers a CSV file must carry to be imported as this form.
    fn required_csv_columns() -> Vec<&'static str>;

    fn id(&self) -> Option<i64>;

    fn assign_id(&mut self, id: i64);

    fn case_id(&self) -> i64;

    fn created_at(&self) -> Timestamp;

    fn updated_at(&self) -> Timestamp;

    /// Values for [`FormRecord::data_columns`], same order.
    fn data_values(&self) -> Vec<Value>;

    fn from_row(row: &Row<'_>) -> StorageResult<Self>;

    /// Builds a new, unsaved record from one CSV row. Field parsing is
    /// lenient; only construction-time validation fails the row.
    fn from_csv(row: &CsvRow<'_>) -> ValidationResult<Self>;
}

/// The common columns of a stored row, already decoded.
#[derive(Debug, Clone, Copy)]
pub struct RowShell {
    pub table: &'static str,
    pub id: i64,
    pub case_id: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RowShell {
    pub fn read(row: &Row<'_>, table: &'static str) -> StorageResult<Self> {
        let id: i64 = row.get("id")?;
        let case_id: i64 = row.get("case_id")?;
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;

        let parse = |column: &str, text: &str| {
            time::from_column(text).map_err(|e| StorageError::CorruptRow {
                table,
                id,
                reason: format!("bad {column} '{text}': {e}"),
            })
        };

        Ok(Self {
            table,
            id,
            case_id,
            created_at: parse("created_at", &created_at)?,
            updated_at: parse("updated_at", &updated_at)?,
        })
    }

    /// Wraps a rehydration failure as a corrupt-row storage error.
    pub fn corrupt(&self, err: ValidationError) -> StorageError {
        StorageError::CorruptRow {
            table: self.table,
            id: self.id,
            reason: err.to_string(),
        }
    }
}
