//! Generic per-form-type manager.

use std::fs::File;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;

use jiff::Timestamp;
use rusqlite::types::Value;
use rusqlite::{Connection, params, params_from_iter};
use tracing::{debug, info};

use intake_core::ids::ID_RANGE;

use crate::error::{StorageError, StorageResult};
use crate::import::{self, ImportSummary};
use crate::record::FormRecord;
use crate::time;

/// CRUD and bulk import for one form type over a borrowed connection.
///
/// Expected misses (no such row) come back as `Ok(false)`/`Ok(None)`;
/// storage failures come back as `Err`. Records are not re-validated here;
/// callers check `is_valid_record()` before persisting when they need to.
pub struct FormStore<'c, T> {
    conn: &'c Connection,
    _record: PhantomData<T>,
}

impl<'c, T: FormRecord> FormStore<'c, T> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            conn,
            _record: PhantomData,
        }
    }

    /// Inserts `record` and returns its id. An unsaved record gets the next
    /// free id of its kind, written back into it.
    pub fn create(&self, record: &mut T) -> StorageResult<i64> {
        let id = insert(self.conn, record)?;
        info!(table = T::table(), id, case_id = record.case_id(), "form created");
        Ok(id)
    }

    /// Rewrites every mutable column of the row matching `record`'s id.
    /// The stored `updated_at` is set to the time of the write.
    pub fn update(&self, record: &T) -> StorageResult<bool> {
        let Some(id) = record.id() else {
            debug!(table = T::table(), "update skipped: record was never stored");
            return Ok(false);
        };

        let assignments: Vec<String> = std::iter::once("case_id")
            .chain(T::data_columns())
            .chain(std::iter::once("updated_at"))
            .map(|column| format!("{column} = ?"))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            T::table(),
            assignments.join(", ")
        );

        let mut values = vec![Value::Integer(record.case_id())];
        values.extend(record.data_values());
        values.push(Value::Text(time::to_column(Timestamp::now())));
        values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(values.iter()))?;
        debug!(table = T::table(), id, changed, "form updated");
        Ok(changed > 0)
    }

    pub fn get_by_id(&self, id: i64) -> StorageResult<Option<T>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", select_columns::<T>(), T::table());
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => T::from_row(row).map(Some),
            None => Ok(None),
        }
    }

    /// All forms of this type for a case, oldest first.
    pub fn list_by_case(&self, case_id: i64) -> StorageResult<Vec<T>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE case_id = ? ORDER BY created_at ASC, id ASC",
            select_columns::<T>(),
            T::table()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![case_id])?;
        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            results.push(T::from_row(row)?);
        }
        Ok(results)
    }

    pub fn delete_by_id(&self, id: i64) -> StorageResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::table());
        let removed = self.conn.execute(&sql, params![id])?;
        if removed > 0 {
            info!(table = T::table(), id, "form deleted");
        }
        Ok(removed > 0)
    }

    pub fn count(&self) -> StorageResult<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", T::table());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Imports every row of a CSV file as a new form of this type.
    pub fn import_csv(&self, path: impl AsRef<Path>) -> StorageResult<ImportSummary> {
        let path = path.as_ref();
        info!(table = T::table(), path = %path.display(), "importing CSV");
        let file = File::open(path)?;
        self.import_reader(file)
    }

    /// Same as [`FormStore::import_csv`] for any reader.
    pub fn import_reader<R: Read>(&self, source: R) -> StorageResult<ImportSummary> {
        import::import_records::<T, R>(self.conn, source)
    }
}

fn select_columns<T: FormRecord>() -> String {
    let mut columns = vec!["id", "case_id", "form_type"];
    columns.extend(T::data_columns());
    columns.extend(["created_at", "updated_at"]);
    columns.join(", ")
}

/// Next id for `T`: one past the highest stored id, never below the kind's base.
fn allocate_id<T: FormRecord>(conn: &Connection) -> StorageResult<i64> {
    let kind = T::kind();
    let sql = format!("SELECT MAX(id) FROM {}", T::table());
    let max: Option<i64> = conn.query_row(&sql, [], |row| row.get(0))?;
    let next = max.map_or(kind.id_base(), |m| (m + 1).max(kind.id_base()));
    if next >= kind.id_base() + ID_RANGE {
        return Err(StorageError::IdsExhausted(kind));
    }
    Ok(next)
}

/// Writes one new row. The id is only assigned back once the INSERT succeeded.
pub(crate) fn insert<T: FormRecord>(conn: &Connection, record: &mut T) -> StorageResult<i64> {
    let kind = T::kind();
    let id = match record.id() {
        Some(id) => id,
        None => allocate_id::<T>(conn)?,
    };
    if !kind.contains(id) {
        return Err(StorageError::IdOutOfRange { kind, id });
    }

    let columns = select_columns::<T>();
    let placeholders = vec!["?"; T::data_columns().len() + 5].join(", ");
    let sql = format!("INSERT INTO {} ({columns}) VALUES ({placeholders})", T::table());

    let mut values = vec![
        Value::Integer(id),
        Value::Integer(record.case_id()),
        Value::Text(kind.form_type().to_string()),
    ];
    values.extend(record.data_values());
    values.push(Value::Text(time::to_column(record.created_at())));
    values.push(Value::Text(time::to_column(record.updated_at())));

    conn.execute(&sql, params_from_iter(values.iter()))?;
    record.assign_id(id);
    Ok(id)
}
