//! CSV bulk import.
//!
//! An import runs in three steps. The header row is checked against the
//! form's required columns, and a missing column aborts before storage is
//! touched. The remaining rows are then read into memory. Finally every row
//! is inserted inside one transaction: a row that fails validation or a
//! constraint on INSERT is counted and skipped. Any other storage failure
//! rolls the whole transaction back and is returned, as is a failed commit.

use std::collections::HashMap;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use rusqlite::{Connection, ErrorCode};
use tracing::{debug, info, warn};

use intake_instruments::scoring::ItemScale;

use crate::error::{StorageError, StorageResult};
use crate::record::FormRecord;
use crate::store;

/// Outcome of one import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Data rows read from the file.
    pub rows: usize,
    pub imported: usize,
    pub failed: usize,
    /// Required headers the file lacked. Non-empty means nothing was imported.
    pub missing_columns: Vec<String>,
}

impl ImportSummary {
    pub fn aborted(&self) -> bool {
        !self.missing_columns.is_empty()
    }
}

/// One CSV data row, addressable by header name.
pub struct CsvRow<'a> {
    headers: &'a HashMap<String, usize>,
    record: &'a StringRecord,
}

impl<'a> CsvRow<'a> {
    pub fn new(headers: &'a HashMap<String, usize>, record: &'a StringRecord) -> Self {
        Self { headers, record }
    }

    /// The field under `column`, or `None` when the file has no such column
    /// or this row is too short to reach it.
    pub fn field(&self, column: &str) -> Option<&'a str> {
        let index = *self.headers.get(column)?;
        self.record.get(index)
    }
}

/// Integer field; anything that does not parse reads as 0.
pub fn parse_int_or_zero(token: Option<&str>) -> i64 {
    token.and_then(|t| t.trim().parse().ok()).unwrap_or(0)
}

/// Yes/no field coded `1`/`0`. Only `1` is yes.
///
/// Tokens such as `2`, `-1` or `yes` also read as no; they are logged at
/// debug so the difference from an explicit `0` can be traced.
pub fn parse_flag(token: Option<&str>) -> bool {
    match token.map(str::trim) {
        Some("1") => true,
        Some("0") | Some("") | None => false,
        Some(other) => {
            debug!(token = other, "treating non-'1' yes/no token as no");
            false
        }
    }
}

/// Answer for an item on `scale`; unparseable or out-of-scale tokens read as 0.
pub fn parse_answer(token: Option<&str>, scale: ItemScale) -> i64 {
    match scale {
        ItemScale::YesNo => i64::from(parse_flag(token)),
        ItemScale::Likert { .. } => {
            let value = parse_int_or_zero(token);
            if scale.contains(value) {
                value
            } else {
                debug!(value, max = scale.max(), "answer outside scale; reading as 0");
                0
            }
        }
    }
}

/// Insert failures that concern only the row being written. Anything else
/// means the transaction can no longer be trusted.
fn is_row_failure(err: &StorageError) -> bool {
    match err {
        StorageError::Sqlite(rusqlite::Error::SqliteFailure(e, _)) => {
            e.code == ErrorCode::ConstraintViolation
        }
        StorageError::IdOutOfRange { .. } => true,
        _ => false,
    }
}

pub(crate) fn import_records<T: FormRecord, R: Read>(
    conn: &Connection,
    source: R,
) -> StorageResult<ImportSummary> {
    let table = T::table();
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), i))
        .collect();

    let missing_columns: Vec<String> = T::required_csv_columns()
        .into_iter()
        .filter(|column| !headers.contains_key(*column))
        .map(str::to_string)
        .collect();
    if !missing_columns.is_empty() {
        warn!(table, missing = ?missing_columns, "CSV import aborted: required columns missing");
        return Ok(ImportSummary {
            missing_columns,
            ..ImportSummary::default()
        });
    }

    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    let mut summary = ImportSummary {
        rows: records.len(),
        ..ImportSummary::default()
    };

    let tx = conn.unchecked_transaction()?;
    for (n, record) in records.iter().enumerate() {
        let line = record.position().map(|p| p.line()).unwrap_or(n as u64 + 2);
        let row = CsvRow::new(&headers, record);

        let mut candidate = match T::from_csv(&row) {
            Ok(candidate) => candidate,
            Err(e) => {
                warn!(table, line, error = %e, "CSV row rejected");
                summary.failed += 1;
                continue;
            }
        };

        let inserted = store::insert(&tx, &mut candidate);
        match inserted {
            Ok(id) => {
                debug!(table, line, id, "CSV row imported");
                summary.imported += 1;
            }
            Err(e) if is_row_failure(&e) && !tx.is_autocommit() => {
                warn!(table, line, error = %e, "CSV row insert failed");
                summary.failed += 1;
            }
            Err(e) => {
                warn!(table, line, error = %e, "CSV import aborted by storage failure; rolled back");
                // Dropping the transaction rolls back whatever SQLite has not.
                drop(tx);
                return Err(e);
            }
        }
    }

    if let Err(e) = tx.commit() {
        warn!(table, error = %e, "CSV import commit failed; rolled back");
        return Err(e.into());
    }

    info!(
        table,
        rows = summary.rows,
        imported = summary.imported,
        failed = summary.failed,
        "CSV import complete"
    );
    Ok(summary)
}
