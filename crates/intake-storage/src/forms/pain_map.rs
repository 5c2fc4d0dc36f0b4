use jiff::Timestamp;
use rusqlite::Row;
use rusqlite::types::Value;

use intake_core::error::ValidationResult;
use intake_core::ids::FormKind;
use intake_core::models::pain_map::{EMPTY_PAYLOAD, PainBodyMap};

use crate::error::StorageResult;
use crate::import::{CsvRow, parse_int_or_zero};
use crate::record::{ColumnDef, FormRecord, RowShell};

pub const PAYLOAD_COLUMN: &str = "pain_data";
pub const NOTES_COLUMN: &str = "additional_notes";

impl FormRecord for PainBodyMap {
    fn kind() -> FormKind {
        PainBodyMap::KIND
    }

    fn column_defs() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new(PAYLOAD_COLUMN, format!("TEXT NOT NULL DEFAULT '{EMPTY_PAYLOAD}'")),
            ColumnDef::new(NOTES_COLUMN, "TEXT NOT NULL DEFAULT ''"),
        ]
    }

    fn required_csv_columns() -> Vec<&'static str> {
        vec!["case_id", PAYLOAD_COLUMN]
    }

    fn id(&self) -> Option<i64> {
        PainBodyMap::id(self)
    }

    fn assign_id(&mut self, id: i64) {
        PainBodyMap::assign_id(self, id)
    }

    fn case_id(&self) -> i64 {
        PainBodyMap::case_id(self)
    }

    fn created_at(&self) -> Timestamp {
        PainBodyMap::created_at(self)
    }

    fn updated_at(&self) -> Timestamp {
        PainBodyMap::updated_at(self)
    }

    fn data_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.payload_text().to_string()),
            Value::Text(self.additional_notes().to_string()),
        ]
    }

    fn from_row(row: &Row<'_>) -> StorageResult<Self> {
        let shell = RowShell::read(row, Self::table())?;
        let payload: String = row.get(PAYLOAD_COLUMN)?;
        let notes: String = row.get(NOTES_COLUMN)?;
        PainBodyMap::from_parts(
            shell.id,
            shell.case_id,
            payload,
            notes,
            shell.created_at,
            shell.updated_at,
        )
        .map_err(|e| shell.corrupt(e))
    }

    fn from_csv(row: &CsvRow<'_>) -> ValidationResult<Self> {
        let mut map = PainBodyMap::new(parse_int_or_zero(row.field("case_id")))?;
        if let Some(payload) = row.field(PAYLOAD_COLUMN).filter(|p| !p.is_empty()) {
            map.set_payload_text(payload);
            map.check_payload()?;
        }
        if let Some(notes) = row.field(NOTES_COLUMN) {
            map.set_additional_notes(notes)?;
        }
        Ok(map)
    }
}
