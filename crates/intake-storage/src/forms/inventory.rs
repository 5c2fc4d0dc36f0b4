use jiff::Timestamp;
use rusqlite::Row;
use rusqlite::types::Value;

use intake_core::error::ValidationResult;
use intake_core::ids::FormKind;
use intake_instruments::Instrument;
use intake_instruments::inventory::Inventory;

use crate::error::StorageResult;
use crate::import::{CsvRow, parse_answer, parse_int_or_zero};
use crate::record::{ColumnDef, FormRecord, RowShell};

pub const NOTES_COLUMN: &str = "notes";

impl<I: Instrument + Default> FormRecord for Inventory<I> {
    fn kind() -> FormKind {
        I::default().kind()
    }

    fn column_defs() -> Vec<ColumnDef> {
        let instrument = I::default();
        let max = instrument.scale().max();
        let mut defs: Vec<ColumnDef> = instrument
            .items()
            .iter()
            .map(|item| {
                ColumnDef::new(
                    item.id,
                    format!("INTEGER NOT NULL DEFAULT 0 CHECK ({} BETWEEN 0 AND {max})", item.id),
                )
            })
            .collect();
        defs.push(ColumnDef::new(NOTES_COLUMN, "TEXT NOT NULL DEFAULT ''"));
        defs
    }

    fn required_csv_columns() -> Vec<&'static str> {
        let mut columns = vec!["case_id"];
        columns.extend(I::default().items().iter().map(|item| item.id));
        columns
    }

    fn id(&self) -> Option<i64> {
        Inventory::id(self)
    }

    fn assign_id(&mut self, id: i64) {
        Inventory::assign_id(self, id)
    }

    fn case_id(&self) -> i64 {
        Inventory::case_id(self)
    }

    fn created_at(&self) -> Timestamp {
        Inventory::created_at(self)
    }

    fn updated_at(&self) -> Timestamp {
        Inventory::updated_at(self)
    }

    fn data_values(&self) -> Vec<Value> {
        let mut values: Vec<Value> = self
            .answers()
            .iter()
            .map(|a| Value::Integer(i64::from(*a)))
            .collect();
        values.push(Value::Text(self.notes().to_string()));
        values
    }

    fn from_row(row: &Row<'_>) -> StorageResult<Self> {
        let shell = RowShell::read(row, Self::table())?;
        let answers = I::default()
            .items()
            .iter()
            .map(|item| row.get::<_, i64>(item.id))
            .collect::<Result<Vec<_>, _>>()?;
        let notes: String = row.get(NOTES_COLUMN)?;
        Inventory::from_parts(
            shell.id,
            shell.case_id,
            answers,
            notes,
            shell.created_at,
            shell.updated_at,
        )
        .map_err(|e| shell.corrupt(e))
    }

    fn from_csv(row: &CsvRow<'_>) -> ValidationResult<Self> {
        let mut form = Inventory::<I>::new(parse_int_or_zero(row.field("case_id")))?;
        let scale = form.instrument().scale();
        let answers: Vec<i64> = form
            .instrument()
            .items()
            .iter()
            .map(|item| parse_answer(row.field(item.id), scale))
            .collect();
        form.set_answers(&answers)?;
        if let Some(notes) = row.field(NOTES_COLUMN) {
            form.set_notes(notes)?;
        }
        Ok(form)
    }
}
