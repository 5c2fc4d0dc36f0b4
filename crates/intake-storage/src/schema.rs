//! Table definitions. One table per form kind.

use rusqlite::Connection;
use tracing::debug;

use intake_core::ids::{CASE_ID_FLOOR, FormKind};
use intake_core::models::pain_map::PainBodyMap;
use intake_instruments::instruments::{gad7::Gad7, pc_ptsd5::PcPtsd5, phq9::Phq9};
use intake_instruments::inventory::Inventory;

use crate::error::StorageResult;
use crate::record::FormRecord;

pub fn table_name(kind: FormKind) -> &'static str {
    match kind {
        FormKind::DepressionInventory => "phq9_forms",
        FormKind::AnxietyInventory => "gad7_forms",
        FormKind::TraumaScreen => "pc_ptsd5_forms",
        FormKind::PainBodyMap => "pain_body_maps",
    }
}

pub fn create_table_sql<T: FormRecord>() -> String {
    let kind = T::kind();
    let table = T::table();
    let mut columns = vec![
        "id INTEGER PRIMARY KEY NOT NULL".to_string(),
        format!("case_id INTEGER NOT NULL CHECK (case_id >= {CASE_ID_FLOOR})"),
        format!(
            "form_type TEXT NOT NULL CHECK (form_type = '{}')",
            kind.form_type()
        ),
    ];
    columns.extend(
        T::column_defs()
            .into_iter()
            .map(|c| format!("{} {}", c.name, c.sql)),
    );
    columns.push("created_at TEXT NOT NULL".to_string());
    columns.push("updated_at TEXT NOT NULL".to_string());

    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\n    {}\n);\n\
         CREATE INDEX IF NOT EXISTS idx_{table}_case ON {table}(case_id, created_at);",
        columns.join(",\n    ")
    )
}

/// Creates every form table that does not exist yet.
pub fn init_schema(conn: &Connection) -> StorageResult<()> {
    for sql in [
        create_table_sql::<Inventory<Phq9>>(),
        create_table_sql::<Inventory<Gad7>>(),
        create_table_sql::<Inventory<PcPtsd5>>(),
        create_table_sql::<PainBodyMap>(),
    ] {
        debug!("{sql}");
        conn.execute_batch(&sql)?;
    }
    Ok(())
}
