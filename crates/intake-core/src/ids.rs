//! Record id partitioning.
//!
//! Each form kind owns a contiguous block of integer ids so that an id on a
//! printout tells the reader which form it belongs to. Cases live below all
//! of them, starting at [`CASE_ID_FLOOR`].

use std::fmt;

use crate::error::{ValidationError, ValidationResult};

/// Lowest id a clinical case can carry.
pub const CASE_ID_FLOOR: i64 = 1_000;

/// Width of the id block reserved for each form kind.
pub const ID_RANGE: i64 = 1_000_000;

pub fn is_valid_case_id(id: i64) -> bool {
    id >= CASE_ID_FLOOR
}

pub fn check_case_id(id: i64) -> ValidationResult<()> {
    if !is_valid_case_id(id) {
        return Err(ValidationError::InvalidCaseId(id));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// PHQ-9.
    DepressionInventory,
    /// GAD-7.
    AnxietyInventory,
    /// PC-PTSD-5.
    TraumaScreen,
    PainBodyMap,
}

impl FormKind {
    pub const ALL: [FormKind; 4] = [
        FormKind::DepressionInventory,
        FormKind::AnxietyInventory,
        FormKind::TraumaScreen,
        FormKind::PainBodyMap,
    ];

    /// Constant discriminator stored alongside every row.
    pub fn form_type(self) -> &'static str {
        match self {
            FormKind::DepressionInventory => "depression_inventory",
            FormKind::AnxietyInventory => "anxiety_inventory",
            FormKind::TraumaScreen => "trauma_screen",
            FormKind::PainBodyMap => "pain_body_map",
        }
    }

    /// First id of this kind's block.
    pub fn id_base(self) -> i64 {
        match self {
            FormKind::DepressionInventory => 2_000_000,
            FormKind::AnxietyInventory => 3_000_000,
            FormKind::TraumaScreen => 4_000_000,
            FormKind::PainBodyMap => 5_000_000,
        }
    }

    pub fn contains(self, id: i64) -> bool {
        let base = self.id_base();
        id >= base && id < base + ID_RANGE
    }

    /// Which kind an id was allocated for, if any.
    pub fn of_id(id: i64) -> Option<FormKind> {
        Self::ALL.into_iter().find(|kind| kind.contains(id))
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_type())
    }
}
