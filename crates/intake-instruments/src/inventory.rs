use jiff::Timestamp;
use tracing::warn;

use intake_core::error::{ValidationError, ValidationResult, check_length};
use intake_core::ids::{check_case_id, is_valid_case_id};

use crate::Instrument;
use crate::scoring::ScoreBand;

/// Character limit for clinician notes on an inventory.
pub const NOTES_MAX_CHARS: usize = 2000;

/// A completed (or in-progress) fixed-question form for one case.
///
/// `answers` always holds exactly one value per item of `I`, each within
/// the instrument's scale. Unanswered items read as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory<I> {
    instrument: I,
    id: Option<i64>,
    case_id: i64,
    answers: Vec<u8>,
    notes: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl<I: Instrument + Default> Inventory<I> {
    pub fn new(case_id: i64) -> ValidationResult<Self> {
        check_case_id(case_id)?;
        let instrument = I::default();
        let answers = vec![0; instrument.items().len()];
        let now = Timestamp::now();
        Ok(Self {
            instrument,
            id: None,
            case_id,
            answers,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a stored form. Stored answers are trusted but normalised:
    /// missing items read as 0 and out-of-scale values are zeroed.
    pub fn from_parts(
        id: i64,
        case_id: i64,
        answers: Vec<i64>,
        notes: impl Into<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> ValidationResult<Self> {
        check_case_id(case_id)?;
        let instrument = I::default();
        let scale = instrument.scale();
        let answers = (0..instrument.items().len())
            .map(|item| match answers.get(item) {
                Some(&value) if scale.contains(value) => value as u8,
                Some(&value) => {
                    warn!(
                        instrument = instrument.id(),
                        id,
                        item,
                        value,
                        "stored answer outside scale; reading as 0"
                    );
                    0
                }
                None => 0,
            })
            .collect();
        Ok(Self {
            instrument,
            id: Some(id),
            case_id,
            answers,
            notes: notes.into(),
            created_at,
            updated_at,
        })
    }
}

impl<I: Instrument> Inventory<I> {
    pub fn instrument(&self) -> &I {
        &self.instrument
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Records the id the store allocated on insert.
    pub fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn case_id(&self) -> i64 {
        self.case_id
    }

    pub fn set_case_id(&mut self, case_id: i64) -> ValidationResult<()> {
        check_case_id(case_id)?;
        self.case_id = case_id;
        self.touch();
        Ok(())
    }

    pub fn form_type(&self) -> &'static str {
        self.instrument.kind().form_type()
    }

    pub fn answers(&self) -> &[u8] {
        &self.answers
    }

    pub fn answer(&self, item: usize) -> Option<u8> {
        self.answers.get(item).copied()
    }

    pub fn set_answer(&mut self, item: usize, value: i64) -> ValidationResult<()> {
        self.instrument.validate_answer(item, value)?;
        self.answers[item] = value as u8;
        self.touch();
        Ok(())
    }

    /// Replaces all answers at once; nothing changes unless every value is valid.
    pub fn set_answers(&mut self, values: &[i64]) -> ValidationResult<()> {
        let expected = self.instrument.items().len();
        if values.len() > expected {
            return Err(ValidationError::UnknownItem {
                instrument: self.instrument.name(),
                item: expected,
            });
        }
        if let Some(err) = self.instrument.validate_answers(values).into_iter().next() {
            return Err(err);
        }
        for (slot, value) in self.answers.iter_mut().zip(values) {
            *slot = *value as u8;
        }
        self.touch();
        Ok(())
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, text: impl Into<String>) -> ValidationResult<()> {
        let text = text.into();
        check_length("inventory notes", &text, NOTES_MAX_CHARS)?;
        self.notes = text;
        self.touch();
        Ok(())
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn total_score(&self) -> u32 {
        self.answers.iter().map(|a| u32::from(*a)).sum()
    }

    pub fn severity(&self) -> Option<&'static ScoreBand> {
        self.instrument.interpret(self.total_score())
    }

    pub fn is_valid_record(&self) -> bool {
        is_valid_case_id(self.case_id)
            && self.notes.chars().count() <= NOTES_MAX_CHARS
            && self.answers.len() == self.instrument.items().len()
            && self
                .answers
                .iter()
                .all(|a| self.instrument.scale().contains(i64::from(*a)))
    }

    pub fn summary_text(&self) -> String {
        let mut text = self.instrument.to_structured_input(&self.answers);
        if !self.notes.is_empty() {
            text.push_str(&format!("\nNotes: {}\n", self.notes));
        }
        text
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
