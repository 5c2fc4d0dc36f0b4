//! intake-instruments
//!
//! Fixed-question inventory definitions. Pure data with no database dependency.
//! Defines the items, answer scales and score bands for each supported
//! instrument, plus the [`inventory::Inventory`] form that records answers.

pub mod error;
pub mod instruments;
pub mod inventory;
pub mod scoring;

use intake_core::error::ValidationError;
use intake_core::ids::FormKind;

use error::InstrumentError;
use scoring::{Item, ItemScale, ScoreBand};

/// Trait implemented by each fixed-question inventory.
pub trait Instrument: Send + Sync {
    /// Unique identifier, also the table and column prefix (e.g., "phq9").
    fn id(&self) -> &'static str;

    /// Human-readable name (e.g., "PHQ-9").
    fn name(&self) -> &'static str;

    /// The form kind records of this instrument are stored as.
    fn kind(&self) -> FormKind;

    fn scale(&self) -> ItemScale;

    fn items(&self) -> &'static [Item];

    /// Interpretation bands covering every total from 0 to [`Self::max_total`].
    fn bands(&self) -> &'static [ScoreBand];

    fn max_total(&self) -> u32 {
        self.items().len() as u32 * u32::from(self.scale().max())
    }

    fn interpret(&self, total: u32) -> Option<&'static ScoreBand> {
        self.bands().iter().find(|band| band.contains(total))
    }

    /// Check a single answer against this instrument's item count and scale.
    fn validate_answer(&self, item: usize, value: i64) -> Result<(), ValidationError> {
        if item >= self.items().len() {
            return Err(ValidationError::UnknownItem {
                instrument: self.name(),
                item,
            });
        }
        if !self.scale().contains(value) {
            return Err(ValidationError::AnswerOutOfRange {
                instrument: self.name(),
                item,
                value,
                max: self.scale().max(),
            });
        }
        Ok(())
    }

    /// Validate a full set of answers, collecting every problem.
    fn validate_answers(&self, answers: &[i64]) -> Vec<ValidationError> {
        answers
            .iter()
            .enumerate()
            .filter_map(|(item, value)| self.validate_answer(item, *value).err())
            .collect()
    }

    /// Format answers as structured text for a clinician-facing summary.
    fn to_structured_input(&self, answers: &[u8]) -> String {
        let mut output = format!("## {}\n\n", self.name());
        let mut total = 0u32;
        for (item, answer) in self.items().iter().zip(answers) {
            output.push_str(&format!("- {}: {}\n", item.text, answer_label(self.scale(), *answer)));
            total += u32::from(*answer);
        }
        output.push_str(&format!("\nTotal: {} / {}", total, self.max_total()));
        if let Some(band) = self.interpret(total) {
            output.push_str(&format!(" ({})", band.label));
        }
        output.push('\n');
        output
    }
}

fn answer_label(scale: ItemScale, answer: u8) -> String {
    match scale {
        ItemScale::YesNo if answer == 1 => "yes".to_string(),
        ItemScale::YesNo => "no".to_string(),
        ItemScale::Likert { .. } => answer.to_string(),
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
        Box::new(instruments::pc_ptsd5::PcPtsd5),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
    all_instruments()
        .into_iter()
        .find(|i| i.id() == id)
        .ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}
