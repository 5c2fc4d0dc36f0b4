use thiserror::Error;

/// Rejection of new input by a strict constructor or mutator.
///
/// A call that returns one of these leaves the receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown body part: '{0}'")]
    UnknownBodyPart(String),

    #[error("pain intensity {0} is outside range [0, 10]")]
    IntensityOutOfRange(i32),

    #[error("{field} is {len} characters long (max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("pain payload has {0} unreadable entries")]
    RejectedPayloadEntries(usize),

    #[error("invalid case reference: {0}")]
    InvalidCaseId(i64),

    #[error("{instrument}: answer {value} for item {item} is outside range [0, {max}]")]
    AnswerOutOfRange {
        instrument: &'static str,
        item: usize,
        value: i64,
        max: u8,
    },

    #[error("{instrument} has no item {item}")]
    UnknownItem { instrument: &'static str, item: usize },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks a free-text field against its character limit.
pub fn check_length(field: &'static str, text: &str, max: usize) -> ValidationResult<()> {
    let len = text.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(())
}
