use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::body_part::BodyPart;
use crate::error::{ValidationError, ValidationResult, check_length};

/// Highest pain intensity on the 0–10 scale.
pub const MAX_INTENSITY: i32 = 10;

/// Character limit for a single entry's note.
pub const NOTE_MAX_CHARS: usize = 500;

/// One body region's pain observation.
///
/// Field names on the wire are the payload labels (`body_part`, `side_left`,
/// `side_right`, `pain_level`, `comments`). Every field defaults when absent,
/// so a partial object still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainEntry {
    #[serde(rename = "body_part")]
    pub location: String,
    #[serde(rename = "side_left")]
    pub left: bool,
    #[serde(rename = "side_right")]
    pub right: bool,
    #[serde(rename = "pain_level")]
    pub intensity: i32,
    #[serde(rename = "comments")]
    pub note: String,
}

impl PainEntry {
    pub fn new(part: BodyPart, left: bool, right: bool, intensity: i32, note: impl Into<String>) -> Self {
        Self {
            location: part.as_str().to_string(),
            left,
            right,
            intensity,
            note: note.into(),
        }
    }

    /// Checks the entry against the vocabulary and range rules, returning
    /// the body part its location key names.
    pub fn validate(&self) -> ValidationResult<BodyPart> {
        let part: BodyPart = self.location.parse()?;
        if !(0..=MAX_INTENSITY).contains(&self.intensity) {
            return Err(ValidationError::IntensityOutOfRange(self.intensity));
        }
        check_length("pain note", &self.note, NOTE_MAX_CHARS)?;
        Ok(part)
    }

    /// Intensity 0 is structurally valid but does not count as affected.
    pub fn is_affected(&self) -> bool {
        self.intensity > 0
    }

    pub fn to_value(&self) -> Value {
        json!({
            "body_part": self.location,
            "side_left": self.left,
            "side_right": self.right,
            "pain_level": self.intensity,
            "comments": self.note,
        })
    }

    /// Compact JSON object with all five fields.
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Best-effort decode of a single entry object.
    ///
    /// Missing or unrecognised fields are tolerated; a field of the wrong
    /// type (e.g. a non-integer `pain_level`) is an error. No range checks
    /// happen here.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
