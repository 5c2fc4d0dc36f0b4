//! Standard body-part vocabulary for the pain body map.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A body region that can carry a pain entry.
///
/// Variants are declared head to feet; the derived `Ord` follows that order
/// and the serialized payload lists entries in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BodyPart {
    Head,
    Jaw,
    Neck,
    Shoulders,
    UpperBack,
    Chest,
    Abdomen,
    LowBack,
    UpperArms,
    Elbows,
    Forearms,
    Wrists,
    Hands,
    Hips,
    Buttocks,
    Thighs,
    Knees,
    LowerLegs,
    Ankles,
    Feet,
}

impl BodyPart {
    pub const ALL: [BodyPart; 20] = [
        BodyPart::Head,
        BodyPart::Jaw,
        BodyPart::Neck,
        BodyPart::Shoulders,
        BodyPart::UpperBack,
        BodyPart::Chest,
        BodyPart::Abdomen,
        BodyPart::LowBack,
        BodyPart::UpperArms,
        BodyPart::Elbows,
        BodyPart::Forearms,
        BodyPart::Wrists,
        BodyPart::Hands,
        BodyPart::Hips,
        BodyPart::Buttocks,
        BodyPart::Thighs,
        BodyPart::Knees,
        BodyPart::LowerLegs,
        BodyPart::Ankles,
        BodyPart::Feet,
    ];

    /// The location key used in payloads and CSV files.
    pub fn as_str(self) -> &'static str {
        match self {
            BodyPart::Head => "head",
            BodyPart::Jaw => "jaw",
            BodyPart::Neck => "neck",
            BodyPart::Shoulders => "shoulders",
            BodyPart::UpperBack => "upper_back",
            BodyPart::Chest => "chest",
            BodyPart::Abdomen => "abdomen",
            BodyPart::LowBack => "low_back",
            BodyPart::UpperArms => "upper_arms",
            BodyPart::Elbows => "elbows",
            BodyPart::Forearms => "forearms",
            BodyPart::Wrists => "wrists",
            BodyPart::Hands => "hands",
            BodyPart::Hips => "hips",
            BodyPart::Buttocks => "buttocks",
            BodyPart::Thighs => "thighs",
            BodyPart::Knees => "knees",
            BodyPart::LowerLegs => "lower_legs",
            BodyPart::Ankles => "ankles",
            BodyPart::Feet => "feet",
        }
    }

    /// Human-readable label for reports.
    pub fn label(self) -> String {
        let key = self.as_str().replace('_', " ");
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl FromStr for BodyPart {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|part| part.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownBodyPart(s.to_string()))
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
