use intake_core::ids::FormKind;

use crate::Instrument;
use crate::scoring::{Item, ItemScale, ScoreBand};

/// PHQ-9: Patient Health Questionnaire, nine-item depression inventory.
/// Each item rates the last two weeks from 0 (not at all) to 3 (nearly every day).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Phq9;

static ITEMS: [Item; 9] = [
    Item { id: "phq9_q1", text: "Little interest or pleasure in doing things" },
    Item { id: "phq9_q2", text: "Feeling down, depressed, or hopeless" },
    Item { id: "phq9_q3", text: "Trouble falling or staying asleep, or sleeping too much" },
    Item { id: "phq9_q4", text: "Feeling tired or having little energy" },
    Item { id: "phq9_q5", text: "Poor appetite or overeating" },
    Item {
        id: "phq9_q6",
        text: "Feeling bad about yourself, or that you are a failure or have let yourself or your family down",
    },
    Item {
        id: "phq9_q7",
        text: "Trouble concentrating on things, such as reading the newspaper or watching television",
    },
    Item {
        id: "phq9_q8",
        text: "Moving or speaking so slowly that other people could have noticed, or being so fidgety or restless that you have been moving around a lot more than usual",
    },
    Item {
        id: "phq9_q9",
        text: "Thoughts that you would be better off dead, or of hurting yourself in some way",
    },
];

static BANDS: [ScoreBand; 5] = [
    ScoreBand { min: 0, max: 4, label: "minimal" },
    ScoreBand { min: 5, max: 9, label: "mild" },
    ScoreBand { min: 10, max: 14, label: "moderate" },
    ScoreBand { min: 15, max: 19, label: "moderately severe" },
    ScoreBand { min: 20, max: 27, label: "severe" },
];

impl Instrument for Phq9 {
    fn id(&self) -> &'static str {
        "phq9"
    }

    fn name(&self) -> &'static str {
        "PHQ-9"
    }

    fn kind(&self) -> FormKind {
        FormKind::DepressionInventory
    }

    fn scale(&self) -> ItemScale {
        ItemScale::Likert { max: 3 }
    }

    fn items(&self) -> &'static [Item] {
        &ITEMS
    }

    fn bands(&self) -> &'static [ScoreBand] {
        &BANDS
    }
}
