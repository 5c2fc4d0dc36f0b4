use intake_core::ids::FormKind;

use crate::Instrument;
use crate::scoring::{Item, ItemScale, ScoreBand};

/// GAD-7: Generalized Anxiety Disorder seven-item scale, 0–3 per item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gad7;

static ITEMS: [Item; 7] = [
    Item { id: "gad7_q1", text: "Feeling nervous, anxious, or on edge" },
    Item { id: "gad7_q2", text: "Not being able to stop or control worrying" },
    Item { id: "gad7_q3", text: "Worrying too much about different things" },
    Item { id: "gad7_q4", text: "Trouble relaxing" },
    Item { id: "gad7_q5", text: "Being so restless that it is hard to sit still" },
    Item { id: "gad7_q6", text: "Becoming easily annoyed or irritable" },
    Item { id: "gad7_q7", text: "Feeling afraid as if something awful might happen" },
];

static BANDS: [ScoreBand; 4] = [
    ScoreBand { min: 0, max: 4, label: "minimal" },
    ScoreBand { min: 5, max: 9, label: "mild" },
    ScoreBand { min: 10, max: 14, label: "moderate" },
    ScoreBand { min: 15, max: 21, label: "severe" },
];

impl Instrument for Gad7 {
    fn id(&self) -> &'static str {
        "gad7"
    }

    fn name(&self) -> &'static str {
        "GAD-7"
    }

    fn kind(&self) -> FormKind {
        FormKind::AnxietyInventory
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
