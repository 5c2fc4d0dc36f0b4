use intake_core::ids::FormKind;

use crate::Instrument;
use crate::scoring::{Item, ItemScale, ScoreBand};

/// PC-PTSD-5: Primary Care PTSD Screen. Five yes/no items about the past
/// month; four or more "yes" answers screen positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PcPtsd5;

static ITEMS: [Item; 5] = [
    Item {
        id: "pc_ptsd5_q1",
        text: "Had nightmares about the event(s) or thought about the event(s) when you did not want to",
    },
    Item {
        id: "pc_ptsd5_q2",
        text: "Tried hard not to think about the event(s) or went out of your way to avoid situations that reminded you of the event(s)",
    },
    Item { id: "pc_ptsd5_q3", text: "Been constantly on guard, watchful, or easily startled" },
    Item {
        id: "pc_ptsd5_q4",
        text: "Felt numb or detached from people, activities, or your surroundings",
    },
    Item {
        id: "pc_ptsd5_q5",
        text: "Felt guilty or unable to stop blaming yourself or others for the event(s) or any problems the event(s) may have caused",
    },
];

static BANDS: [ScoreBand; 2] = [
    ScoreBand { min: 0, max: 3, label: "negative" },
    ScoreBand { min: 4, max: 5, label: "positive" },
];

impl Instrument for PcPtsd5 {
    fn id(&self) -> &'static str {
        "pc_ptsd5"
    }

    fn name(&self) -> &'static str {
        "PC-PTSD-5"
    }

    fn kind(&self) -> FormKind {
        FormKind::TraumaScreen
    }

    fn scale(&self) -> ItemScale {
        ItemScale::YesNo
    }

    fn items(&self) -> &'static [Item] {
        &ITEMS
    }

    fn bands(&self) -> &'static [ScoreBand] {
        &BANDS
    }
}
