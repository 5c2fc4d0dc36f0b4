/// How a single item is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemScale {
    /// Frequency rating from 0 up to `max`.
    Likert { max: u8 },
    /// Coded 1 for yes, 0 for no.
    YesNo,
}

impl ItemScale {
    pub fn max(self) -> u8 {
        match self {
            ItemScale::Likert { max } => max,
            ItemScale::YesNo => 1,
        }
    }

    pub fn contains(self, value: i64) -> bool {
        (0..=i64::from(self.max())).contains(&value)
    }
}

/// One question of an instrument. `id` doubles as the storage and CSV column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub id: &'static str,
    pub text: &'static str,
}

/// An interpretation band over total scores, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBand {
    pub min: u32,
    pub max: u32,
    pub label: &'static str,
}

impl ScoreBand {
    pub fn contains(&self, total: u32) -> bool {
        total >= self.min && total <= self.max
    }
}
