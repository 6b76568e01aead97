use serde::{Deserialize, Serialize};

/// Visual weight of a card relative to the active one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Active,
    Adjacent,
    Near,
    Far,
}

impl Emphasis {
    #[inline]
    pub fn for_distance(distance: usize) -> Self {
        match distance {
            0 => Self::Active,
            1 => Self::Adjacent,
            2 => Self::Near,
            _ => Self::Far,
        }
    }
}
