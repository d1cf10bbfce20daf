//! Rating - Star rating of a review

use serde::{Deserialize, Serialize};

/// Star rating, always within `Rating::MIN..=Rating::MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, String> {
        if value < i64::from(Self::MIN) {
            return Err(format!("rating must not be less than {}", Self::MIN));
        }
        if value > i64::from(Self::MAX) {
            return Err(format!("rating must not be greater than {}", Self::MAX));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        i64::from(rating.0)
    }
}
