use serde::{Deserialize, Serialize};

/// A star rating between [`Rating::MIN`] and [`Rating::MAX`] inclusive.
///
/// The only way to obtain one is `TryFrom<i32>`, so every `Rating` in the system is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Rating must be an integer between 1 and 5, got {0}")]
pub struct RatingOutOfRange(pub i32);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(RatingOutOfRange(value))
        }
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        i32::from(rating.0)
    }
}

/// The stored aggregate of a resource's reviews.
///
/// Only the exact integer sum and count are kept; the mean is derived on demand so it can
/// never drift from the log it summarizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingAggregate {
    pub count: u64,
    pub sum: u64,
}

impl RatingAggregate {
    pub fn new(count: u64, sum: u64) -> Self {
        Self { count, sum }
    }

    /// The aggregate after one more review with `rating`.
    pub fn with(self, rating: Rating) -> Self {
        Self {
            count: self.count + 1,
            sum: self.sum + u64::from(rating.value()),
        }
    }

    /// Mean rating, or 0 when there are no reviews.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }

    /// True if `next` is this aggregate plus exactly one valid rating.
    pub fn is_followed_by(&self, next: &RatingAggregate) -> bool {
        let added = next.sum.checked_sub(self.sum);
        next.count == self.count + 1
            && added.is_some_and(|r| (Rating::MIN as u64..=Rating::MAX as u64).contains(&r))
    }
}
