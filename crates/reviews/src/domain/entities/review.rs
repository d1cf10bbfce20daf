//! Review - A user's rating of a product
//!
//! Pure domain entity without infrastructure dependencies.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Rating;

/// Review - The persisted record linking a user, a product and a rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub product_id: i64,
    pub rating: Rating,
    pub comment: Option<String>,
}

/// A review that has passed validation but has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub user_id: String,
    pub product_id: i64,
    pub rating: Rating,
    pub comment: Option<String>,
}

impl NewReview {
    pub fn new(user_id: String, product_id: i64, rating: Rating, comment: Option<String>) -> Self {
        Self {
            user_id,
            product_id,
            rating,
            comment,
        }
    }

    /// Attach the identifier assigned by the store
    pub fn with_id(self, id: String) -> Review {
        Review {
            id,
            user_id: self.user_id,
            product_id: self.product_id,
            rating: self.rating,
            comment: self.comment,
        }
    }
}

/// Partial update of the mutable review fields.
///
/// `None` leaves the stored value unchanged. For `comment`, `Some(None)`
/// clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewPatch {
    pub product_id: Option<i64>,
    pub rating: Option<Rating>,
    pub comment: Option<Option<String>>,
}

impl ReviewPatch {
    /// Apply the patch on top of an existing review
    pub fn apply(self, current: Review) -> Review {
        Review {
            product_id: self.product_id.unwrap_or(current.product_id),
            rating: self.rating.unwrap_or(current.rating),
            comment: self.comment.unwrap_or(current.comment),
            ..current
        }
    }
}
