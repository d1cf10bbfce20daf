//! Review Repository Port
//!
//! Abstract interface for Review persistence operations.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, NewReview, Review, ReviewPatch};

/// Filter for `find_first` lookups. Unset fields match anything.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReviewFilter {
    pub product_id: Option<i64>,
    pub user_id: Option<String>,
}

impl ReviewFilter {
    pub fn by_product(product_id: i64) -> Self {
        Self {
            product_id: Some(product_id),
            user_id: None,
        }
    }

    pub fn matches(&self, review: &Review) -> bool {
        self.product_id.map_or(true, |id| review.product_id == id)
            && self.user_id.as_deref().map_or(true, |id| review.user_id == id)
    }
}

/// Repository interface for Review entities
///
/// Outcomes the workflow distinguishes:
/// - `DomainError::NotFound` from `update` / `delete` when the id is unknown
/// - `DomainError::Conflict` when `(user_id, product_id)` is already taken
/// - `DomainError::Repository` for every other failure
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a review, assigning its id
    async fn create(&self, review: NewReview) -> Result<Review, DomainError>;

    /// Find all reviews
    async fn find_all(&self) -> Result<Vec<Review>, DomainError>;

    /// Find a review by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, DomainError>;

    /// Find the oldest review matching the filter
    async fn find_first(&self, filter: ReviewFilter) -> Result<Option<Review>, DomainError>;

    /// Apply a partial update and return the stored result
    async fn update(&self, id: &str, patch: ReviewPatch) -> Result<Review, DomainError>;

    /// Delete a review and return the removed snapshot
    async fn delete(&self, id: &str) -> Result<Review, DomainError>;
}
