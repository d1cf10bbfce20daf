//! In-memory implementation of ReviewRepository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use reviews::{DomainError, NewReview, Review, ReviewFilter, ReviewPatch, ReviewRepository};

/// A thread-safe in-memory review store.
///
/// Keeps insertion order so `find_first` returns the oldest match, and
/// enforces the same `(user_id, product_id)` uniqueness as the Postgres schema.
/// Used by tests and by local runs without `DATABASE_URL`.
#[derive(Default, Clone)]
pub struct InMemoryReviewRepository {
    reviews: Arc<RwLock<Vec<Review>>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflict(user_id: &str, product_id: i64) -> DomainError {
    DomainError::Conflict(format!(
        "review for user {user_id} and product {product_id} already exists"
    ))
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn create(&self, review: NewReview) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;

        if reviews
            .iter()
            .any(|r| r.user_id == review.user_id && r.product_id == review.product_id)
        {
            return Err(conflict(&review.user_id, review.product_id));
        }

        let review = review.with_id(Uuid::new_v4().to_string());
        reviews.push(review.clone());
        Ok(review)
    }

    async fn find_all(&self) -> Result<Vec<Review>, DomainError> {
        Ok(self.reviews.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        Ok(reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn find_first(&self, filter: ReviewFilter) -> Result<Option<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        Ok(reviews.iter().find(|r| filter.matches(r)).cloned())
    }

    async fn update(&self, id: &str, patch: ReviewPatch) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;

        let index = reviews
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| DomainError::not_found("Review", id))?;
        let updated = patch.apply(reviews[index].clone());

        if reviews.iter().any(|r| {
            r.id != updated.id && r.user_id == updated.user_id && r.product_id == updated.product_id
        }) {
            return Err(conflict(&updated.user_id, updated.product_id));
        }

        reviews[index] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;

        let index = reviews
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| DomainError::not_found("Review", id))?;
        Ok(reviews.remove(index))
    }
}
