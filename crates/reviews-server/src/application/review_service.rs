//! Review Application Service (Use Case)
//!
//! Orchestrates the review workflow: the remote product check, the
//! one-review-per-user-and-product rule, and the mapping of every failure
//! into an [`RpcError`].

use std::sync::Arc;

use reviews::{
    DomainError, NewReview, Product, ProductExistenceChecker, Review, ReviewFilter, ReviewPatch,
    ReviewRepository, RpcError,
};

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const PRODUCT_CHECK_FAILED: &str = "Error checking product existence";
pub const ALREADY_REVIEWED: &str = "User has already reviewed this product";
pub const CREATE_FAILED: &str = "Failed to create review";
pub const FETCH_ALL_FAILED: &str = "Failed to fetch reviews";
pub const INVALID_ID: &str = "Invalid Review ID format";

fn review_not_found(id: &str) -> RpcError {
    RpcError::not_found(format!("Review with id {id} not found"))
}

fn validate_id(id: &str) -> Result<&str, RpcError> {
    if id.is_empty() {
        return Err(RpcError::bad_input(INVALID_ID));
    }
    Ok(id)
}

/// Application service for Review operations
pub struct ReviewService<R: ReviewRepository, P: ProductExistenceChecker> {
    repo: Arc<R>,
    products: Arc<P>,
}

impl<R: ReviewRepository, P: ProductExistenceChecker> ReviewService<R, P> {
    pub fn new(repo: Arc<R>, products: Arc<P>) -> Self {
        Self { repo, products }
    }

    /// Ask the product service whether `product_id` exists
    async fn ensure_product_exists(&self, product_id: i64) -> Result<Product, RpcError> {
        tracing::info!("Checking if product {} exists", product_id);

        match self.products.exists(product_id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => {
                tracing::warn!("Product {} not found", product_id);
                Err(RpcError::not_found(PRODUCT_NOT_FOUND))
            }
            Err(e) => {
                tracing::error!("Error communicating with product service: {}", e);
                Err(e.normalize(PRODUCT_CHECK_FAILED))
            }
        }
    }

    /// Create a review.
    ///
    /// The product check runs first, then the uniqueness lookup, then the
    /// insert. Nothing is written unless both checks pass.
    pub async fn create(&self, input: NewReview) -> Result<Review, RpcError> {
        self.ensure_product_exists(input.product_id).await?;

        // Only the first review for the product is compared; the store's
        // unique constraint covers the rest.
        let existing = self
            .repo
            .find_first(ReviewFilter::by_product(input.product_id))
            .await
            .map_err(|e| {
                tracing::error!(
                    "Error looking up reviews for product {}: {}",
                    input.product_id,
                    e
                );
                e.normalize(CREATE_FAILED)
            })?;

        if existing.is_some_and(|review| review.user_id == input.user_id) {
            tracing::warn!(
                "User {} has already reviewed product {}",
                input.user_id,
                input.product_id
            );
            return Err(RpcError::bad_input(ALREADY_REVIEWED));
        }

        let review = self.repo.create(input).await.map_err(|e| match e {
            DomainError::Conflict(reason) => {
                tracing::warn!("Duplicate review rejected by store: {}", reason);
                RpcError::bad_input(ALREADY_REVIEWED)
            }
            e => {
                tracing::error!("Error creating review: {}", e);
                e.normalize(CREATE_FAILED)
            }
        })?;

        tracing::info!(
            "Created Review: {} (user {}, product {})",
            review.id,
            review.user_id,
            review.product_id
        );

        Ok(review)
    }

    /// Get all Reviews
    pub async fn find_all(&self) -> Result<Vec<Review>, RpcError> {
        self.repo.find_all().await.map_err(|e| {
            tracing::error!("Error fetching all reviews: {}", e);
            e.normalize(FETCH_ALL_FAILED)
        })
    }

    /// Get a Review by ID
    pub async fn find_one(&self, id: &str) -> Result<Review, RpcError> {
        let id = validate_id(id)?;

        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| {
                tracing::error!("Error fetching review with id {}: {}", id, e);
                e.normalize(format!("Failed to fetch review with id {id}"))
            })?
            .ok_or_else(|| review_not_found(id))
    }

    /// Apply a partial update. Product existence is not re-checked.
    pub async fn update(&self, id: &str, patch: ReviewPatch) -> Result<Review, RpcError> {
        let id = validate_id(id)?;

        let review = self.repo.update(id, patch).await.map_err(|e| match e {
            DomainError::NotFound { .. } => review_not_found(id),
            e => {
                tracing::error!("Error updating review with id {}: {}", id, e);
                e.normalize(format!("Failed to update review with id {id}"))
            }
        })?;

        tracing::info!("Updated Review: {}", review.id);
        Ok(review)
    }

    /// Delete a Review, returning the deleted snapshot
    pub async fn remove(&self, id: &str) -> Result<Review, RpcError> {
        let id = validate_id(id)?;

        let review = self.repo.delete(id).await.map_err(|e| match e {
            DomainError::NotFound { .. } => review_not_found(id),
            e => {
                tracing::error!("Error deleting review with id {}: {}", id, e);
                e.normalize(format!("Failed to delete review with id {id}"))
            }
        })?;

        tracing::info!("Deleted Review: {}", review.id);
        Ok(review)
    }
}
