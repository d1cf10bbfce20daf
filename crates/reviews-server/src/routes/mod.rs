//! Review Message Patterns
//!
//! - createReview - create a review after the product and uniqueness checks
//! - findAllReviews - list every review
//! - findOneReview - get a review by id
//! - updateReview - partially update a review
//! - removeReview - delete a review, returning the snapshot

pub mod reviews;

use serde_json::Value;

use ::reviews::{ProductExistenceChecker, ReviewRepository, RpcError};

use crate::application::ReviewService;

pub const CREATE_REVIEW: &str = "createReview";
pub const FIND_ALL_REVIEWS: &str = "findAllReviews";
pub const FIND_ONE_REVIEW: &str = "findOneReview";
pub const UPDATE_REVIEW: &str = "updateReview";
pub const REMOVE_REVIEW: &str = "removeReview";

/// Every pattern the service answers
pub const PATTERNS: [&str; 5] = [
    CREATE_REVIEW,
    FIND_ALL_REVIEWS,
    FIND_ONE_REVIEW,
    UPDATE_REVIEW,
    REMOVE_REVIEW,
];

/// Route a decoded request to its handler
pub async fn dispatch<R, P>(
    service: &ReviewService<R, P>,
    cmd: &str,
    data: Value,
) -> Result<Value, RpcError>
where
    R: ReviewRepository,
    P: ProductExistenceChecker,
{
    match cmd {
        CREATE_REVIEW => reviews::create_review(service, data).await,
        FIND_ALL_REVIEWS => reviews::find_all_reviews(service).await,
        FIND_ONE_REVIEW => reviews::find_one_review(service, data).await,
        UPDATE_REVIEW => reviews::update_review(service, data).await,
        REMOVE_REVIEW => reviews::remove_review(service, data).await,
        other => {
            tracing::warn!("No handler for pattern {:?}", other);
            Err(RpcError::not_found(format!(
                "There is no matching message handler defined for pattern {other:?}"
            )))
        }
    }
}
