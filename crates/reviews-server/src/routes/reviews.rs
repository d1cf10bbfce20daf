//! Review Handlers
//!
//! Validate payload shape, then delegate to ReviewService. Payloads that fail
//! validation never reach the service.

use serde::Serialize;
use serde_json::Value;

use ::reviews::{ProductExistenceChecker, ReviewRepository, RpcError};

use crate::application::ReviewService;
use crate::models::{decode, decode_id, CreateReviewRequest, UpdateReviewRequest};

fn encode<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!("Failed to encode response: {}", e);
        RpcError::unexpected("Failed to encode response")
    })
}

/// createReview
pub async fn create_review<R, P>(service: &ReviewService<R, P>, data: Value) -> Result<Value, RpcError>
where
    R: ReviewRepository,
    P: ProductExistenceChecker,
{
    let input = decode::<CreateReviewRequest>(data)?.validate()?;
    let review = service.create(input).await?;
    encode(&review)
}

/// findAllReviews
pub async fn find_all_reviews<R, P>(service: &ReviewService<R, P>) -> Result<Value, RpcError>
where
    R: ReviewRepository,
    P: ProductExistenceChecker,
{
    let reviews = service.find_all().await?;
    encode(&reviews)
}

/// findOneReview
pub async fn find_one_review<R, P>(service: &ReviewService<R, P>, data: Value) -> Result<Value, RpcError>
where
    R: ReviewRepository,
    P: ProductExistenceChecker,
{
    let review = service.find_one(decode_id(&data)?).await?;
    encode(&review)
}

/// updateReview
pub async fn update_review<R, P>(service: &ReviewService<R, P>, data: Value) -> Result<Value, RpcError>
where
    R: ReviewRepository,
    P: ProductExistenceChecker,
{
    let (id, patch) = decode::<UpdateReviewRequest>(data)?.into_parts()?;
    let review = service.update(&id, patch).await?;
    encode(&review)
}

/// removeReview
pub async fn remove_review<R, P>(service: &ReviewService<R, P>, data: Value) -> Result<Value, RpcError>
where
    R: ReviewRepository,
    P: ProductExistenceChecker,
{
    let review = service.remove(decode_id(&data)?).await?;
    encode(&review)
}

#[cfg(test)]
mod tests {
    use crate::adapters::InMemoryReviewRepository;
    use crate::routes::dispatch;
    use crate::application::ReviewService;
    use ::reviews::{
        DomainError, MockProductExistenceChecker, MockReviewRepository, NewReview,
        Product, Rating, RpcError,
    };
    use serde_json::json;
    use std::sync::Arc;

    type TestService = ReviewService<MockReviewRepository, MockProductExistenceChecker>;

    /// Service whose ports fail the test if they are touched
    fn untouched() -> TestService {
        let mut repo = MockReviewRepository::new();
        repo.expect_create().never();
        repo.expect_find_first().never();
        repo.expect_find_by_id().never();
        repo.expect_update().never();
        repo.expect_delete().never();
        let mut products = MockProductExistenceChecker::new();
        products.expect_exists().never();
        ReviewService::new(Arc::new(repo), Arc::new(products))
    }

    #[tokio::test]
    async fn test_create_review_pattern() {
        let mut products = MockProductExistenceChecker::new();
        products
            .expect_exists()
            .returning(|id| Ok(Some(Product::new(id, json!({"id": id})))));
        let mut repo = MockReviewRepository::new();
        repo.expect_find_first().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|review: NewReview| Ok(review.with_id("r1".into())));
        let service = ReviewService::new(Arc::new(repo), Arc::new(products));

        let value = dispatch(
            &service,
            "createReview",
            json!({"user_id": "u1", "product_id": 42, "rating": 5}),
        )
        .await
        .unwrap();

        assert_eq!(
            value,
            json!({"id": "r1", "user_id": "u1", "product_id": 42, "rating": 5, "comment": null})
        );
    }

    #[tokio::test]
    async fn test_invalid_create_payloads_never_reach_workflow() {
        let service = untouched();
        let payloads = [
            json!({"user_id": "", "product_id": 42, "rating": 5}),
            json!({"user_id": "u1", "product_id": 42, "rating": 7}),
            json!({"user_id": "u1", "product_id": 42, "rating": 5, "extra": 1}),
            json!("not an object"),
        ];

        for payload in payloads {
            let err = dispatch(&service, "createReview", payload).await.unwrap_err();
            assert_eq!(err.status, 400);
        }
    }

    #[tokio::test]
    async fn test_invalid_update_payloads_never_reach_workflow() {
        let service = untouched();
        let payloads = [
            json!({"id": "r1", "rating": 9}),
            json!({"id": "r1", "rating": 0}),
            json!({"id": "r1", "product_id": "abc"}),
            json!({"id": "r1", "user_id": "u2"}),
        ];

        for payload in payloads {
            let err = dispatch(&service, "updateReview", payload.clone())
                .await
                .unwrap_err();
            assert_eq!(err.status, 400, "payload: {payload}");
        }
    }

    #[tokio::test]
    async fn test_update_with_null_comment_clears_it() {
        let mut products = MockProductExistenceChecker::new();
        products
            .expect_exists()
            .returning(|id| Ok(Some(Product::new(id, json!({"id": id})))));
        let service = ReviewService::new(
            Arc::new(InMemoryReviewRepository::new()),
            Arc::new(products),
        );

        let created = dispatch(
            &service,
            "createReview",
            json!({"user_id": "u1", "product_id": "42", "rating": 2, "comment": "bad"}),
        )
        .await
        .unwrap();
        let id = created["id"].clone();
        assert_eq!(created["product_id"], 42);

        let kept = dispatch(&service, "updateReview", json!({"id": id, "rating": 3}))
            .await
            .unwrap();
        assert_eq!(kept["comment"], "bad");

        let cleared = dispatch(&service, "updateReview", json!({"id": id, "comment": null}))
            .await
            .unwrap();
        assert_eq!(cleared["comment"], json!(null));
        assert_eq!(cleared["rating"], 3);

        let read = dispatch(&service, "findOneReview", id).await.unwrap();
        assert_eq!(read["comment"], json!(null));
    }

    #[tokio::test]
    async fn test_non_string_ids_are_rejected() {
        let service = untouched();
        let expected = RpcError::bad_input("Invalid Review ID format");

        for cmd in ["findOneReview", "removeReview"] {
            for payload in [json!(5), json!(null), json!({"id": "r1"})] {
                assert_eq!(
                    dispatch(&service, cmd, payload).await.unwrap_err(),
                    expected
                );
            }
            assert_eq!(dispatch(&service, cmd, json!("")).await.unwrap_err(), expected);
        }

        assert_eq!(
            dispatch(&service, "updateReview", json!({"id": 5, "rating": 3}))
                .await
                .unwrap_err(),
            expected
        );
    }

    #[tokio::test]
    async fn test_find_all_reviews_pattern() {
        let mut repo = MockReviewRepository::new();
        repo.expect_find_all().returning(|| {
            Ok(vec![
                NewReview::new("u1".into(), 1, Rating::new(1).unwrap(), None).with_id("a".into()),
            ])
        });
        let service = ReviewService::new(Arc::new(repo), Arc::new(MockProductExistenceChecker::new()));

        let value = dispatch(&service, "findAllReviews", json!(null)).await.unwrap();

        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["id"], "a");
    }

    #[tokio::test]
    async fn test_update_review_pattern_passes_patch() {
        let mut repo = MockReviewRepository::new();
        repo.expect_update().returning(|id, patch| {
            assert_eq!(patch.rating, Some(Rating::new(2).unwrap()));
            Ok(patch.apply(
                NewReview::new("u1".into(), 42, Rating::new(5).unwrap(), None).with_id(id.to_string()),
            ))
        });
        let service = ReviewService::new(Arc::new(repo), Arc::new(MockProductExistenceChecker::new()));

        let value = dispatch(&service, "updateReview", json!({"id": "r1", "rating": 2}))
            .await
            .unwrap();

        assert_eq!(value["id"], "r1");
        assert_eq!(value["rating"], 2);
    }

    #[tokio::test]
    async fn test_remove_review_pattern_missing_id() {
        let mut repo = MockReviewRepository::new();
        repo.expect_delete()
            .returning(|id| Err(DomainError::not_found("Review", id)));
        let service = ReviewService::new(Arc::new(repo), Arc::new(MockProductExistenceChecker::new()));

        let err = dispatch(&service, "removeReview", json!("r1")).await.unwrap_err();

        assert_eq!(err, RpcError::not_found("Review with id r1 not found"));
    }

    #[tokio::test]
    async fn test_unknown_pattern() {
        let err = dispatch(&untouched(), "get_one_product", json!({"id": 1}))
            .await
            .unwrap_err();
        assert_eq!(err.status, 404);
    }
}
