//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use reviews::{
    DomainError, NewReview, Rating, Review, ReviewFilter, ReviewPatch, ReviewRepository,
};

/// PostgreSQL implementation of ReviewRepository
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: String,
    user_id: String,
    product_id: i64,
    rating: i32,
    comment: Option<String>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = DomainError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = Rating::new(i64::from(row.rating)).map_err(|e| {
            DomainError::Repository(format!("Corrupt rating on review {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            rating,
            comment: row.comment,
        })
    }
}

/// Unique violations become `Conflict`; everything else is a generic failure
fn map_sqlx_error(e: sqlx::Error) -> DomainError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DomainError::Conflict(db.message().to_string())
        }
        _ => DomainError::Repository(e.to_string()),
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, review: NewReview) -> Result<Review, DomainError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (id, user_id, product_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, product_id, rating, comment
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&review.user_id)
        .bind(review.product_id)
        .bind(i32::from(review.rating.value()))
        .bind(&review.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Review::try_from(row)
    }

    async fn find_all(&self) -> Result<Vec<Review>, DomainError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT id, user_id, product_id, rating, comment FROM reviews ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(Review::try_from).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, DomainError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            "SELECT id, user_id, product_id, rating, comment FROM reviews WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Review::try_from).transpose()
    }

    async fn find_first(&self, filter: ReviewFilter) -> Result<Option<Review>, DomainError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, user_id, product_id, rating, comment FROM reviews
            WHERE ($1::BIGINT IS NULL OR product_id = $1)
              AND ($2::TEXT IS NULL OR user_id = $2)
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .bind(filter.product_id)
        .bind(filter.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Review::try_from).transpose()
    }

    async fn update(&self, id: &str, patch: ReviewPatch) -> Result<Review, DomainError> {
        let comment_given = patch.comment.is_some();
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            UPDATE reviews
            SET product_id = COALESCE($2, product_id),
                rating = COALESCE($3, rating),
                comment = CASE WHEN $5 THEN $4 ELSE comment END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, product_id, rating, comment
            "#,
        )
        .bind(id)
        .bind(patch.product_id)
        .bind(patch.rating.map(|r| i32::from(r.value())))
        .bind(patch.comment.flatten())
        .bind(comment_given)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| DomainError::not_found("Review", id))?;

        Review::try_from(row)
    }

    async fn delete(&self, id: &str) -> Result<Review, DomainError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            "DELETE FROM reviews WHERE id = $1 RETURNING id, user_id, product_id, rating, comment",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| DomainError::not_found("Review", id))?;

        Review::try_from(row)
    }
}
