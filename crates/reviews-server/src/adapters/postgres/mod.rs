//! PostgreSQL Repository Implementations

mod review_repository;

pub use review_repository::PgReviewRepository;
