//! In-Memory Repository Implementations

mod review_repository;

pub use review_repository::InMemoryReviewRepository;
