//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod memory;
pub mod nats;
pub mod postgres;

// Re-exports
pub use memory::InMemoryReviewRepository;
pub use nats::NatsProductClient;
pub use postgres::PgReviewRepository;
