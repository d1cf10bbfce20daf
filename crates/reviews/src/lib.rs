//! Reviews Domain Library
//!
//! Core domain types and interfaces for the reviews microservice.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Review, Product)
//!   - `value_objects/`: Immutable value types (Rating)
//!   - `errors/`: Port failures and the normalized `{status, message}` error
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use reviews::domain::{Review, Rating, RpcError};
//! use reviews::ports::{ReviewRepository, ProductExistenceChecker};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    DomainError, ErrorKind, NewReview, Product, Rating, Review, ReviewPatch, RpcError,
};
pub use ports::{ProductExistenceChecker, ReviewFilter, ReviewRepository};

#[cfg(feature = "mocks")]
pub use ports::{MockProductExistenceChecker, MockReviewRepository};
