//! Product Existence Port
//!
//! Abstract interface for asking the product service whether a product exists.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Product};

/// Existence check against the remote product domain
///
/// Implementations send exactly one request per call and await exactly one
/// reply; they never retry.
///
/// # Example
///
/// ```rust,ignore
/// use reviews::ports::ProductExistenceChecker;
///
/// struct NatsProductClient { /* async_nats::Client */ }
///
/// #[async_trait]
/// impl ProductExistenceChecker for NatsProductClient {
///     async fn exists(&self, product_id: i64) -> Result<Option<Product>, DomainError> {
///         // request `get_one_product`, map a falsy reply to `None`
///     }
/// }
/// ```
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait ProductExistenceChecker: Send + Sync {
    /// Look up a product by ID
    ///
    /// # Returns
    /// - `Ok(Some(product))` if the product service knows the product
    /// - `Ok(None)` if it replied with an empty/falsy value
    /// - `Err(DomainError::Rpc(_))` if it replied with an already-normalized error
    /// - `Err(_)` for transport failures and malformed replies
    async fn exists(&self, product_id: i64) -> Result<Option<Product>, DomainError>;
}
