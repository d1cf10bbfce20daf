//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Review: a user's rating of a product
//! - Product: reference to a product owned by another service

mod product;
mod review;

pub use product::*;
pub use review::*;
