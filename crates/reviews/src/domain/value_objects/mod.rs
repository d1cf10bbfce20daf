//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod rating;

pub use rating::*;
