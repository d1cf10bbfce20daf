//! Message Payload Models
//!
//! Shape-validated payloads for the review message patterns.

mod review;

pub use review::*;
