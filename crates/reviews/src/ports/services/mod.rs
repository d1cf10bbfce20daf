//! Service Ports
//!
//! Abstract interfaces for external services.

mod product_existence;

pub use product_existence::*;
