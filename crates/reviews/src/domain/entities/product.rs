//! Product - A product owned by the remote product service

use serde::{Deserialize, Serialize};

/// Product as returned by the product service.
///
/// Only existence matters to this service, so the body is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub body: serde_json::Value,
}

impl Product {
    pub fn new(id: i64, body: serde_json::Value) -> Self {
        Self { id, body }
    }
}
