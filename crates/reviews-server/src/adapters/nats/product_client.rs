//! NATS implementation of ProductExistenceChecker

use async_nats::Client;
use async_trait::async_trait;
use serde_json::json;

use reviews::{DomainError, Product, ProductExistenceChecker, RpcError};

use super::packet::{is_truthy, pattern_subject, RequestPacket, ResponsePacket};

pub const GET_ONE_PRODUCT: &str = "get_one_product";

/// Asks the product service for a product over NATS request/reply.
///
/// The request timeout is the one configured on the client connection.
pub struct NatsProductClient {
    client: Client,
    subject: String,
}

impl NatsProductClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            subject: pattern_subject(GET_ONE_PRODUCT),
        }
    }
}

#[async_trait]
impl ProductExistenceChecker for NatsProductClient {
    async fn exists(&self, product_id: i64) -> Result<Option<Product>, DomainError> {
        let packet = RequestPacket::new(GET_ONE_PRODUCT, json!({ "id": product_id }));
        let body = serde_json::to_vec(&packet).map_err(|e| {
            DomainError::ExternalService(format!("Failed to encode product request: {e}"))
        })?;

        let message = self
            .client
            .request(self.subject.clone(), body.into())
            .await
            .map_err(|e| DomainError::ExternalService(format!("Product service request failed: {e}")))?;

        parse_product_reply(product_id, &message.payload)
    }
}

/// Interpret a `get_one_product` reply.
///
/// A normalized `err` becomes `DomainError::Rpc` so the workflow passes it on
/// untouched; a falsy `response` means the product does not exist.
fn parse_product_reply(product_id: i64, payload: &[u8]) -> Result<Option<Product>, DomainError> {
    let reply: ResponsePacket = serde_json::from_slice(payload).map_err(|e| {
        DomainError::ExternalService(format!("Malformed product service reply: {e}"))
    })?;

    if let Some(err) = reply.err {
        return Err(match RpcError::from_value(&err) {
            Some(e) => DomainError::Rpc(e),
            None => DomainError::ExternalService(format!("Product service error: {err}")),
        });
    }

    Ok(reply
        .response
        .filter(is_truthy)
        .map(|body| Product::new(product_id, body)))
}
