//! Wire packets
//!
//! Request: `{"pattern": {"cmd": ..}, "data": .., "id": ".."}` published on the
//! subject `{"cmd":".."}`.
//! Reply: `{"id": "..", "response": .., "isDisposed": true}` or
//! `{"id": "..", "err": .., "isDisposed": true}`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use reviews::RpcError;

/// Subject a message pattern is published on
pub fn pattern_subject(cmd: &str) -> String {
    json!({ "cmd": cmd }).to_string()
}

/// JavaScript truthiness of a reply value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPacket {
    pub pattern: Value,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RequestPacket {
    pub fn new(cmd: &str, data: Value) -> Self {
        Self {
            pattern: json!({ "cmd": cmd }),
            data,
            id: Some(Uuid::new_v4().to_string()),
        }
    }

    /// Command name, from either `{"cmd": ".."}` or a bare string pattern
    pub fn cmd(&self) -> Option<&str> {
        match &self.pattern {
            Value::String(cmd) => Some(cmd.as_str()),
            pattern => pattern.get("cmd")?.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePacket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<Value>,
    #[serde(default)]
    pub is_disposed: bool,
}

impl ResponsePacket {
    /// Final reply for a request
    pub fn reply(id: Option<String>, result: Result<Value, RpcError>) -> Self {
        let (response, err) = match result {
            Ok(value) => (Some(value), None),
            Err(e) => (
                None,
                Some(json!({ "status": e.status, "message": e.message })),
            ),
        };

        Self {
            id,
            response,
            err,
            is_disposed: true,
        }
    }
}
