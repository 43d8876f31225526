//! Object-RPC wire envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sebo_core::DomainError;

/// `{requestId, objectReference, methodId, arguments: {args, kwargs}}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    /// Echoed back untouched; never used for dispatch.
    #[serde(default)]
    pub request_id: Option<Value>,
    pub object_reference: String,
    pub method_id: String,
    #[serde(default)]
    pub arguments: Arguments,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

/// Reply envelope. `result` and `error` are always present, one of them null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeReply {
    pub request_id: Option<Value>,
    pub is_exception: bool,
    pub result: Value,
    pub error: Option<String>,
}

impl InvokeReply {
    pub fn ok(request_id: Option<Value>, result: Value) -> Self {
        Self {
            request_id,
            is_exception: false,
            result,
            error: None,
        }
    }

    pub fn exception(request_id: Option<Value>, err: &DomainError) -> Self {
        Self {
            request_id,
            is_exception: true,
            result: Value::Null,
            error: Some(err.message().to_string()),
        }
    }
}
