use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by both clients.
///
/// `Api` and `Exception` carry the server's human-readable message, so callers
/// can print it without caring which façade produced it.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// RPC reply with `isException: true`.
    #[error("{0}")]
    Exception(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status, when the server answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Pull the message out of `{"error": ..}`, `{"detail": ..}` or
/// `{"detail": {"error": ..}}`.
pub fn extract_message(body: &Value) -> Option<String> {
    if let Some(msg) = body.get("error").and_then(Value::as_str) {
        return Some(msg.to_string());
    }
    match body.get("detail")? {
        Value::String(msg) => Some(msg.clone()),
        nested => nested
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

/// Read a response body, mapping non-2xx statuses to [`ClientError::Api`].
pub(crate) async fn read_body(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| extract_message(&v))
            .unwrap_or_else(|| format!("HTTP {status}: {body}"));
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(body)
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

pub(crate) fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_message_from_every_error_shape() {
        assert_eq!(
            extract_message(&json!({"error": "Produto X não encontrado."})).as_deref(),
            Some("Produto X não encontrado.")
        );
        assert_eq!(
            extract_message(&json!({"detail": "Not Found"})).as_deref(),
            Some("Not Found")
        );
        assert_eq!(
            extract_message(&json!({"detail": {"error": "Envelope inválido"}})).as_deref(),
            Some("Envelope inválido")
        );
        assert_eq!(extract_message(&json!({"detail": 3})), None);
        assert_eq!(extract_message(&json!({})), None);
    }
}
