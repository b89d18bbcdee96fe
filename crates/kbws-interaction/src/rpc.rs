//! JSON-RPC 1.1 envelopes used by KBase services.

use kbws_core::{KbwsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const RPC_VERSION: &str = "1.1";
const DEFAULT_ERROR_NAME: &str = "JSONRPCError";

#[derive(Debug, Serialize)]
pub struct RpcRequest {
    version: &'static str,
    method: String,
    params: Vec<Value>,
    id: String,
}

impl RpcRequest {
    /// Builds a call to `<service>.<method>` with a single positional argument.
    pub fn new(service: &str, method: &str, param: Value) -> Self {
        Self {
            version: RPC_VERSION,
            method: format!("{service}.{method}"),
            params: vec![param],
            id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default = "default_error_name")]
    name: String,
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    /// Server traceback; usually a string but not guaranteed
    #[serde(default)]
    error: Option<Value>,
}

fn default_error_name() -> String {
    DEFAULT_ERROR_NAME.to_string()
}

impl RpcResponse {
    /// Unwraps the first returned value or the service's error.
    ///
    /// KBase methods return their outputs as a list; single-output methods
    /// yield a one-element list.
    pub fn into_result(self) -> Result<Value> {
        if let Some(err) = self.error {
            let detail = err.error.map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            });
            return Err(KbwsError::remote(err.name, err.code, err.message, detail));
        }

        match self.result {
            Some(Value::Array(mut outputs)) => {
                if outputs.is_empty() {
                    Ok(Value::Null)
                } else {
                    Ok(outputs.swap_remove(0))
                }
            }
            Some(other) => Ok(other),
            None => Err(KbwsError::serialization(
                "JSON-RPC",
                "response carried neither a result nor an error",
            )),
        }
    }
}

/// Interprets an HTTP response body from a KBase service.
///
/// A JSON-RPC error body wins over the HTTP status, since KBase services
/// report method failures as 500 responses with an error envelope.
pub fn decode_response(status: u16, body: &str) -> Result<Value> {
    let is_success = (200..300).contains(&status);
    match serde_json::from_str::<RpcResponse>(body) {
        Ok(response) if is_success || response.error.is_some() => response.into_result(),
        Err(e) if is_success => Err(KbwsError::serialization("JSON-RPC", e.to_string())),
        _ => Err(KbwsError::transport(format!(
            "HTTP {}: {}",
            status,
            truncate(body, 512)
        ))),
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
