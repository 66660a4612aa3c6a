//! The seam between the backends and whatever carries the bytes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::model::RpcError;

/// Moves one request to the remote service and hands back the decoded body.
///
/// `monerod` exposes two kinds of calls: JSON-RPC methods behind `/json_rpc`
/// and plain JSON endpoints such as `/get_transactions`. Implementations
/// must report connection problems as [`RpcError::Network`] and the remote's
/// own error objects as [`RpcError::Rpc`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Calls a JSON-RPC method and returns its `result` member.
    async fn json_rpc(&self, method: &str, params: Value) -> Result<Value, RpcError>;

    /// Posts `body` to a plain JSON endpoint and returns the whole response.
    async fn endpoint(&self, path: &str, body: Value) -> Result<Value, RpcError>;
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: &'static str,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: "0",
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    /// Splits the envelope into the result or the remote error.
    pub fn into_result(self) -> Result<Value, RpcError> {
        if let Some(error) = self.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result
            .ok_or_else(|| RpcError::Malformed("missing result in JSON-RPC response".to_string()))
    }
}

/// Where and how to reach one RPC server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl TransportConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// `http://host:port/`
    pub fn base_url(&self) -> Result<Url, RpcError> {
        Url::parse(&format!("http://{}:{}/", self.host, self.port))
            .map_err(|e| RpcError::Network(format!("Invalid RPC address {}:{}: {}", self.host, self.port, e)))
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 18081,
            user: String::new(),
            password: String::new(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_carries_method_and_params() {
        let request = JsonRpcRequest::new("get_block", json!({ "height": 1 }));
        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(
            encoded,
            json!({ "jsonrpc": "2.0", "id": "0", "method": "get_block", "params": { "height": 1 } })
        );
    }

    #[test]
    fn error_object_becomes_rpc_error() {
        let response: JsonRpcResponse = serde_json::from_value(json!({
            "id": "0",
            "jsonrpc": "2.0",
            "error": { "code": -5, "message": "Internal error: can't get block by hash." }
        }))
        .unwrap();
        assert!(matches!(response.into_result(), Err(RpcError::Rpc { code: -5, .. })));
    }

    #[test]
    fn base_url_uses_host_and_port() {
        let config = TransportConfig::new("node.local", 38081);
        assert_eq!(config.base_url().unwrap().as_str(), "http://node.local:38081/");
    }
}
