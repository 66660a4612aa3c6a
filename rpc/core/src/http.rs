//! HTTP transport built on reqwest.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use digest_auth::AuthContext;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::model::RpcError;
use crate::transport::{JsonRpcRequest, JsonRpcResponse, Transport, TransportConfig};

/// Talks to `monerod` or `monero-wallet-rpc` over plain HTTP.
///
/// Credentials, when configured, answer the server's HTTP digest challenge,
/// which is how `--rpc-login` protected servers authenticate.
pub struct HttpTransport {
    base_url: Url,
    client: reqwest::Client,
    credentials: Option<(String, String)>,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RpcError::Network(format!("Failed to build HTTP client: {}", e)))?;
        let credentials = if config.user.is_empty() {
            None
        } else {
            Some((config.user.clone(), config.password.clone()))
        };
        Ok(Self {
            base_url: config.base_url()?,
            client,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post<T: serde::Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value, RpcError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| RpcError::Network(format!("Invalid RPC path {}: {}", path, e)))?;
        let payload = serde_json::to_vec(body)?;

        let started = Instant::now();
        let mut response = self.send(&url, &payload, None).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            if let Some((user, password)) = &self.credentials {
                let challenges: Vec<&str> = response
                    .headers()
                    .get_all(WWW_AUTHENTICATE)
                    .iter()
                    .filter_map(|value| value.to_str().ok())
                    .collect();
                let authorization = digest_authorization(&challenges, user, password, url.path(), &payload)?;
                debug!(path, "answering digest challenge");
                response = self.send(&url, &payload, Some(authorization)).await?;
            }
        }

        let response = response
            .error_for_status()
            .map_err(|e| RpcError::Network(format!("Request to {} failed: {}", path, e)))?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| RpcError::Network(format!("Undecodable response from {}: {}", path, e)))?;

        debug!(path, elapsed_ms = started.elapsed().as_millis() as u64, "RPC call completed");
        trace!(path, %body, "RPC response body");
        Ok(body)
    }

    async fn send(&self, url: &Url, payload: &[u8], authorization: Option<String>) -> Result<reqwest::Response, RpcError> {
        let mut request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_vec());
        if let Some(authorization) = authorization {
            request = request.header(AUTHORIZATION, authorization);
        }
        request
            .send()
            .await
            .map_err(|e| RpcError::Network(format!("Request to {} failed: {}", url.path(), e)))
    }
}

/// `Authorization` value answering the first digest challenge we can parse.
fn digest_authorization(
    challenges: &[&str],
    user: &str,
    password: &str,
    uri: &str,
    payload: &[u8],
) -> Result<String, RpcError> {
    let mut prompt = challenges
        .iter()
        .find_map(|challenge| digest_auth::parse(challenge).ok())
        .ok_or_else(|| RpcError::Network("server requires authentication without a digest challenge".to_string()))?;
    let context = AuthContext::new_post(user, password, uri, Some(payload));
    let answer = prompt
        .respond(&context)
        .map_err(|e| RpcError::Network(format!("Cannot answer digest challenge: {}", e)))?;
    Ok(answer.to_header_string())
}

#[async_trait]
impl Transport for HttpTransport {
    async fn json_rpc(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        debug!(method, "JSON-RPC request");
        let request = JsonRpcRequest::new(method, params);
        let body = self.post("json_rpc", &request).await?;
        let response: JsonRpcResponse = serde_json::from_value(body)?;
        response.into_result()
    }

    async fn endpoint(&self, path: &str, body: Value) -> Result<Value, RpcError> {
        debug!(path, "endpoint request");
        self.post(path, &body).await
    }
}
