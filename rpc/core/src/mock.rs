//! In-memory transport for tests and examples.
//!
//! Responses are queued per method (JSON-RPC) or path (plain endpoint). Each
//! call takes the next queued response; the last one stays and is repeated.
//! Every call is recorded so tests can assert on what went over the wire.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::model::RpcError;
use crate::transport::Transport;

/// A call seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// JSON-RPC method name or endpoint path
    pub name: String,
    pub params: Value,
}

#[derive(Default)]
struct MockState {
    responses: HashMap<String, VecDeque<Result<Value, RpcError>>>,
    calls: Vec<RecordedCall>,
}

#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the `result` of a JSON-RPC method.
    pub fn on_json_rpc(&self, method: &str, result: Value) -> &Self {
        self.push(method, Ok(result))
    }

    /// Queues the body returned by a plain endpoint.
    pub fn on_endpoint(&self, path: &str, body: Value) -> &Self {
        self.push(path, Ok(body))
    }

    /// Queues an error for a method or path.
    pub fn fail(&self, name: &str, error: RpcError) -> &Self {
        self.push(name, Err(error))
    }

    /// All calls in the order they were made
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.lock().calls.iter().filter(|call| call.name == name).count()
    }

    pub fn total_calls(&self) -> usize {
        self.lock().calls.len()
    }

    fn push(&self, name: &str, response: Result<Value, RpcError>) -> &Self {
        self.lock()
            .responses
            .entry(name.to_string())
            .or_default()
            .push_back(response);
        self
    }

    fn respond(&self, name: &str, params: Value) -> Result<Value, RpcError> {
        let mut state = self.lock();
        state.calls.push(RecordedCall {
            name: name.to_string(),
            params,
        });
        let queue = state
            .responses
            .get_mut(name)
            .ok_or_else(|| RpcError::Network(format!("no mock response for {}", name)))?;
        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.unwrap_or_else(|| Err(RpcError::Network(format!("no mock response for {}", name))))
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the recorded calls from others.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn json_rpc(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.respond(method, params)
    }

    async fn endpoint(&self, path: &str, body: Value) -> Result<Value, RpcError> {
        self.respond(path, body)
    }
}
