//! A scripted in-process [`Transport`].
//!
//! Responses are registered per `"METHOD /path"`. One-shot replies are served
//! first, in the order they were queued; after that the fixed reply (if any)
//! answers every call. Unscripted routes get a 404. Every request is kept in a
//! journal so callers can assert on what was sent.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use scholaris_core::{ClientError, ClientResult};
use serde_json::{Value, json};

use super::transport::{ApiRequest, ApiResponse, Transport, route_key};

#[derive(Debug, Clone)]
struct Reply {
    outcome: ClientResult<ApiResponse>,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
struct Script {
    queued: VecDeque<Reply>,
    fixed: Option<Reply>,
}

#[derive(Debug, Default)]
struct MemoryState {
    routes: HashMap<String, Script>,
    journal: Vec<ApiRequest>,
}

#[derive(Debug, Default)]
pub struct MemoryTransport {
    state: Mutex<MemoryState>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn script(&self, method: Method, path: &str) -> ScriptBuilder<'_> {
        ScriptBuilder {
            transport: self,
            key: route_key(&method, path),
        }
    }

    /// Answers every call to the route with `status` and `body`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.script(method, path).fixed(Reply {
            outcome: Ok(ApiResponse::json(status, &body)),
            delay: None,
        });
    }

    /// Answers the next call to the route with `status` and `body`.
    pub fn enqueue(&self, method: Method, path: &str, status: u16, body: Value) {
        self.enqueue_delayed(method, path, status, body, Duration::ZERO);
    }

    /// Like [`enqueue`](Self::enqueue), but the reply arrives after `delay`.
    pub fn enqueue_delayed(
        &self,
        method: Method,
        path: &str,
        status: u16,
        body: Value,
        delay: Duration,
    ) {
        self.script(method, path).queue(Reply {
            outcome: Ok(ApiResponse::json(status, &body)),
            delay: (!delay.is_zero()).then_some(delay),
        });
    }

    /// Makes every call to the route fail before any response arrives.
    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.script(method, path).fixed(Reply {
            outcome: Err(ClientError::network(message)),
            delay: None,
        });
    }

    /// Drops the scripted replies of one route.
    pub fn forget(&self, method: Method, path: &str) {
        self.lock().routes.remove(&route_key(&method, path));
    }

    pub fn journal(&self) -> Vec<ApiRequest> {
        self.lock().journal.clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        let key = route_key(&method, path);
        self.lock()
            .journal
            .iter()
            .filter(|r| r.route_key() == key)
            .cloned()
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests_to(method, path).len()
    }

    /// Number of requests that were not reads.
    pub fn mutation_count(&self) -> usize {
        self.lock().journal.iter().filter(|r| r.is_mutation()).count()
    }

    pub fn clear_journal(&self) {
        self.lock().journal.clear();
    }
}

struct ScriptBuilder<'a> {
    transport: &'a MemoryTransport,
    key: String,
}

impl ScriptBuilder<'_> {
    fn fixed(self, reply: Reply) {
        self.transport
            .lock()
            .routes
            .entry(self.key)
            .or_default()
            .fixed = Some(reply);
    }

    fn queue(self, reply: Reply) {
        self.transport
            .lock()
            .routes
            .entry(self.key)
            .or_default()
            .queued
            .push_back(reply);
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let key = request.route_key();
        let reply = {
            let mut state = self.lock();
            state.journal.push(request);
            state.routes.get_mut(&key).and_then(|script| {
                script
                    .queued
                    .pop_front()
                    .or_else(|| script.fixed.clone())
            })
        };

        let Some(reply) = reply else {
            tracing::debug!(route = %key, "no scripted reply");
            return Ok(ApiResponse::json(
                404,
                &json!({ "error": format!("No route for {key}") }),
            ));
        };

        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        reply.outcome
    }
}
