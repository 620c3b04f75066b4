#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use eventline_client::{Decoded, Reply, RequestError, Transport, Verb};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub verb: Verb,
    pub path: String,
    pub body: Option<String>,
}

impl Call {
    pub fn json_body(&self) -> JsonValue {
        serde_json::from_str(self.body.as_deref().unwrap_or("null")).unwrap()
    }
}

/// Records every call and answers from a queue of canned results.
#[derive(Default)]
pub struct FakeTransport {
    calls: Mutex<Vec<Call>>,
    replies: Mutex<VecDeque<Result<Reply, RequestError>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(reply: Result<Decoded, RequestError>) -> Self {
        let t = Self::new();
        t.push(reply);
        t
    }

    pub fn json(value: JsonValue) -> Self {
        Self::replying(Ok(Decoded::Json(value)))
    }

    /// Queues a reply; successes are answered with status 200.
    pub fn push(&self, reply: Result<Decoded, RequestError>) {
        self.push_reply(reply.map(|body| Reply::new(200, body)));
    }

    pub fn push_reply(&self, reply: Result<Reply, RequestError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn only_call(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn call(&self, verb: Verb, path: &str, body: Option<String>) -> Result<Reply, RequestError> {
        self.calls.lock().unwrap().push(Call {
            verb,
            path: path.to_string(),
            body,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Reply::new(200, Decoded::Json(serde_json::json!({})))))
    }
}
