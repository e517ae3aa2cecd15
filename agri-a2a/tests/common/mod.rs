#![allow(dead_code)]

use agri_a2a::a2a::{A2aTransport, TransportError, card_url};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const MARKET: &str = "Market Intelligence Agent for Indian Agriculture";
pub const WEATHER: &str = "Weather Agent for Indian Farmers";
pub const SCHEMES: &str = "Agricultural Schemes Intelligence Agent";

/// In-memory transport with per-URL canned responses and call counters.
#[derive(Default)]
pub struct MockTransport {
    gets: HashMap<String, Result<Value, TransportError>>,
    posts: HashMap<String, Result<Value, TransportError>>,
    delays: HashMap<String, Duration>,
    pub get_calls: AtomicUsize,
    pub post_calls: AtomicUsize,
    pub last_post: Mutex<Option<Value>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a card for `name` at `base_url`.
    pub fn with_agent(mut self, name: &str, base_url: &str) -> Self {
        self.gets.insert(card_url(base_url), Ok(card_json(name, base_url)));
        self
    }

    pub fn with_card_error(mut self, base_url: &str, error: TransportError) -> Self {
        self.gets.insert(card_url(base_url), Err(error));
        self
    }

    pub fn with_card_delay(mut self, base_url: &str, delay: Duration) -> Self {
        self.delays.insert(card_url(base_url), delay);
        self
    }

    pub fn with_reply(mut self, base_url: &str, reply: Value) -> Self {
        self.posts.insert(base_url.to_string(), Ok(reply));
        self
    }

    pub fn with_reply_error(mut self, base_url: &str, error: TransportError) -> Self {
        self.posts.insert(base_url.to_string(), Err(error));
        self
    }

    pub fn posts(&self) -> usize {
        self.post_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl A2aTransport for MockTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.gets
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Connect(format!("connection refused: {url}"))))
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_post.lock().unwrap() = Some(body.clone());
        self.posts
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(TransportError::Connect(format!("connection refused: {url}"))))
    }
}

pub fn card_json(name: &str, url: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "url": url,
        "version": "1.0.0",
        "capabilities": {"streaming": true},
        "defaultInputModes": ["text/plain"],
        "defaultOutputModes": ["text/plain"],
        "skills": [{
            "id": "primary",
            "name": format!("{name} skill"),
            "description": "Answers questions",
            "tags": ["agriculture", "india"],
            "examples": ["What is the onion price in Nashik?"]
        }]
    })
}

/// `message/send` success envelope whose task carries the given text parts.
pub fn task_reply(texts: &[&str]) -> Value {
    let parts: Vec<Value> = texts.iter().map(|t| json!({"kind": "text", "text": t})).collect();
    json!({
        "jsonrpc": "2.0",
        "id": "req-1",
        "result": {
            "id": "task-1",
            "contextId": "ctx-1",
            "kind": "task",
            "status": {"state": "completed", "timestamp": "2025-06-01T10:00:00Z"},
            "artifacts": [{"artifactId": "art-1", "parts": parts}]
        }
    })
}
