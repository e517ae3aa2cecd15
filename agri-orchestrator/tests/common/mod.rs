#![allow(dead_code)]

use agri_a2a::a2a::{A2aTransport, TransportError, card_url};
use agri_a2a::{AgentDirectory, AgentRegistry, Dispatcher};
use agri_orchestrator::{MARKET_AGENT, Orchestrator, RoutingTable, SCHEMES_AGENT, WEATHER_AGENT};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const MARKET_URL: &str = "http://market.test";
pub const WEATHER_URL: &str = "http://weather.test";
pub const SCHEMES_URL: &str = "http://schemes.test";

/// Specialist agents that answer every query with a fixed text, recording
/// what they were asked.
#[derive(Default)]
pub struct FakeAgents {
    cards: HashMap<String, Value>,
    answers: HashMap<String, String>,
    pub asked: Mutex<Vec<(String, String)>>,
}

impl FakeAgents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, name: &str, base_url: &str, answer: &str) -> Self {
        self.cards.insert(
            card_url(base_url),
            json!({"name": name, "description": format!("{name} (test)"), "url": base_url, "skills": []}),
        );
        self.answers.insert(base_url.to_string(), answer.to_string());
        self
    }

    pub fn questions_to(&self, base_url: &str) -> Vec<String> {
        self.asked
            .lock()
            .unwrap()
            .iter()
            .filter(|(url, _)| url == base_url)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl A2aTransport for FakeAgents {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        self.cards.get(url).cloned().ok_or_else(|| TransportError::Connect(format!("refused: {url}")))
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        let text = body["params"]["message"]["parts"][0]["text"].as_str().unwrap_or_default().to_string();
        self.asked.lock().unwrap().push((url.to_string(), text));

        let answer = self.answers.get(url).ok_or_else(|| TransportError::Connect(format!("refused: {url}")))?;
        Ok(json!({
            "jsonrpc": "2.0",
            "id": body["id"],
            "result": {
                "id": "task-1",
                "contextId": "ctx-1",
                "kind": "task",
                "status": {"state": "completed"},
                "artifacts": [{"artifactId": "a-1", "parts": [{"kind": "text", "text": answer}]}]
            }
        }))
    }
}

pub fn all_agents() -> FakeAgents {
    FakeAgents::new()
        .with_agent(MARKET_AGENT, MARKET_URL, "Onion modal price ₹2,000/quintal at Lasalgaon, trend rising")
        .with_agent(WEATHER_AGENT, WEATHER_URL, "Light rain expected on Thursday")
        .with_agent(SCHEMES_AGENT, SCHEMES_URL, "PM-KISAN pays ₹6,000 per year in three instalments")
}

fn directory() -> AgentDirectory {
    AgentDirectory::new()
        .with_agent(MARKET_AGENT, MARKET_URL)
        .with_agent(WEATHER_AGENT, WEATHER_URL)
        .with_agent(SCHEMES_AGENT, SCHEMES_URL)
}

/// Orchestrator over whichever of the three agents `agents` serves.
pub async fn orchestrator(agents: Arc<FakeAgents>) -> Orchestrator {
    let (registry, _) = AgentRegistry::discover(&directory(), agents, Duration::from_secs(5)).await;
    Orchestrator::new(Dispatcher::new(Arc::new(registry)), RoutingTable::default())
}
