//! Single-message dispatch to a named agent in the registry.

use crate::a2a::{Message, TransportError, artifact_text};
use crate::registry::AgentRegistry;
use agri_telemetry::{Instrument, dispatch_span};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Why a dispatch produced no answer.
///
/// The `Display` text of each variant is what gets handed to text-only
/// callers, so it is phrased for an end user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Agent '{name}' is not available. Available agents: {}", .available.join(", "))]
    UnknownAgent { name: String, available: Vec<String> },

    #[error("Error communicating with {agent}: request timed out after {after:?}")]
    Timeout { agent: String, after: Duration },

    #[error("Error communicating with {agent}: {detail}")]
    Transport { agent: String, detail: String },

    #[error("Error communicating with {agent}: malformed response: {detail}")]
    MalformedResponse { agent: String, detail: String },

    #[error("Error communicating with {agent}: agent returned error {code}: {message}")]
    Rpc { agent: String, code: i32, message: String },

    #[error("Received response from {agent} but no text content found")]
    EmptyResponse { agent: String },
}

impl DispatchError {
    pub fn agent(&self) -> &str {
        match self {
            DispatchError::UnknownAgent { name, .. } => name,
            DispatchError::Timeout { agent, .. }
            | DispatchError::Transport { agent, .. }
            | DispatchError::MalformedResponse { agent, .. }
            | DispatchError::Rpc { agent, .. }
            | DispatchError::EmptyResponse { agent } => agent,
        }
    }

    fn from_transport(agent: &str, err: TransportError) -> Self {
        let agent = agent.to_string();
        match err {
            TransportError::Timeout(after) => DispatchError::Timeout { agent, after },
            TransportError::Decode(detail) => DispatchError::MalformedResponse { agent, detail },
            other => DispatchError::Transport { agent, detail: other.to_string() },
        }
    }
}

impl From<DispatchError> for agri_core::AgriError {
    fn from(err: DispatchError) -> Self {
        agri_core::AgriError::Agent(err.to_string())
    }
}

pub type DispatchResult = Result<String, DispatchError>;

/// Sends text queries to registered agents. Cheap to clone; all clones share
/// the same immutable registry.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    registry: Arc<AgentRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Send `text` to `agent_name` and return the agent's text answer.
    pub async fn send(&self, agent_name: &str, text: &str) -> DispatchResult {
        let Some(entry) = self.registry.get(agent_name) else {
            warn!(agent = agent_name, "Dispatch to unknown agent");
            return Err(DispatchError::UnknownAgent {
                name: agent_name.to_string(),
                available: self.registry.list_available_agents(),
            });
        };

        let message = Message::user_text(uuid::Uuid::new_v4().to_string(), text);
        let span = dispatch_span(agent_name, &message.message_id);

        async move {
            info!(preview = %preview(text, 100), "Sending message to agent");

            let response = entry
                .client()
                .send_message(message)
                .await
                .map_err(|e| DispatchError::from_transport(agent_name, e));

            let outcome = response.and_then(|response| {
                if let Some(err) = response.error {
                    return Err(DispatchError::Rpc {
                        agent: agent_name.to_string(),
                        code: err.code,
                        message: err.message,
                    });
                }
                match response.result {
                    Some(result) if !is_task(&result) => Err(DispatchError::MalformedResponse {
                        agent: agent_name.to_string(),
                        detail: match result.get("kind").and_then(Value::as_str) {
                            Some(kind) => format!("expected a task result, got '{kind}'"),
                            None => "result is not a task object".to_string(),
                        },
                    }),
                    Some(result) => artifact_text(&result)
                        .ok_or_else(|| DispatchError::EmptyResponse { agent: agent_name.to_string() }),
                    None => Err(DispatchError::MalformedResponse {
                        agent: agent_name.to_string(),
                        detail: "response has neither result nor error".to_string(),
                    }),
                }
            });

            match &outcome {
                Ok(text) => {
                    info!(chars = text.chars().count(), preview = %preview(text, 100), "Received response");
                    debug!(response = %text, "Full agent response");
                }
                Err(e) => error!(error = %e, "Dispatch failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    /// Like [`Dispatcher::send`], with any error rendered as text. For
    /// callers that only pass strings on (tool results, chat replies).
    pub async fn send_text(&self, agent_name: &str, text: &str) -> String {
        match self.send(agent_name, text).await {
            Ok(answer) => answer,
            Err(e) => e.to_string(),
        }
    }

    /// Send the same query to every registered agent concurrently. Results
    /// are in registry order; an empty registry yields an empty list.
    pub async fn broadcast(&self, text: &str) -> Vec<(String, DispatchResult)> {
        let names = self.registry.list_available_agents();
        let replies = join_all(names.iter().map(|name| self.send(name, text))).await;
        names.into_iter().zip(replies).collect()
    }
}

/// A task object; peers that omit `kind` are taken at their word.
fn is_task(result: &Value) -> bool {
    result.is_object() && result.get("kind").is_none_or(|kind| kind.as_str() == Some("task"))
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_agent_rendering() {
        let err = DispatchError::UnknownAgent {
            name: "Soil Agent".into(),
            available: vec!["Weather Agent for Indian Farmers".into(), "Market".into()],
        };
        assert_eq!(
            err.to_string(),
            "Agent 'Soil Agent' is not available. Available agents: Weather Agent for Indian Farmers, Market"
        );
        assert_eq!(err.agent(), "Soil Agent");
    }

    #[test]
    fn test_transport_mapping() {
        let err = DispatchError::from_transport("Market", TransportError::Timeout(Duration::from_secs(30)));
        assert!(matches!(err, DispatchError::Timeout { .. }));
        assert_eq!(err.to_string(), "Error communicating with Market: request timed out after 30s");

        let err = DispatchError::from_transport("Market", TransportError::Connect("refused".into()));
        assert_eq!(err.to_string(), "Error communicating with Market: connection failed: refused");

        let err = DispatchError::from_transport("Market", TransportError::Decode("eof".into()));
        assert!(matches!(err, DispatchError::MalformedResponse { .. }));
    }

    #[test]
    fn test_empty_response_placeholder() {
        let err = DispatchError::EmptyResponse { agent: "Weather".into() };
        assert_eq!(err.to_string(), "Received response from Weather but no text content found");
    }

    #[test]
    fn test_preview_is_char_safe() {
        assert_eq!(preview("प्याज़ का भाव", 3), "प्य...");
        assert_eq!(preview("short", 100), "short");
    }

    #[tokio::test]
    async fn test_broadcast_empty_registry() {
        let dispatcher = Dispatcher::new(Arc::new(AgentRegistry::empty()));
        assert!(dispatcher.broadcast("anything").await.is_empty());
    }
}
