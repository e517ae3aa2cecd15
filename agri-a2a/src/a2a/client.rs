use super::{
    A2aTransport, AgentCard, JsonRpcRequest, JsonRpcResponse, Message, TransportError,
    resolve_agent_card,
};
use serde_json::Value;
use std::sync::Arc;

/// Client handle for one remote A2A agent.
///
/// Messages are posted to the base URL the agent was discovered at rather
/// than the `url` advertised in its card, since cards frequently advertise
/// a bind address that is not reachable from the caller.
#[derive(Clone)]
pub struct A2aClient {
    transport: Arc<dyn A2aTransport>,
    agent_card: AgentCard,
    endpoint: String,
}

impl A2aClient {
    pub fn new(transport: Arc<dyn A2aTransport>, agent_card: AgentCard, endpoint: impl Into<String>) -> Self {
        Self { transport, agent_card, endpoint: endpoint.into() }
    }

    /// Resolve the agent card at `base_url` and build a client for it.
    pub async fn from_url(transport: Arc<dyn A2aTransport>, base_url: &str) -> Result<Self, TransportError> {
        let card = resolve_agent_card(transport.as_ref(), base_url).await?;
        Ok(Self::new(transport, card, base_url))
    }

    pub fn agent_card(&self) -> &AgentCard {
        &self.agent_card
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a message (blocking/non-streaming `message/send`).
    pub async fn send_message(&self, message: Message) -> Result<JsonRpcResponse, TransportError> {
        let request = JsonRpcRequest::message_send(message)
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let body = serde_json::to_value(&request).map_err(|e| TransportError::Request(e.to_string()))?;

        let response = self.transport.post_json(&self.endpoint, &body).await?;
        serde_json::from_value(response)
            .map_err(|e| TransportError::Decode(format!("not a JSON-RPC response: {e}")))
    }
}

/// Collect every `artifacts[].parts[].text` of a task result, joined by a
/// single space and trimmed. `None` when no non-empty text exists.
///
/// Works on raw JSON so that ids, timestamps and status values the peer
/// sends in shapes this crate does not model never fail extraction.
pub fn artifact_text(result: &Value) -> Option<String> {
    let fragments: Vec<&str> = result
        .get("artifacts")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|artifact| artifact.get("parts").and_then(Value::as_array))
        .flatten()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .collect();

    let joined = fragments.join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_artifact_text_single_part() {
        let result = json!({"artifacts": [{"parts": [{"kind": "text", "text": "Onion price is ₹20/kg"}]}]});
        assert_eq!(artifact_text(&result).as_deref(), Some("Onion price is ₹20/kg"));
    }

    #[test]
    fn test_artifact_text_joins_across_artifacts() {
        let result = json!({
            "artifacts": [
                {"parts": [{"text": "A"}, {"kind": "data", "data": {}}]},
                {"parts": [{"text": "B "}]}
            ]
        });
        assert_eq!(artifact_text(&result).as_deref(), Some("A B"));
    }

    #[test]
    fn test_artifact_text_absent() {
        assert_eq!(artifact_text(&json!({"id": "t-1", "status": {"state": "completed"}})), None);
        assert_eq!(artifact_text(&json!({"artifacts": [{"parts": [{"text": "  "}]}]})), None);
        assert_eq!(artifact_text(&json!({"artifacts": "garbage"})), None);
    }
}
