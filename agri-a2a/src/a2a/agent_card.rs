use super::{A2aTransport, AgentCard, TransportError};

/// Discovery path appended to an agent's base URL.
pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";

pub fn card_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), AGENT_CARD_PATH)
}

/// Fetch and parse the card published at `{base_url}/.well-known/agent.json`.
pub async fn resolve_agent_card(
    transport: &dyn A2aTransport,
    base_url: &str,
) -> Result<AgentCard, TransportError> {
    let url = card_url(base_url);
    let body = transport.get_json(&url).await?;
    if !body.is_object() {
        return Err(TransportError::Decode(format!("malformed agent card at {url}: expected a JSON object")));
    }
    serde_json::from_value(body)
        .map_err(|e| TransportError::Decode(format!("malformed agent card at {url}: {e}")))
}
