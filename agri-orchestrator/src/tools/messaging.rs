use super::string_args_schema;
use agri_a2a::Dispatcher;
use agri_core::{Result, Tool, required_str};
use async_trait::async_trait;
use serde_json::Value;

/// Delegates a query to one named agent and returns its answer verbatim.
pub struct SendMessageTool {
    dispatcher: Dispatcher,
}

impl SendMessageTool {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl Tool for SendMessageTool {
    fn name(&self) -> &str {
        "send_message_to_agent"
    }

    fn description(&self) -> &str {
        "Send a message to a specific specialized agent. Weather Agent for Indian Farmers: weather, \
         soil, climate, spraying conditions, irrigation timing. Market Intelligence Agent for Indian \
         Agriculture: commodity prices, market trends, trading insights. Agricultural Schemes \
         Intelligence Agent: government schemes, subsidies, eligibility, applications."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(string_args_schema(&[
            ("agent_name", "The exact name of the agent to send the message to"),
            ("message", "The complete user query with full context"),
        ]))
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let agent_name = required_str(self.name(), &args, "agent_name")?;
        let message = required_str(self.name(), &args, "message")?;
        Ok(Value::String(self.dispatcher.send_text(agent_name, message).await))
    }
}
