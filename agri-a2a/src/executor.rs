use crate::a2a::Message;
use agri_core::{AgriError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One incoming `message/send`, as seen by an [`AgentExecutor`].
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub task_id: String,
    pub context_id: String,
    pub message: Message,
}

impl RequestContext {
    /// Text of the incoming message, parts joined by a space.
    pub fn user_input(&self) -> String {
        self.message.text_content()
    }
}

/// Final answer of an execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentReply {
    pub text: String,
    /// Merged into the stored task's metadata.
    pub metadata: Option<Map<String, Value>>,
}

impl AgentReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), metadata: None }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.get_or_insert_with(Map::new).insert(key.into(), value);
        self
    }
}

/// Runs the agent behind an A2A server.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    async fn execute(&self, ctx: &RequestContext) -> Result<AgentReply>;

    /// Cancellation is unsupported unless an executor overrides this.
    async fn cancel(&self, task_id: &str) -> Result<()> {
        Err(AgriError::Agent(format!("Cancellation is not supported (task {task_id})")))
    }
}
