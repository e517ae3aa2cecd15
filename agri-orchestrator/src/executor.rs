use crate::orchestrator::Orchestrator;
use crate::payload::extract_user_id;
use agri_a2a::{AgentExecutor, AgentReply, RequestContext};
use agri_core::{AgriError, Result};
use agri_telemetry::record_user_id;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Serves the [`Orchestrator`] behind the A2A server.
pub struct OrchestratorExecutor {
    orchestrator: Arc<Orchestrator>,
}

impl OrchestratorExecutor {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl AgentExecutor for OrchestratorExecutor {
    async fn execute(&self, ctx: &RequestContext) -> Result<AgentReply> {
        let payload = extract_user_id(&ctx.user_input());
        if let Some(user_id) = &payload.user_id {
            record_user_id(user_id);
        }

        let query = payload.text.trim();
        if query.is_empty() {
            return Err(AgriError::Agent("No text content found in message".to_string()));
        }

        info!(task.id = %ctx.task_id, chars = query.chars().count(), "Processing query");
        let answer = self.orchestrator.handle(query).await;

        let mut reply = AgentReply::text(answer.text.clone())
            .with_metadata("intents", json!(answer.intents))
            .with_metadata("consulted_agents", json!(answer.consulted_agents()));
        if let Some(user_id) = payload.user_id {
            reply = reply.with_metadata("user_id", json!(user_id));
        }
        Ok(reply)
    }
}
