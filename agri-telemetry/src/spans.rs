//! Span helpers for the registry, dispatch and orchestration paths.

use tracing::Span;

/// Span covering one discovery pass over the configured agents.
///
/// # Example
/// ```
/// use agri_telemetry::discovery_span;
/// let span = discovery_span(3);
/// let _enter = span.enter();
/// ```
pub fn discovery_span(configured: usize) -> Span {
    tracing::info_span!("registry.discover", agents.configured = configured, otel.kind = "internal")
}

/// Span covering a single card resolution.
pub fn resolve_span(agent_name: &str, base_url: &str) -> Span {
    tracing::debug_span!(
        "registry.resolve",
        agent.name = agent_name,
        agent.url = base_url,
        otel.kind = "client"
    )
}

/// Span covering one message round trip to a remote agent.
pub fn dispatch_span(agent_name: &str, message_id: &str) -> Span {
    tracing::info_span!(
        "agent.dispatch",
        agent.name = agent_name,
        message.id = message_id,
        otel.kind = "client"
    )
}

pub fn tool_execute_span(tool_name: &str) -> Span {
    tracing::info_span!("tool.execute", tool.name = tool_name, otel.kind = "internal")
}

/// Span covering an orchestrator task served over A2A.
pub fn orchestrator_span(task_id: &str, context_id: &str) -> Span {
    tracing::info_span!(
        "orchestrator.task",
        task.id = task_id,
        context.id = context_id,
        user.id = tracing::field::Empty,
        otel.kind = "server"
    )
}

/// Record the caller's user id on the current orchestrator span.
pub fn record_user_id(user_id: &str) {
    Span::current().record("user.id", user_id);
}
