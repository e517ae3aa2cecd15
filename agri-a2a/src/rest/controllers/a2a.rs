use crate::a2a::{
    AgentCard, Artifact, JsonRpcError, JsonRpcRequest, JsonRpcResponse, Message, MessageSendParams,
    Part, Role, Task, TaskIdParams, TaskState, TaskStatus, methods,
};
use crate::config::SecurityConfig;
use crate::executor::{AgentExecutor, RequestContext};
use agri_telemetry::{Instrument, orchestrator_span};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Json},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// In-memory task storage. Holds at most `capacity` tasks; storing a new
/// task beyond that evicts the oldest one.
pub struct TaskStore {
    tasks: RwLock<StoredTasks>,
    capacity: usize,
}

#[derive(Default)]
struct StoredTasks {
    by_id: HashMap<String, Task>,
    order: VecDeque<String>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl TaskStore {
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { tasks: RwLock::new(StoredTasks::default()), capacity: capacity.max(1) }
    }

    pub async fn store(&self, task: Task) {
        let mut tasks = self.tasks.write().await;
        if tasks.by_id.insert(task.id.clone(), task.clone()).is_none() {
            tasks.order.push_back(task.id);
        }
        while tasks.order.len() > self.capacity {
            if let Some(oldest) = tasks.order.pop_front() {
                tasks.by_id.remove(&oldest);
            }
        }
    }

    pub async fn get(&self, task_id: &str) -> Option<Task> {
        self.tasks.read().await.by_id.get(task_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.by_id.len()
    }
}

/// Controller for A2A protocol endpoints
#[derive(Clone)]
pub struct A2aController {
    executor: Arc<dyn AgentExecutor>,
    agent_card: AgentCard,
    task_store: Arc<TaskStore>,
    security: SecurityConfig,
}

impl A2aController {
    pub fn new(executor: Arc<dyn AgentExecutor>, agent_card: AgentCard, security: SecurityConfig) -> Self {
        Self { executor, agent_card, task_store: Arc::new(TaskStore::new()), security }
    }

    pub fn agent_card(&self) -> &AgentCard {
        &self.agent_card
    }

    pub fn security(&self) -> &SecurityConfig {
        &self.security
    }
}

/// GET /.well-known/agent.json - Serve the agent card
pub async fn get_agent_card(State(controller): State<A2aController>) -> impl IntoResponse {
    Json(controller.agent_card.clone())
}

/// POST / - JSON-RPC endpoint for A2A protocol
pub async fn handle_jsonrpc(
    State(controller): State<A2aController>,
    payload: Result<Json<JsonRpcRequest>, JsonRejection>,
) -> Json<JsonRpcResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected JSON-RPC body");
            let error = match rejection {
                JsonRejection::JsonSyntaxError(_) => JsonRpcError::parse_error(rejection.body_text()),
                _ => JsonRpcError::invalid_request(rejection.body_text()),
            };
            return Json(JsonRpcResponse::error(None, error));
        }
    };

    if request.jsonrpc != "2.0" {
        return Json(JsonRpcResponse::error(
            request.id,
            JsonRpcError::invalid_request("Invalid JSON-RPC version"),
        ));
    }

    match request.method.as_str() {
        methods::MESSAGE_SEND => handle_message_send(&controller, request.params, request.id).await,
        methods::TASKS_GET => handle_tasks_get(&controller, request.params, request.id).await,
        methods::TASKS_CANCEL => handle_tasks_cancel(&controller, request.params, request.id).await,
        _ => Json(JsonRpcResponse::error(request.id, JsonRpcError::method_not_found(&request.method))),
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
    match params {
        Some(p) => serde_json::from_value(p).map_err(|e| JsonRpcError::invalid_params(e.to_string())),
        None => Err(JsonRpcError::invalid_params("Missing params")),
    }
}

fn agent_message(task: &Task, text: String) -> Message {
    Message::builder()
        .role(Role::Agent)
        .parts(vec![Part::text(text)])
        .task_id(task.id.clone())
        .context_id(task.context_id.clone())
        .build()
}

async fn handle_message_send(
    controller: &A2aController,
    params: Option<Value>,
    id: Option<Value>,
) -> Json<JsonRpcResponse> {
    let params: MessageSendParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return Json(JsonRpcResponse::error(id, e)),
    };

    let ctx = RequestContext {
        task_id: params.message.task_id.clone().unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        context_id: params.message.context_id.clone().unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        message: params.message,
    };

    let mut task = Task::new(&ctx.task_id, &ctx.context_id);
    task.history.push(ctx.message.clone());

    let span = orchestrator_span(&ctx.task_id, &ctx.context_id);
    let outcome = controller.executor.execute(&ctx).instrument(span).await;

    match outcome {
        Ok(reply) => {
            info!(task.id = %task.id, chars = reply.text.chars().count(), "Task completed");
            let message = agent_message(&task, reply.text.clone());
            task.status = TaskStatus::new(TaskState::Completed).with_message(message.clone());
            task.artifacts.push(Artifact::text("response", reply.text));
            task.history.push(message);
            task.metadata = reply.metadata;
        }
        Err(e) => {
            let detail = JsonRpcError::internal_error_sanitized(&e, controller.security.expose_error_details);
            let message = agent_message(
                &task,
                format!("An error occurred while processing your query: {}", detail.message),
            );
            task.status = TaskStatus::new(TaskState::Failed).with_message(message);
        }
    }

    controller.task_store.store(task.clone()).await;

    match serde_json::to_value(&task) {
        Ok(value) => Json(JsonRpcResponse::success(id, value)),
        Err(e) => Json(JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string()))),
    }
}

async fn handle_tasks_get(
    controller: &A2aController,
    params: Option<Value>,
    id: Option<Value>,
) -> Json<JsonRpcResponse> {
    let params: TaskIdParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return Json(JsonRpcResponse::error(id, e)),
    };

    match controller.task_store.get(&params.id).await {
        Some(task) => match serde_json::to_value(task) {
            Ok(value) => Json(JsonRpcResponse::success(id, value)),
            Err(e) => Json(JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string()))),
        },
        None => Json(JsonRpcResponse::error(id, JsonRpcError::task_not_found(&params.id))),
    }
}

async fn handle_tasks_cancel(
    controller: &A2aController,
    params: Option<Value>,
    id: Option<Value>,
) -> Json<JsonRpcResponse> {
    let params: TaskIdParams = match parse_params(params) {
        Ok(p) => p,
        Err(e) => return Json(JsonRpcResponse::error(id, e)),
    };

    match controller.executor.cancel(&params.id).await {
        Ok(()) => {
            let mut task = controller
                .task_store
                .get(&params.id)
                .await
                .unwrap_or_else(|| Task::new(&params.id, uuid::Uuid::new_v4().to_string()));
            task.status = TaskStatus::new(TaskState::Canceled);
            controller.task_store.store(task.clone()).await;
            match serde_json::to_value(task) {
                Ok(value) => Json(JsonRpcResponse::success(id, value)),
                Err(e) => Json(JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string()))),
            }
        }
        Err(e) => {
            warn!(task.id = %params.id, error = %e, "Rejected task cancellation");
            Json(JsonRpcResponse::error(id, JsonRpcError::unsupported_operation(e.to_string())))
        }
    }
}
