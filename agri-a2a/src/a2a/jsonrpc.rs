use super::Message;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    pub id: Option<Value>,
}

impl JsonRpcRequest {
    /// `message/send` carrying `message`, using the message id as request id.
    pub fn message_send(message: Message) -> serde_json::Result<Self> {
        let id = Value::String(message.message_id.clone());
        let params = serde_json::to_value(MessageSendParams { message, config: None })?;
        Ok(Self {
            jsonrpc: "2.0".to_string(),
            method: methods::MESSAGE_SEND.to_string(),
            params: Some(params),
            id: Some(id),
        })
    }
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default = "jsonrpc_version")]
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    #[serde(default)]
    pub id: Option<Value>,
}

fn jsonrpc_version() -> String {
    "2.0".to_string()
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self { jsonrpc: jsonrpc_version(), result: Some(result), error: None, id }
    }

    pub fn error(id: Option<Value>, error: JsonRpcError) -> Self {
        Self { jsonrpc: jsonrpc_version(), result: None, error: Some(error), id }
    }
}

/// JSON-RPC 2.0 Error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub const TASK_NOT_FOUND: i32 = -32001;
    pub const UNSUPPORTED_OPERATION: i32 = -32004;

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self { code: -32700, message: message.into(), data: None }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self { code: -32600, message: message.into(), data: None }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self { code: -32601, message: format!("Method not found: {}", method), data: None }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: -32602, message: message.into(), data: None }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self { code: -32603, message: message.into(), data: None }
    }

    pub fn task_not_found(task_id: &str) -> Self {
        Self { code: Self::TASK_NOT_FOUND, message: format!("Task not found: {}", task_id), data: None }
    }

    pub fn unsupported_operation(message: impl Into<String>) -> Self {
        Self { code: Self::UNSUPPORTED_OPERATION, message: message.into(), data: None }
    }

    /// Internal error whose detail is only exposed when `expose_details` is set.
    /// The detail is always logged.
    pub fn internal_error_sanitized(error: &dyn std::fmt::Display, expose_details: bool) -> Self {
        tracing::error!(error = %error, "Internal server error");
        if expose_details {
            Self::internal_error(error.to_string())
        } else {
            Self::internal_error("Internal server error")
        }
    }
}

/// A2A Protocol Methods
pub mod methods {
    pub const MESSAGE_SEND: &str = "message/send";
    pub const TASKS_GET: &str = "tasks/get";
    pub const TASKS_CANCEL: &str = "tasks/cancel";
}

/// Parameters for message/send method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSendParams {
    pub message: Message,
    #[serde(skip_serializing_if = "Option::is_none", rename = "configuration")]
    pub config: Option<MessageSendConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSendConfig {
    #[serde(skip_serializing_if = "Option::is_none", rename = "acceptedOutputModes")]
    pub accepted_output_modes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "historyLength")]
    pub history_length: Option<u32>,
}

/// Parameters for tasks/get and tasks/cancel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskIdParams {
    #[serde(alias = "taskId")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", rename = "historyLength")]
    pub history_length: Option<u32>,
}
