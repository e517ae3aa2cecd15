pub mod agent_card;
pub mod client;
pub mod jsonrpc;
pub mod transport;
pub mod types;

pub use agent_card::{AGENT_CARD_PATH, card_url, resolve_agent_card};
pub use client::{A2aClient, artifact_text};
pub use jsonrpc::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, MessageSendConfig, MessageSendParams,
    TaskIdParams, methods,
};
pub use transport::{A2aTransport, DEFAULT_REQUEST_TIMEOUT, HttpTransport, TransportError};
pub use types::*;
