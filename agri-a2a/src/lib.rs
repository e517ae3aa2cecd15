//! # agri-a2a
//!
//! Agent-to-agent (A2A) plumbing for the agri-mesh orchestrator.
//!
//! - [`a2a`] - wire types, JSON-RPC envelopes, card resolution and the client handle
//! - [`AgentRegistry`] - best-effort, concurrent discovery of remote agents
//! - [`Dispatcher`] - one text query to one named agent, with typed failures
//! - [`rest`] - axum router exposing an [`AgentExecutor`] as an A2A agent
//!
//! ```rust,no_run
//! use agri_a2a::{AgentDirectory, AgentRegistry, Dispatcher, HttpTransport};
//! use std::{sync::Arc, time::Duration};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = AgentDirectory::new().with_agent("weather", "http://localhost:10005");
//! let transport = Arc::new(HttpTransport::new(Duration::from_secs(30))?);
//! let (registry, report) = AgentRegistry::discover(&directory, transport, Duration::from_secs(60)).await;
//! assert!(report.is_success());
//!
//! let dispatcher = Dispatcher::new(Arc::new(registry));
//! let answer = dispatcher.send("weather", "Will it rain in Pune tomorrow?").await?;
//! # Ok(())
//! # }
//! ```

pub mod a2a;
pub mod config;
pub mod dispatch;
pub mod executor;
pub mod registry;
pub mod rest;

pub use a2a::{A2aClient, A2aTransport, AgentCard, AgentSkill, HttpTransport, TransportError};
pub use config::{AgentDirectory, AgentEndpoint, ClientConfig, SecurityConfig, ServerConfig};
pub use dispatch::{DispatchError, DispatchResult, Dispatcher, preview};
pub use executor::{AgentExecutor, AgentReply, RequestContext};
pub use registry::{AgentInfo, AgentRegistry, DiscoveryError, DiscoveryFailure, DiscoveryReport, RegistryEntry};
pub use rest::{A2aController, create_app};
