//! # agri-orchestrator
//!
//! Top-level agent for Indian farmers. Discovers the market, weather and
//! schemes agents, routes each question to the right specialists and quotes
//! their answers in full.
//!
//! - [`Orchestrator`] - classification, routing and verbatim presentation
//! - [`tools`] - delegation, directory and composed market + weather tools
//! - [`OrchestratorExecutor`] / [`serve_app`] - the orchestrator as an A2A agent
//! - [`OrchestratorConfig`] - defaults, environment and TOML configuration

pub mod agent_card;
pub mod config;
pub mod executor;
pub mod orchestrator;
pub mod payload;
pub mod routing;
pub mod synthesis;
pub mod tools;

pub use agent_card::{ORCHESTRATOR_NAME, orchestrator_card};
pub use config::{
    MARKET_AGENT, OrchestratorConfig, SCHEMES_AGENT, WEATHER_AGENT, default_directory,
};
pub use executor::OrchestratorExecutor;
pub use orchestrator::{Answer, Consultation, Orchestrator};
pub use payload::{Payload, extract_user_id};
pub use routing::{Intent, IntentClassifier, KeywordClassifier, RoutingTable};

use agri_a2a::{A2aController, ServerConfig, create_app};
use std::sync::Arc;

/// Router serving `orchestrator` over A2A with the card advertising the
/// server's base URL.
pub fn serve_app(orchestrator: Arc<Orchestrator>, server: &ServerConfig) -> axum::Router {
    let controller = A2aController::new(
        Arc::new(OrchestratorExecutor::new(orchestrator)),
        orchestrator_card(&server.base_url()),
        server.security.clone(),
    );
    create_app(controller)
}
