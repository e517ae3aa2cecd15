//! Orchestrator configuration: built-in defaults, environment, and an
//! optional TOML file.

use crate::routing::{Intent, RoutingTable};
use agri_a2a::{AgentDirectory, AgentEndpoint, ClientConfig, ServerConfig};
use agri_core::{AgriError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const MARKET_AGENT: &str = "Market Intelligence Agent for Indian Agriculture";
pub const WEATHER_AGENT: &str = "Weather Agent for Indian Farmers";
pub const SCHEMES_AGENT: &str = "Agricultural Schemes Intelligence Agent";

pub const DEFAULT_MARKET_URL: &str = "http://localhost:10006";
pub const DEFAULT_WEATHER_URL: &str = "http://localhost:10005";
pub const DEFAULT_SCHEMES_URL: &str = "http://localhost:10004";

/// The three specialist agents, each URL overridable through
/// `MARKET_AGENT_URL`, `WEATHER_AGENT_URL` and `SCHEMES_AGENT_URL`.
pub fn default_directory() -> AgentDirectory {
    AgentDirectory::new()
        .with_env_agent(MARKET_AGENT, "MARKET_AGENT_URL", DEFAULT_MARKET_URL)
        .with_env_agent(WEATHER_AGENT, "WEATHER_AGENT_URL", DEFAULT_WEATHER_URL)
        .with_env_agent(SCHEMES_AGENT, "SCHEMES_AGENT_URL", DEFAULT_SCHEMES_URL)
}

/// File-level configuration. Every section is optional; values present in
/// the file take precedence over environment variables.
///
/// ```toml
/// [[agents]]
/// name = "Weather Agent for Indian Farmers"
/// url = "http://weather.internal:10005"
///
/// [client]
/// request_timeout_secs = 20
///
/// [server]
/// port = 8080
///
/// [routing]
/// schemes = "Agricultural Schemes Intelligence Agent"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrchestratorConfig {
    /// Replaces the default directory when non-empty.
    pub agents: Vec<AgentEndpoint>,
    pub client: ClientSection,
    pub server: ServerSection,
    pub routing: RoutingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientSection {
    pub request_timeout_secs: u64,
    pub discovery_timeout_secs: u64,
}

impl Default for ClientSection {
    fn default() -> Self {
        let defaults = ClientConfig::default();
        Self {
            request_timeout_secs: defaults.request_timeout.as_secs(),
            discovery_timeout_secs: defaults.discovery_timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub public_url: Option<String>,
    pub allowed_origins: Vec<String>,
    pub max_body_size: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub expose_error_details: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingSection {
    pub market: Option<String>,
    pub weather: Option<String>,
    pub schemes: Option<String>,
}

impl OrchestratorConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| AgriError::Config(format!("invalid configuration: {e}")))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AgriError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn directory(&self) -> AgentDirectory {
        if self.agents.is_empty() {
            default_directory()
        } else {
            self.agents.iter().cloned().collect()
        }
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        if self.client.request_timeout_secs == 0 || self.client.discovery_timeout_secs == 0 {
            return Err(AgriError::Config("client timeouts must be greater than zero".into()));
        }
        Ok(ClientConfig::default()
            .with_request_timeout(Duration::from_secs(self.client.request_timeout_secs))
            .with_discovery_timeout(Duration::from_secs(self.client.discovery_timeout_secs)))
    }

    /// `HOST`/`PORT` from the environment, then the `[server]` section.
    pub fn server_config(&self) -> Result<ServerConfig> {
        let mut server = ServerConfig::from_env()?;
        let section = &self.server;

        if let Some(host) = &section.host {
            server = server.with_host(host.clone());
        }
        if let Some(port) = section.port {
            server = server.with_port(port);
        }
        if let Some(url) = &section.public_url {
            server = server.with_public_url(url.clone());
        }
        if !section.allowed_origins.is_empty() {
            server.security.allowed_origins = section.allowed_origins.clone();
        }
        if let Some(size) = section.max_body_size {
            server.security.max_body_size = size;
        }
        if let Some(secs) = section.request_timeout_secs {
            server.security.request_timeout = Duration::from_secs(secs);
        }
        Ok(server.with_error_details(section.expose_error_details))
    }

    pub fn routing_table(&self) -> RoutingTable {
        let routes = [
            (Intent::Market, &self.routing.market),
            (Intent::Weather, &self.routing.weather),
            (Intent::Schemes, &self.routing.schemes),
        ];
        routes.into_iter().fold(RoutingTable::default(), |table, (intent, agent)| match agent {
            Some(agent) => table.with_route(intent, agent.clone()),
            None => table,
        })
    }
}
